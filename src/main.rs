// #![forbid(unsafe_code)]
// #![deny(non_upper_case_globals)]
// #![deny(non_camel_case_types)]
// #![deny(non_snake_case)]
// #![deny(unused_mut)]
//#![deny(missing_docs)]
//#![deny(warnings)]

extern crate chrono;

#[macro_use]
extern crate log;

use log::LevelFilter;
use std::{fs, path::PathBuf, process::exit};
use structopt::StructOpt;

use octane_report_converter::configuration::build_context::BuildContext;
use octane_report_converter::configuration::command_line::{Dialect, LogLevel, Opt};
use octane_report_converter::converter::gherkin::GherkinConverter;
use octane_report_converter::converter::junit::JUnitConverter;
use octane_report_converter::converter::{Converter, Framework};

fn main() {
    let options = Opt::from_args();

    init_logging(
        options.logging.unwrap_or(LogLevel::Info).into(),
        &options.log_output_file,
    );

    let build_context = match BuildContext::from(options.build_config.clone()) {
        Ok(context) => context,
        Err(e) => {
            error!("Failed to load build context configuration {}", e);
            exit(1);
        }
    };
    debug!("Initiated build context {:#?}", build_context);

    let report = match fs::read_to_string(&options.file) {
        Ok(text) => text,
        Err(e) => {
            error!("Failed to read report file {}: {}", options.file.display(), e);
            exit(1);
        }
    };

    let converter: Box<dyn Converter> = match options.dialect {
        Dialect::Junit => Box::new(JUnitConverter::new(Framework::JUnit)),
        Dialect::Xunit => Box::new(JUnitConverter::new(Framework::RobotFramework)),
        Dialect::Gherkin => Box::new(GherkinConverter::new(options.framework.as_str())),
    };

    match converter.convert(&report, &build_context) {
        Ok(xml) => write_output(&options.output, &xml),
        Err(e) => {
            error!("Failed to convert {:?} report {}", options.dialect, e);
            exit(1);
        }
    }
}

fn write_output(target: &Option<PathBuf>, xml: &str) {
    match target {
        Some(path) => {
            if let Err(e) = fs::write(path, xml) {
                error!("Failed to write output file {}: {}", path.display(), e);
                exit(1);
            }
            info!("Converted result written to {}", path.display());
        }
        None => println!("{}", xml),
    }
}

fn init_logging(level: LevelFilter, output: &Option<PathBuf>) {
    let mut dispatcher = fern::Dispatch::new()
        // Perform allocation-free log formatting
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}:{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record
                    .line()
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "".to_owned()),
                record.level(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stdout());

    if let Some(log_file) = output {
        dispatcher = dispatcher.chain(fern::log_file(log_file).unwrap())
    }
    dispatcher.apply().unwrap();
    info!("Logging level {} enabled", level);
}
