use crate::configuration::build_context::BuildContext;
use crate::report::{codec, Element, Error};

use super::{assemble, Converter, ResultLayout, RunStatus};

/// Maps Gherkin/Cucumber reports: one run record per feature with the step
/// durations accumulated upward and failure rolled up step -> scenario ->
/// feature. The mapped feature subtree travels inside the run record.
pub struct GherkinConverter {
    framework: String,
}

impl GherkinConverter {
    pub fn new(framework: impl Into<String>) -> Self {
        GherkinConverter {
            framework: framework.into(),
        }
    }
}

impl Converter for GherkinConverter {
    fn convert(&self, report: &str, build_context: &BuildContext) -> Result<String, Error> {
        let mut document = codec::parse(report)?;
        let features = match document.first_child_mut("features") {
            Some(root) => root.take_children("feature"),
            None => {
                warn!("Report contains no features");
                Vec::new()
            }
        };

        let runs: Vec<Element> = features.into_iter().map(map_feature).collect();
        debug!("Mapped {} gherkin run records from report", runs.len());
        let result = assemble(
            build_context,
            ResultLayout {
                test_level: "Gherkin Test",
                test_type: "Sanity",
                framework: self.framework.clone(),
                run_tag: "gherkin_test_run",
            },
            runs,
        );
        codec::serialize(&result)
    }
}

fn map_feature(mut feature: Element) -> Element {
    let mut feature_duration = 0.0_f64;
    let mut feature_status = RunStatus::Passed;

    if let Some(scenarios) = feature.first_child_mut("scenarios") {
        for scenario in scenarios.children_named_mut("scenario") {
            let mut scenario_status = RunStatus::Passed;
            let mut has_steps = false;

            if let Some(steps) = scenario.first_child("steps") {
                for step in steps.children_named("step") {
                    has_steps = true;
                    feature_duration += step
                        .attr("duration")
                        .and_then(|value| value.parse::<f64>().ok())
                        .unwrap_or(0.0);
                    let failed = step.attr("status").map_or(false, |status| {
                        status.eq_ignore_ascii_case(RunStatus::Failed.as_str())
                    });
                    if failed {
                        scenario_status = RunStatus::Failed;
                    }
                }
            }

            // A scenario without steps keeps its default Passed outcome and
            // its status attribute untouched.
            if has_steps {
                scenario.set_attr("status", scenario_status.as_str());
                if scenario_status == RunStatus::Failed {
                    feature_status = RunStatus::Failed;
                }
            }
        }
    }

    let name = feature.attr("name").unwrap_or("").to_owned();
    let mut run = Element::new();
    run.set_attr("name", name);
    run.set_attr("duration", format_duration(feature_duration));
    run.set_attr("status", feature_status.as_str());
    run.append_child("feature", feature);
    run
}

/// Step durations accumulate as raw numbers, no rounding; an integral sum
/// renders without a fractional part.
fn format_duration(duration: f64) -> String {
    if duration.fract() == 0.0 {
        (duration as i64).to_string()
    } else {
        duration.to_string()
    }
}
