use crate::configuration::build_context::BuildContext;
use crate::report::{codec, Element, Error};

use super::{assemble, Converter, Framework, ResultLayout, RunStatus, SkippedPolicy};

/// Maps JUnit and XUnit (robot framework) reports onto canonical run
/// records: one record per test case, flattened pre-order across nested
/// suites.
pub struct JUnitConverter {
    framework: Framework,
    skipped_policy: SkippedPolicy,
}

impl JUnitConverter {
    pub fn new(framework: Framework) -> Self {
        JUnitConverter {
            framework,
            skipped_policy: SkippedPolicy::default(),
        }
    }

    pub fn with_skipped_policy(mut self, policy: SkippedPolicy) -> Self {
        self.skipped_policy = policy;
        self
    }

    fn collect_runs(&self, document: &Element, build_context: &BuildContext) -> Vec<Element> {
        let mut runs = Vec::new();
        if let Some(root) = document.first_child("testsuites") {
            for suite in root.children_named("testsuite") {
                self.visit_suite(suite, "", build_context, &mut runs);
            }
        } else if let Some(suite) = document.first_child("testsuite") {
            self.visit_suite(suite, "", build_context, &mut runs);
        } else {
            warn!("Report contains no test suites");
        }
        runs
    }

    /// Cases map before nested suites recurse, so the flattened sequence
    /// follows document order.
    fn visit_suite(
        &self,
        suite: &Element,
        parent_package: &str,
        build_context: &BuildContext,
        runs: &mut Vec<Element>,
    ) {
        let package = self.package_name(parent_package, suite.attr("name").unwrap_or(""));
        for case in suite.children_named("testcase") {
            runs.push(self.map_case(case, &package, build_context));
        }
        for nested in suite.children_named("testsuite") {
            self.visit_suite(nested, &package, build_context, runs);
        }
    }

    fn package_name(&self, parent: &str, suite_name: &str) -> String {
        if !self.framework.concatenates_suite_names() {
            return String::new();
        }
        if parent.is_empty() {
            suite_name.to_owned()
        } else {
            format!("{}.{}", parent, suite_name)
        }
    }

    fn map_case(&self, case: &Element, package: &str, build_context: &BuildContext) -> Element {
        let mut run = Element::new();
        run.set_attr("module", "");
        if !package.is_empty() {
            run.set_attr("package", package);
        }
        if let Some(class) = case.attr("classname") {
            run.set_attr("class", class);
        }
        run.set_attr("name", case.attr("name").unwrap_or(""));
        run.set_attr("status", self.classify(case).as_str());
        run.set_attr("duration", case_duration(case).to_string());
        if let Some(external_run_id) = &build_context.external_run_id {
            run.set_attr("external_run_id", external_run_id.as_str());
        }
        if let Some(error) = extract_error(case) {
            run.append_child("error", error);
        }
        run
    }

    /// Outcome priority is skipped > failed > passed, first applicable wins.
    fn classify(&self, case: &Element) -> RunStatus {
        if let Some(marker) = case.first_child("skipped") {
            let honored = match self.skipped_policy {
                SkippedPolicy::MarkerPresence => true,
                SkippedPolicy::NonEmptyMarker => {
                    marker.content().map_or(false, |content| !content.is_empty())
                }
            };
            if honored {
                return RunStatus::Skipped;
            }
        }
        if case.has_child("error") || case.has_child("failure") {
            RunStatus::Failed
        } else {
            RunStatus::Passed
        }
    }
}

impl Converter for JUnitConverter {
    fn convert(&self, report: &str, build_context: &BuildContext) -> Result<String, Error> {
        let document = codec::parse(report)?;
        let runs = self.collect_runs(&document, build_context);
        debug!("Mapped {} run records from report", runs.len());
        let result = assemble(
            build_context,
            ResultLayout {
                test_level: "Unit Test",
                test_type: "Sanity",
                framework: self.framework.label().to_owned(),
                run_tag: "test_run",
            },
            runs,
        );
        codec::serialize(&result)
    }
}

/// An error record beats a failure record; within the chosen record the
/// stack text comes from CDATA, else plain text, else stays empty.
fn extract_error(case: &Element) -> Option<Element> {
    let record = case
        .children_named("error")
        .first()
        .or_else(|| case.children_named("failure").first())?;

    let mut error = Element::new();
    if let Some(message) = record.attr("message") {
        error.set_attr("message", message);
    }
    if let Some(kind) = record.attr("type") {
        error.set_attr("type", kind);
    }
    error.text = Some(record.content().unwrap_or("").to_owned());
    Some(error)
}

fn case_duration(case: &Element) -> i64 {
    case.attr("time")
        .and_then(|value| value.parse::<f64>().ok())
        .map(|seconds| seconds.round() as i64)
        .unwrap_or(1)
}
