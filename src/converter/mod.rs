pub mod gherkin;
pub mod junit;

use std::fmt;

use crate::configuration::build_context::BuildContext;
use crate::report::{Element, Error, OneOrMany};

/// Converts one raw test-result report into canonical result XML.
pub trait Converter {
    fn convert(&self, report: &str, build_context: &BuildContext) -> Result<String, Error>;
}

/// Outcome of a single mapped run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Passed,
    Failed,
    Skipped,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Passed => "Passed",
            RunStatus::Failed => "Failed",
            RunStatus::Skipped => "Skipped",
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Framework that produced a JUnit-shaped report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framework {
    JUnit,
    RobotFramework,
}

impl Framework {
    /// Robot framework encodes the suite hierarchy in suite names; the
    /// package of a case is the dot-joined chain of enclosing suite names.
    /// Classic JUnit never synthesizes a package from nesting.
    pub(crate) fn concatenates_suite_names(&self) -> bool {
        matches!(self, Framework::RobotFramework)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Framework::JUnit => "JUnit",
            Framework::RobotFramework => "Robot Framework",
        }
    }
}

/// Classification policy for the skipped marker of a test case. Two
/// deployments of the legacy converter disagreed on this, so the choice is
/// an explicit flag instead of a hardcoded behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkippedPolicy {
    /// The marker alone suffices, with or without content.
    MarkerPresence,
    /// The marker must carry text or CDATA; an empty marker is ignored and
    /// classification falls through to the error/failure check.
    NonEmptyMarker,
}

impl Default for SkippedPolicy {
    fn default() -> Self {
        SkippedPolicy::MarkerPresence
    }
}

/// Variation points of the assembled document: the descriptive-field triple
/// and the tag carrying the run records.
pub(crate) struct ResultLayout {
    pub test_level: &'static str,
    pub test_type: &'static str,
    pub framework: String,
    pub run_tag: &'static str,
}

/// Wraps mapped runs and build metadata into the canonical `test_result`
/// document shape shared by every converter.
pub(crate) fn assemble(
    build_context: &BuildContext,
    layout: ResultLayout,
    runs: Vec<Element>,
) -> Element {
    let mut build = Element::new();
    build.set_attr("server_id", build_context.server_id.as_str());
    build.set_attr("job_id", build_context.job_id.as_str());
    if let Some(job_name) = &build_context.job_name {
        build.set_attr("job_name", job_name.as_str());
    }
    build.set_attr("build_id", build_context.build_id.as_str());
    if let Some(build_name) = &build_context.build_name {
        build.set_attr("build_name", build_name.as_str());
    }
    if let Some(sub_type) = &build_context.sub_type {
        build.set_attr("sub_type", sub_type.as_str());
    }
    if let Some(artifact_id) = &build_context.artifact_id {
        build.set_attr("artifact_id", artifact_id.as_str());
    }

    let test_fields = Element::new()
        .with_child("test_field", test_field("Test_Level", layout.test_level))
        .with_child("test_field", test_field("Test_Type", layout.test_type))
        .with_child(
            "test_field",
            test_field("Framework", layout.framework.as_str()),
        );

    let mut test_runs = Element::new();
    test_runs
        .children
        .insert(layout.run_tag.to_owned(), OneOrMany::Many(runs));

    let result = Element::new()
        .with_child("build", build)
        .with_child("test_fields", test_fields)
        .with_child("test_runs", test_runs);

    Element::new().with_child("test_result", result)
}

fn test_field(kind: &str, value: &str) -> Element {
    Element::new().with_attr("type", kind).with_attr("value", value)
}

#[cfg(test)]
mod test {
    use super::*;

    fn build_context() -> BuildContext {
        BuildContext::builder()
            .server_id("serverId".to_string())
            .job_id("myJob".to_string())
            .build_id("123".to_string())
            .external_run_id(Some("run-9".to_string()))
            .build()
            .unwrap()
    }

    fn layout() -> ResultLayout {
        ResultLayout {
            test_level: "Unit Test",
            test_type: "Sanity",
            framework: "JUnit".to_string(),
            run_tag: "test_run",
        }
    }

    #[test]
    fn test_build_block_excludes_external_run_id() {
        let document = assemble(&build_context(), layout(), Vec::new());

        let build = document
            .first_child("test_result")
            .unwrap()
            .first_child("build")
            .unwrap();
        assert_eq!(build.attr("server_id"), Some("serverId"));
        assert_eq!(build.attr("job_id"), Some("myJob"));
        assert_eq!(build.attr("build_id"), Some("123"));
        assert!(build.attr("external_run_id").is_none());
    }

    #[test]
    fn test_optional_build_attributes_are_skipped_when_absent() {
        let document = assemble(&build_context(), layout(), Vec::new());

        let build = document
            .first_child("test_result")
            .unwrap()
            .first_child("build")
            .unwrap();
        assert!(build.attr("job_name").is_none());
        assert!(build.attr("sub_type").is_none());
        assert!(build.attr("artifact_id").is_none());
    }

    #[test]
    fn test_descriptive_field_triple() {
        let document = assemble(&build_context(), layout(), Vec::new());

        let fields: Vec<_> = document
            .first_child("test_result")
            .unwrap()
            .first_child("test_fields")
            .unwrap()
            .children_named("test_field")
            .iter()
            .map(|field| (field.attr("type").unwrap(), field.attr("value").unwrap()))
            .collect();
        assert_eq!(
            fields,
            vec![
                ("Test_Level", "Unit Test"),
                ("Test_Type", "Sanity"),
                ("Framework", "JUnit"),
            ]
        );
    }

    #[test]
    fn test_runs_land_under_the_layout_tag() {
        let runs = vec![Element::new().with_attr("name", "one")];
        let document = assemble(&build_context(), layout(), runs);

        let test_runs = document
            .first_child("test_result")
            .unwrap()
            .first_child("test_runs")
            .unwrap();
        assert_eq!(test_runs.children_named("test_run").len(), 1);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(RunStatus::Passed.to_string(), "Passed");
        assert_eq!(RunStatus::Failed.to_string(), "Failed");
        assert_eq!(RunStatus::Skipped.to_string(), "Skipped");
    }
}
