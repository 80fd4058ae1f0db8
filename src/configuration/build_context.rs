use config::{Config, ConfigError, File};
use serde_derive::Deserialize;
use std::path::PathBuf;

/// Identifiers tying a converted result to a specific CI server, job and
/// build. The converter copies these verbatim, no validation is performed.
#[derive(Debug, Clone, Deserialize, Builder)]
pub struct BuildContext {
    pub server_id: String,
    pub job_id: String,
    pub build_id: String,
    #[serde(default)]
    #[builder(default = "None")]
    pub job_name: Option<String>,
    #[serde(default)]
    #[builder(default = "None")]
    pub build_name: Option<String>,
    #[serde(default)]
    #[builder(default = "None")]
    pub sub_type: Option<String>,
    #[serde(default)]
    #[builder(default = "None")]
    pub artifact_id: Option<String>,
    #[serde(default)]
    #[builder(default = "None")]
    pub external_run_id: Option<String>,
}

impl BuildContext {
    pub fn builder() -> BuildContextBuilder {
        BuildContextBuilder::default()
    }

    pub fn from(file: PathBuf) -> Result<Self, ConfigError> {
        let mut config = Config::new();
        config.merge(File::from(file))?;
        config.try_into()
    }
}
