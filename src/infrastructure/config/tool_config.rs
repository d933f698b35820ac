use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::models::{Environment, PipelineDeclaration};
use crate::infrastructure::logging::LogConfig;

/// Settings of the planner itself, as read from `packplan.yaml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolConfig {
    #[serde(default)]
    pub logging: LogConfig,

    /// Process variable holding the environment flag
    #[serde(default = "default_environment_variable")]
    pub environment_variable: String,

    /// Environment used when the flag is unset; `None` makes that an error
    #[serde(default = "default_unset_environment")]
    pub unset_environment: Option<Environment>,

    /// Declaration table, relative to the project root
    #[serde(default = "default_declarations_file")]
    pub declarations_file: PathBuf,

    /// Directories scanned for source assets, relative to the project root
    #[serde(default = "default_source_dirs")]
    pub source_dirs: Vec<PathBuf>,

    #[serde(default)]
    pub pipeline: PipelineDeclaration,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            logging: LogConfig::default(),
            environment_variable: default_environment_variable(),
            unset_environment: default_unset_environment(),
            declarations_file: default_declarations_file(),
            source_dirs: default_source_dirs(),
            pipeline: PipelineDeclaration::default(),
        }
    }
}

fn default_environment_variable() -> String {
    "NODE_ENV".to_string()
}

const fn default_unset_environment() -> Option<Environment> {
    Some(Environment::Production)
}

fn default_declarations_file() -> PathBuf {
    PathBuf::from("public/config.yaml")
}

fn default_source_dirs() -> Vec<PathBuf> {
    vec![PathBuf::from("src"), PathBuf::from("static")]
}
