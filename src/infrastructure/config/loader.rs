use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use thiserror::Error;

use super::tool_config::ToolConfig;
use crate::domain::errors::ConfigurationError;
use crate::domain::models::PipelineDeclaration;
use crate::domain::models::output_template::MAX_HASH_LENGTH;

/// Project configuration file, relative to the project root
pub const CONFIG_FILE: &str = "packplan.yaml";
/// Untracked local overrides, relative to the project root
pub const LOCAL_CONFIG_FILE: &str = "packplan.local.yaml";
/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "PACKPLAN_";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Environment variable name cannot be empty")]
    EmptyEnvironmentVariable,

    #[error("At least one source directory must be configured")]
    NoSourceDirs,

    #[error(transparent)]
    Pipeline(#[from] ConfigurationError),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for the project rooted at `project`
    ///
    /// Precedence (lowest to highest):
    /// 1. `<project>/packplan.yaml`
    /// 2. `<project>/packplan.local.yaml` (optional local overrides)
    /// 3. Environment variables (`PACKPLAN_*` prefix, `__` for nesting)
    ///
    /// Built-in defaults are filled in by serde for keys no layer sets. Layers
    /// merge maps key by key, but a map declared in any layer replaces the
    /// built-in map entirely.
    pub fn load(project: impl AsRef<Path>) -> Result<ToolConfig> {
        let project = project.as_ref();
        let config: ToolConfig = Figment::new()
            .merge(Yaml::file(project.join(CONFIG_FILE)))
            .merge(Yaml::file(project.join(LOCAL_CONFIG_FILE)))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .with_context(|| {
                format!("Failed to load configuration for project {}", project.display())
            })?;

        Self::validate(&config)?;
        tracing::debug!(
            project = %project.display(),
            rules = config.pipeline.rules.len(),
            "configuration loaded"
        );
        Ok(config)
    }

    /// Load configuration from a specific file, without env overrides
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<ToolConfig> {
        let config: ToolConfig = Figment::new()
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .with_context(|| format!("Failed to load config from {}", path.as_ref().display()))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &ToolConfig) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        if config.environment_variable.trim().is_empty() {
            return Err(ConfigError::EmptyEnvironmentVariable);
        }

        if config.source_dirs.is_empty() {
            return Err(ConfigError::NoSourceDirs);
        }

        Self::validate_pipeline(&config.pipeline)?;
        Ok(())
    }

    /// Validate the pipeline declaration on its own
    pub fn validate_pipeline(pipeline: &PipelineDeclaration) -> Result<(), ConfigurationError> {
        let mut names = BTreeSet::new();
        for (category, rule) in pipeline.rules.iter() {
            if rule.name.trim().is_empty() {
                return Err(ConfigurationError::ValidationFailed(format!(
                    "{category} rule name cannot be empty"
                )));
            }
            if !names.insert(rule.name.as_str()) {
                return Err(ConfigurationError::DuplicateRule(rule.name.clone()));
            }
        }

        if pipeline.dev_server.port == 0 {
            return Err(ConfigurationError::InvalidPort(0));
        }

        let length = pipeline.hashing.default_length;
        if length == 0 || length > MAX_HASH_LENGTH {
            return Err(ConfigurationError::ValidationFailed(format!(
                "hashing.default_length {length} must be between 1 and {MAX_HASH_LENGTH}"
            )));
        }

        if pipeline.output.root.as_os_str().is_empty() {
            return Err(ConfigurationError::ValidationFailed(
                "output.root cannot be empty".to_string(),
            ));
        }

        if pipeline.output.chunk_name.trim().is_empty() {
            return Err(ConfigurationError::ValidationFailed(
                "output.chunk_name cannot be empty".to_string(),
            ));
        }

        if pipeline.html.filename.trim().is_empty() {
            return Err(ConfigurationError::ValidationFailed(
                "html.filename cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}
