//! Domain errors for build configuration resolution and planning.

use std::path::PathBuf;

use thiserror::Error;

use super::models::Environment;

/// Errors raised while resolving or validating a pipeline configuration.
///
/// All of these surface at build start, before any asset is routed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error(
        "Unknown environment flag '{0}'. Expected one of: development, dev, production, prod, build"
    )]
    UnknownEnvironment(String),

    #[error("Environment flag is not set and no fallback environment is configured")]
    MissingEnvironment,

    #[error("No declaration entry '{key}' for environment {environment}")]
    MissingDeclaration { environment: Environment, key: String },

    #[error("Invalid file pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("Invalid output template '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },

    #[error("Duplicate route rule name: {0}")]
    DuplicateRule(String),

    #[error("Invalid dev server port: {0}. Must be between 1 and 65535")]
    InvalidPort(u32),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Errors raised while planning the output layout of a build.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("Transform '{step}' failed for {}: {reason}", asset.display())]
    AssetTransform {
        asset: PathBuf,
        step: String,
        reason: String,
    },

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to parse declaration file {}: {reason}", path.display())]
    Declaration { path: PathBuf, reason: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    pub(crate) fn transform(
        asset: impl Into<PathBuf>,
        step: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::AssetTransform {
            asset: asset.into(),
            step: step.into(),
            reason: reason.into(),
        }
    }

    /// Map an I/O error on `path`, turning `NotFound` into [`PipelineError::FileNotFound`].
    pub(crate) fn from_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound(path)
        } else {
            Self::Io { path, source }
        }
    }
}

pub type PipelineResult<T> = Result<T, PipelineError>;
