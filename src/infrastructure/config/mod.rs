//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment:
//! - YAML project file and local overrides
//! - Environment variable overrides
//! - Validation of the pipeline declaration

pub mod loader;
pub mod tool_config;

pub use loader::{ConfigError, ConfigLoader};
pub use tool_config::ToolConfig;
