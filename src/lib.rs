//! Packplan - asset pipeline configuration resolver
//!
//! Packplan resolves a declarative, environment-conditional build pipeline into
//! one concrete configuration and plans the output layout an external bundler
//! will produce from it: which rule handles each source file, the hashed names
//! of bundles, stylesheets and assets, inlined data URIs, copied files and the
//! rendered HTML entry page.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Pipeline declaration, environments, route rules and errors
//! - **Service Layer** (`services`): Resolution, routing, hashing, defines and HTML emission
//! - **Infrastructure Layer** (`infrastructure`): figment config, declaration files, scanning, logging
//! - **Application Layer** (`application`): Use cases over a project directory
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```no_run
//! use packplan::application::Project;
//!
//! fn main() -> anyhow::Result<()> {
//!     let project = Project::open("demos/site")?;
//!     let configuration = project.resolve(Some("production"))?;
//!     let plan = project.plan(&configuration)?;
//!     println!("{} artifacts", plan.artifacts.len());
//!     Ok(())
//! }
//! ```

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use application::Project;
pub use domain::errors::{ConfigurationError, PipelineError, PipelineResult};
pub use domain::models::{
    Configuration, DeclarationTable, Destination, Environment, FilePattern, OutputTemplate,
    PipelineDeclaration, RouteRule, RuleSet, SourceAsset, TemplateVariables,
};
pub use domain::ports::DeclarationSource;
pub use infrastructure::config::{ConfigError, ConfigLoader, ToolConfig};
pub use services::{AssetRouter, BuildPlan, BuildPlanner, ConfigResolver, DefineTable, HtmlEmitter};
