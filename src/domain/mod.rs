//! Domain layer for build configuration resolution
//!
//! This module contains the pipeline data model, the error taxonomy and the
//! ports the infrastructure layer implements.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{ConfigurationError, PipelineError, PipelineResult};
