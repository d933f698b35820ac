//! Infrastructure layer module
//!
//! Adapters between the pure domain and the outside world:
//! - Configuration management (figment)
//! - Declaration tables read from YAML or JSON files
//! - Project filesystem scanning
//! - Logging infrastructure
//!
//! Infrastructure implementations satisfy the port traits defined in the domain layer.

pub mod config;
pub mod declarations;
pub mod fs;
pub mod logging;
