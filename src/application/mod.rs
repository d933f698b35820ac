//! Application layer: use cases over a project directory.

pub mod project;

pub use project::Project;
