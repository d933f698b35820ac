//! Project filesystem access.

pub mod scanner;

pub use scanner::{read_project_file, ProjectScanner};
