//! File-backed declaration tables.

pub mod file_source;

pub use file_source::DeclarationFile;
