//! Port trait definitions (Hexagonal Architecture)
//!
//! - DeclarationSource: where the per-environment declaration table comes from
//!
//! Infrastructure adapters implement these so the resolver stays free of I/O.

pub mod declaration_source;

pub use declaration_source::{DeclarationSource, InMemoryDeclarations};
