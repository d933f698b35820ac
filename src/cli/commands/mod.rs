//! CLI command implementations.

pub mod define;
pub mod html;
pub mod plan;
pub mod resolve;
pub mod route;
