pub mod asset_router;
pub mod config_resolver;
pub mod define;
pub mod hashing;
pub mod html;
pub mod planner;

pub use asset_router::{AssetRouter, Emission, RouteDecision};
pub use config_resolver::ConfigResolver;
pub use define::DefineTable;
pub use html::{HtmlAssets, HtmlEmitter};
pub use planner::{Artifact, ArtifactKind, BuildPlan, BuildPlanner, InlinedAsset};
