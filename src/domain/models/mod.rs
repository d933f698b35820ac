pub mod asset;
pub mod config;
pub mod declaration;
pub mod environment;
pub mod output_template;
pub mod pattern;
pub mod route;

pub use asset::SourceAsset;
pub use config::{
    ClientLogLevel, Configuration, CopyPattern, CssDeclaration, CssOptions, DevServerConfig,
    HashPolicy, HtmlMinify, HtmlOptions, OutputConfig, PipelineDeclaration, PluginOptions,
    ProvideTarget, ResolveConfig, SourceMap, StatsPreset,
};
pub use declaration::{DeclarationTable, DefineEntries, EnvironmentDeclaration, TemplateVariables};
pub use environment::{Environment, PerEnvironment};
pub use output_template::{OutputTemplate, TemplateContext};
pub use pattern::{FilePattern, PatternSource};
pub use route::{AssetCategory, Destination, RouteRule, RuleSet, TransformStep};
