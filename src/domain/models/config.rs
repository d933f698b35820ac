use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::declaration::{DefineEntries, TemplateVariables};
use super::environment::{Environment, PerEnvironment};
use super::output_template::OutputTemplate;
use super::pattern::FilePattern;
use super::route::{Destination, RouteRule, RuleSet, TransformStep};

/// Declared pipeline, before an environment is chosen.
///
/// Options that differ between environments are [`PerEnvironment`] values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PipelineDeclaration {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub resolve: ResolveConfig,

    #[serde(default = "default_rules")]
    pub rules: RuleSet,

    #[serde(default)]
    pub html: HtmlOptions,

    #[serde(default)]
    pub css: CssDeclaration,

    /// Remove stale files from the output root before emitting
    #[serde(default = "default_true")]
    pub clean_output: bool,

    #[serde(default = "default_copy_patterns")]
    pub copy: Vec<CopyPattern>,

    /// Globals made available to every module without an import
    #[serde(default = "default_provide")]
    pub provide: BTreeMap<String, ProvideTarget>,

    /// Global in-bundle defines, overlaid by the active declaration entry
    #[serde(default = "default_define")]
    pub define: DefineEntries,

    #[serde(default = "default_hot_module_replacement")]
    pub hot_module_replacement: PerEnvironment<bool>,

    #[serde(default)]
    pub hashing: HashPolicy,

    #[serde(default = "default_source_map")]
    pub source_map: PerEnvironment<SourceMap>,

    #[serde(default)]
    pub dev_server: DevServerConfig,
}

impl Default for PipelineDeclaration {
    fn default() -> Self {
        Self {
            output: OutputConfig::default(),
            resolve: ResolveConfig::default(),
            rules: default_rules(),
            html: HtmlOptions::default(),
            css: CssDeclaration::default(),
            clean_output: true,
            copy: default_copy_patterns(),
            provide: default_provide(),
            define: default_define(),
            hot_module_replacement: default_hot_module_replacement(),
            hashing: HashPolicy::default(),
            source_map: default_source_map(),
            dev_server: DevServerConfig::default(),
        }
    }
}

/// Fully resolved configuration for one environment.
///
/// Built once at startup by the resolver and passed by reference to every
/// consumer. Never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Configuration {
    pub environment: Environment,
    pub output: OutputConfig,
    pub resolve: ResolveConfig,
    pub rules: RuleSet,
    pub plugins: PluginOptions,
    pub hashing: HashPolicy,
    pub source_map: SourceMap,
    pub dev_server: DevServerConfig,
    pub template_variables: TemplateVariables,
}

/// Plugin-level options after environment selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PluginOptions {
    pub html: HtmlOptions,
    pub css: CssOptions,
    pub clean_output: bool,
    pub copy: Vec<CopyPattern>,
    pub provide: BTreeMap<String, ProvideTarget>,
    pub define: DefineEntries,
    pub hot_module_replacement: bool,
}

/// Output location and naming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OutputConfig {
    /// Directory all artifacts are written under
    #[serde(default = "default_output_root")]
    pub root: PathBuf,

    /// Script bundle file name
    #[serde(default = "default_bundle_filename")]
    pub filename: OutputTemplate,

    /// URL prefix artifacts are served from
    #[serde(default = "default_public_path")]
    pub public_path: String,

    /// Name of the entry chunk, substituted for `[name]` in bundle templates
    #[serde(default = "default_chunk_name")]
    pub chunk_name: String,
}

fn default_output_root() -> PathBuf {
    PathBuf::from("dist")
}

fn default_bundle_filename() -> OutputTemplate {
    builtin_template("bundle.[hash:6].js")
}

fn default_public_path() -> String {
    "/".to_string()
}

fn default_chunk_name() -> String {
    "main".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: default_output_root(),
            filename: default_bundle_filename(),
            public_path: default_public_path(),
            chunk_name: default_chunk_name(),
        }
    }
}

/// Module resolution hints, passed through to the bundler untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ResolveConfig {
    #[serde(default = "default_resolve_modules")]
    pub modules: Vec<String>,

    #[serde(default = "default_resolve_alias")]
    pub alias: BTreeMap<String, String>,

    #[serde(default = "default_resolve_extensions")]
    pub extensions: Vec<String>,
}

fn default_resolve_modules() -> Vec<String> {
    vec!["./src/components".to_string(), "node_modules".to_string()]
}

fn default_resolve_alias() -> BTreeMap<String, String> {
    BTreeMap::from([(
        "react-native".to_string(),
        "@my/react-native-web".to_string(),
    )])
}

fn default_resolve_extensions() -> Vec<String> {
    vec![".web.js".to_string(), ".js".to_string()]
}

impl Default for ResolveConfig {
    fn default() -> Self {
        Self {
            modules: default_resolve_modules(),
            alias: default_resolve_alias(),
            extensions: default_resolve_extensions(),
        }
    }
}

/// HTML entry emission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HtmlOptions {
    /// Template path, relative to the project root
    #[serde(default = "default_html_template")]
    pub template: PathBuf,

    /// Output file name, relative to the output root
    #[serde(default = "default_html_filename")]
    pub filename: String,

    /// Insert stylesheet and script tags for the emitted bundles
    #[serde(default = "default_true")]
    pub inject: bool,

    #[serde(default)]
    pub minify: HtmlMinify,
}

fn default_html_template() -> PathBuf {
    PathBuf::from("public/index.html")
}

fn default_html_filename() -> String {
    "index.html".to_string()
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            template: default_html_template(),
            filename: default_html_filename(),
            inject: true,
            minify: HtmlMinify::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HtmlMinify {
    #[serde(default)]
    pub remove_attribute_quotes: bool,
    #[serde(default)]
    pub collapse_whitespace: bool,
}

/// Stylesheet extraction options, per environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CssDeclaration {
    #[serde(default = "default_css_minify")]
    pub minify: PerEnvironment<bool>,

    #[serde(default = "default_css_hot_reload")]
    pub hot_reload: PerEnvironment<bool>,
}

fn default_css_minify() -> PerEnvironment<bool> {
    PerEnvironment::uniform(true)
}

fn default_css_hot_reload() -> PerEnvironment<bool> {
    PerEnvironment::new(true, false)
}

impl Default for CssDeclaration {
    fn default() -> Self {
        Self {
            minify: default_css_minify(),
            hot_reload: default_css_hot_reload(),
        }
    }
}

impl CssDeclaration {
    pub fn select(&self, environment: Environment) -> CssOptions {
        CssOptions {
            minify: *self.minify.select(environment),
            hot_reload: *self.hot_reload.select(environment),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CssOptions {
    pub minify: bool,
    pub hot_reload: bool,
}

/// Files copied verbatim into the output root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CopyPattern {
    /// Source files, relative to the project root
    pub from: FilePattern,

    /// Destination directory, relative to the output root
    #[serde(default)]
    pub to: String,

    /// Drop source directories, keeping only file names
    #[serde(default)]
    pub flatten: bool,

    /// File name patterns to skip
    #[serde(default)]
    pub ignore: Vec<FilePattern>,
}

fn default_copy_patterns() -> Vec<CopyPattern> {
    vec![CopyPattern {
        from: builtin_pattern(FilePattern::glob, "static/js/*.js"),
        to: "js".to_string(),
        flatten: true,
        ignore: vec![builtin_pattern(FilePattern::glob, "other.js")],
    }]
}

/// Module export bound to a provided global.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvideTarget {
    pub module: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export: Option<String>,
}

impl ProvideTarget {
    fn module(module: &str) -> Self {
        Self {
            module: module.to_string(),
            export: None,
        }
    }

    fn export(module: &str, export: &str) -> Self {
        Self {
            module: module.to_string(),
            export: Some(export.to_string()),
        }
    }
}

fn default_provide() -> BTreeMap<String, ProvideTarget> {
    BTreeMap::from([
        ("React".to_string(), ProvideTarget::module("react")),
        ("Component".to_string(), ProvideTarget::export("react", "Component")),
        ("Vue".to_string(), ProvideTarget::export("vue/dist/vue.esm.js", "default")),
        ("$".to_string(), ProvideTarget::module("jquery")),
        ("_map".to_string(), ProvideTarget::export("lodash", "map")),
    ])
}

fn default_define() -> DefineEntries {
    BTreeMap::from([
        ("DEV".to_string(), "\"dev\"".to_string()),
        ("FLAG".to_string(), "true".to_string()),
    ])
}

fn default_hot_module_replacement() -> PerEnvironment<bool> {
    PerEnvironment::new(true, false)
}

/// How hashes in output names are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct HashPolicy {
    /// Length of `[hash]` and `[contenthash]` when no length is given
    #[serde(default = "default_hash_length")]
    pub default_length: usize,
}

const fn default_hash_length() -> usize {
    20
}

impl Default for HashPolicy {
    fn default() -> Self {
        Self {
            default_length: default_hash_length(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceMap {
    None,
    Eval,
    CheapModuleEvalSourceMap,
    SourceMap,
    HiddenSourceMap,
}

fn default_source_map() -> PerEnvironment<SourceMap> {
    PerEnvironment::new(SourceMap::CheapModuleEvalSourceMap, SourceMap::None)
}

/// Terminal output preset of the dev server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatsPreset {
    ErrorsOnly,
    Minimal,
    Normal,
    Verbose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientLogLevel {
    Silent,
    Error,
    Warning,
    Info,
}

/// Dev server settings, handed to the external server as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct DevServerConfig {
    #[serde(default = "default_dev_host")]
    pub host: String,

    #[serde(default = "default_dev_port")]
    pub port: u16,

    /// gzip responses
    #[serde(default = "default_true")]
    pub compress: bool,

    #[serde(default = "default_true")]
    pub hot: bool,

    #[serde(default = "default_true")]
    pub inline: bool,

    #[serde(default)]
    pub quiet: bool,

    #[serde(default)]
    pub overlay: bool,

    #[serde(default = "default_stats")]
    pub stats: StatsPreset,

    #[serde(default = "default_client_log_level")]
    pub client_log_level: ClientLogLevel,
}

fn default_dev_host() -> String {
    "localhost".to_string()
}

const fn default_dev_port() -> u16 {
    3001
}

const fn default_stats() -> StatsPreset {
    StatsPreset::ErrorsOnly
}

const fn default_client_log_level() -> ClientLogLevel {
    ClientLogLevel::Silent
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            host: default_dev_host(),
            port: default_dev_port(),
            compress: true,
            hot: true,
            inline: true,
            quiet: false,
            overlay: false,
            stats: default_stats(),
            client_log_level: default_client_log_level(),
        }
    }
}

const fn default_true() -> bool {
    true
}

fn default_rules() -> RuleSet {
    let node_modules = || Some(builtin_pattern(FilePattern::regex, "node_modules"));

    RuleSet {
        scripts: vec![RouteRule {
            name: "scripts".to_string(),
            test: builtin_pattern(FilePattern::regex, r"\.jsx?$"),
            exclude: node_modules(),
            transforms: vec![TransformStep::new("babel-loader")
                .with_option("presets", json!(["@babel/preset-env"]))
                .with_option(
                    "plugins",
                    json!([
                        ["@babel/plugin-transform-runtime", { "corejs": 3 }],
                        "@babel/plugin-syntax-dynamic-import"
                    ]),
                )],
            destination: Destination::Bundle,
        }],
        stylesheets: vec![RouteRule {
            name: "stylesheets".to_string(),
            test: builtin_pattern(FilePattern::regex, r"\.(s[ac]|c)ss$"),
            exclude: node_modules(),
            transforms: vec![
                TransformStep::new("mini-css-extract").with_option("reload_all", json!(true)),
                TransformStep::new("css-loader"),
                TransformStep::new("postcss-loader")
                    .with_option("plugins", json!(["autoprefixer"])),
                TransformStep::new("sass-loader").with_option("implementation", json!("sass")),
            ],
            destination: Destination::Extract {
                filename: builtin_template("css/[name].[hash:6].css"),
            },
        }],
        media: vec![RouteRule {
            name: "media".to_string(),
            test: builtin_pattern(
                FilePattern::regex,
                r"\.(png|jpg|gif|jpeg|webp|svg|eot|ttf|woff|woff2)$",
            ),
            exclude: node_modules(),
            transforms: vec![TransformStep::new("url-loader")],
            destination: Destination::Asset {
                name: builtin_template("[name]_[hash:6].[ext]"),
                output_path: Some("assets".to_string()),
                inline_limit: Some(1024),
            },
        }],
    }
}

#[allow(clippy::expect_used)]
fn builtin_pattern(
    build: fn(&str) -> Result<FilePattern, crate::domain::errors::ConfigurationError>,
    raw: &str,
) -> FilePattern {
    build(raw).expect("built-in file pattern must compile")
}

#[allow(clippy::expect_used)]
fn builtin_template(raw: &str) -> OutputTemplate {
    OutputTemplate::parse(raw).expect("built-in output template must parse")
}
