use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::output_template::OutputTemplate;
use super::pattern::FilePattern;

/// Category a route rule belongs to. Groups are evaluated in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetCategory {
    Scripts,
    Stylesheets,
    Media,
}

impl AssetCategory {
    pub const ALL: [Self; 3] = [Self::Scripts, Self::Stylesheets, Self::Media];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scripts => "scripts",
            Self::Stylesheets => "stylesheets",
            Self::Media => "media",
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named step in a rule's transform chain.
///
/// Steps are executed by the external build tool; here they are only carried
/// through to the plan in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformStep {
    pub loader: String,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub options: serde_json::Map<String, serde_json::Value>,
}

impl TransformStep {
    pub fn new(loader: impl Into<String>) -> Self {
        Self {
            loader: loader.into(),
            options: serde_json::Map::new(),
        }
    }

    #[must_use]
    pub fn with_option(mut self, key: &str, value: serde_json::Value) -> Self {
        self.options.insert(key.to_string(), value);
        self
    }
}

/// Where files matched by a rule end up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Destination {
    /// Joined into the script bundle named by `output.filename`.
    Bundle,
    /// Joined into one extracted file named by `filename`.
    Extract { filename: OutputTemplate },
    /// Emitted per file as `output_path/name`, or inlined when small enough.
    Asset {
        name: OutputTemplate,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        output_path: Option<String>,
        /// Files of at most this many bytes are inlined as `data:` URIs.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        inline_limit: Option<u64>,
    },
}

/// Declarative mapping from a file pattern to a transform chain and destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRule {
    pub name: String,
    pub test: FilePattern,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<FilePattern>,
    #[serde(default)]
    pub transforms: Vec<TransformStep>,
    pub destination: Destination,
}

impl RouteRule {
    /// Whether this rule applies to `path`: `test` matches and `exclude` does not.
    pub fn applies_to(&self, path: &Path) -> bool {
        self.test.is_match(path) && !self.exclude.as_ref().is_some_and(|ex| ex.is_match(path))
    }

    pub fn loader_names(&self) -> Vec<String> {
        self.transforms.iter().map(|t| t.loader.clone()).collect()
    }
}

/// Ordered route rules, grouped by category.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RuleSet {
    #[serde(default)]
    pub scripts: Vec<RouteRule>,
    #[serde(default)]
    pub stylesheets: Vec<RouteRule>,
    #[serde(default)]
    pub media: Vec<RouteRule>,
}

impl RuleSet {
    pub fn group(&self, category: AssetCategory) -> &[RouteRule] {
        match category {
            AssetCategory::Scripts => &self.scripts,
            AssetCategory::Stylesheets => &self.stylesheets,
            AssetCategory::Media => &self.media,
        }
    }

    /// All rules in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = (AssetCategory, &RouteRule)> {
        AssetCategory::ALL
            .into_iter()
            .flat_map(move |category| self.group(category).iter().map(move |r| (category, r)))
    }

    /// First rule that applies to `path`, in category order then declaration order.
    pub fn first_match(&self, path: &Path) -> Option<(AssetCategory, &RouteRule)> {
        self.iter().find(|(_, rule)| rule.applies_to(path))
    }

    pub fn len(&self) -> usize {
        self.scripts.len() + self.stylesheets.len() + self.media.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
