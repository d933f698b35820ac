//! File patterns used to route source paths to rules.

use std::fmt;
use std::path::Path;

use glob::{MatchOptions, Pattern};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::errors::ConfigurationError;

/// Declared form of a pattern, as written in configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternSource {
    /// Regular expression searched anywhere in the path unless anchored.
    Regex(String),
    /// Shell glob matched against the whole relative path.
    Glob(String),
}

#[derive(Clone)]
enum Matcher {
    Regex(Regex),
    Glob(Pattern),
}

const GLOB_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// A compiled file pattern.
///
/// Paths are matched in `/`-separated form regardless of platform.
/// Two patterns are equal when their declared sources are equal.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "PatternSource", into = "PatternSource")]
pub struct FilePattern {
    source: PatternSource,
    matcher: Matcher,
}

impl FilePattern {
    pub fn regex(pattern: &str) -> Result<Self, ConfigurationError> {
        Self::try_from(PatternSource::Regex(pattern.to_string()))
    }

    pub fn glob(pattern: &str) -> Result<Self, ConfigurationError> {
        Self::try_from(PatternSource::Glob(pattern.to_string()))
    }

    pub const fn source(&self) -> &PatternSource {
        &self.source
    }

    pub fn is_match(&self, path: &Path) -> bool {
        let normalized = normalize_path(path);
        match &self.matcher {
            Matcher::Regex(re) => re.is_match(&normalized),
            Matcher::Glob(pattern) => pattern.matches_with(&normalized, GLOB_OPTIONS),
        }
    }
}

/// Render a path with `/` separators for matching and display.
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

impl TryFrom<PatternSource> for FilePattern {
    type Error = ConfigurationError;

    fn try_from(source: PatternSource) -> Result<Self, Self::Error> {
        let matcher = match &source {
            PatternSource::Regex(raw) => Regex::new(raw).map(Matcher::Regex).map_err(|e| {
                ConfigurationError::InvalidPattern {
                    pattern: raw.clone(),
                    reason: e.to_string(),
                }
            })?,
            PatternSource::Glob(raw) => Pattern::new(raw).map(Matcher::Glob).map_err(|e| {
                ConfigurationError::InvalidPattern {
                    pattern: raw.clone(),
                    reason: e.to_string(),
                }
            })?,
        };
        Ok(Self { source, matcher })
    }
}

impl From<FilePattern> for PatternSource {
    fn from(pattern: FilePattern) -> Self {
        pattern.source
    }
}

impl PartialEq for FilePattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for FilePattern {}

impl fmt::Debug for FilePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FilePattern").field(&self.source).finish()
    }
}

impl fmt::Display for FilePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            PatternSource::Regex(raw) => write!(f, "/{raw}/"),
            PatternSource::Glob(raw) => f.write_str(raw),
        }
    }
}
