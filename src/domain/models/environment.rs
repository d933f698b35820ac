use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::errors::ConfigurationError;

/// Build environment the pipeline is resolved for.
///
/// Chosen once per process from an external flag and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Local development: source maps, hot reload, dev template.
    Development,
    /// Release build: build template, no eval source maps.
    Production,
}

impl Environment {
    /// All environments, in declaration order.
    pub const ALL: [Self; 2] = [Self::Development, Self::Production];

    /// Parse an environment flag as read from the process environment.
    ///
    /// Returns `Ok(None)` for an unset or blank flag so the caller can apply
    /// its own fallback policy.
    pub fn from_flag(flag: Option<&str>) -> Result<Option<Self>, ConfigurationError> {
        match flag.map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => value.parse().map(Some),
        }
    }

    /// Key of this environment in the static declaration table.
    pub const fn declaration_key(self) -> &'static str {
        match self {
            Self::Development => "dev",
            Self::Production => "build",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }

    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" | "build" => Ok(Self::Production),
            _ => Err(ConfigurationError::UnknownEnvironment(s.to_string())),
        }
    }
}

/// A value declared separately for every [`Environment`].
///
/// Lookup is an exhaustive match, so adding an environment forces every
/// conditional option to declare a value for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerEnvironment<T> {
    pub development: T,
    pub production: T,
}

impl<T> PerEnvironment<T> {
    pub const fn new(development: T, production: T) -> Self {
        Self {
            development,
            production,
        }
    }

    pub const fn select(&self, environment: Environment) -> &T {
        match environment {
            Environment::Development => &self.development,
            Environment::Production => &self.production,
        }
    }
}

impl<T: Clone> PerEnvironment<T> {
    /// Same value in every environment.
    pub fn uniform(value: T) -> Self {
        Self {
            development: value.clone(),
            production: value,
        }
    }
}
