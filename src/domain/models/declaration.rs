//! Static declaration table: per-environment template variables and defines.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::environment::Environment;
use crate::domain::errors::ConfigurationError;

/// Variables substituted into the HTML template, keyed by name.
pub type TemplateVariables = BTreeMap<String, serde_json::Value>;

/// Identifier to code-literal replacements for in-bundle substitution.
pub type DefineEntries = BTreeMap<String, String>;

/// One entry of the declaration table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EnvironmentDeclaration {
    #[serde(default)]
    pub template: TemplateVariables,

    /// Defines layered over the pipeline's global defines.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub define: DefineEntries,
}

/// Mapping from declaration key (`dev`, `build`) to its entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeclarationTable {
    entries: BTreeMap<String, EnvironmentDeclaration>,
}

impl DeclarationTable {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, entry: EnvironmentDeclaration) -> Self {
        self.entries.insert(key.into(), entry);
        self
    }

    pub fn get(&self, key: &str) -> Option<&EnvironmentDeclaration> {
        self.entries.get(key)
    }

    /// Entry for `environment`, or [`ConfigurationError::MissingDeclaration`].
    pub fn for_environment(
        &self,
        environment: Environment,
    ) -> Result<&EnvironmentDeclaration, ConfigurationError> {
        let key = environment.declaration_key();
        self.entries
            .get(key)
            .ok_or_else(|| ConfigurationError::MissingDeclaration {
                environment,
                key: key.to_string(),
            })
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TABLE: &str = r#"
dev:
  template:
    title: Hello dev
    header: false
build:
  template:
    title: Hello build
    header: //cdn.example.com/header.js
  define:
    API_URL: '"https://api.example.com"'
"#;

    #[test]
    fn test_parse_table() {
        let table: DeclarationTable = serde_yaml::from_str(TABLE).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.keys().collect::<Vec<_>>(), vec!["build", "dev"]);

        let dev = table.for_environment(Environment::Development).unwrap();
        assert_eq!(dev.template["title"], json!("Hello dev"));
        assert_eq!(dev.template["header"], json!(false));
        assert!(dev.define.is_empty());

        let build = table.for_environment(Environment::Production).unwrap();
        assert_eq!(build.define["API_URL"], "\"https://api.example.com\"");
    }

    #[test]
    fn test_missing_entry() {
        let table = DeclarationTable::new().with_entry("dev", EnvironmentDeclaration::default());
        let err = table.for_environment(Environment::Production).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::MissingDeclaration {
                environment: Environment::Production,
                key: "build".to_string(),
            }
        );
    }
}
