use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::errors::{PipelineError, PipelineResult};
use crate::domain::models::DeclarationTable;
use crate::domain::ports::DeclarationSource;

/// Declaration table stored in a YAML file (or JSON, by extension).
///
/// ```yaml
/// dev:
///   template:
///     title: My page
///     header: false
/// build:
///   template:
///     title: My page
///     header: //cdn.example.com/header.js
///   define:
///     API_URL: '"https://api.example.com"'
/// ```
#[derive(Debug, Clone)]
pub struct DeclarationFile {
    path: PathBuf,
}

impl DeclarationFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_json(&self) -> bool {
        self.path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    }
}

impl DeclarationSource for DeclarationFile {
    fn load(&self) -> PipelineResult<DeclarationTable> {
        let raw = fs::read_to_string(&self.path)
            .map_err(|e| PipelineError::from_io(&self.path, e))?;

        let parsed: Result<DeclarationTable, String> = if self.is_json() {
            serde_json::from_str(&raw).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str(&raw).map_err(|e| e.to_string())
        };
        let table = parsed.map_err(|reason| PipelineError::Declaration {
            path: self.path.clone(),
            reason,
        })?;

        tracing::debug!(
            path = %self.path.display(),
            entries = table.len(),
            "declaration table loaded"
        );
        Ok(table)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
