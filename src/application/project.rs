use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::models::{Configuration, SourceAsset};
use crate::domain::ports::DeclarationSource;
use crate::infrastructure::config::{ConfigLoader, ToolConfig};
use crate::infrastructure::declarations::DeclarationFile;
use crate::infrastructure::fs::{read_project_file, ProjectScanner};
use crate::services::{BuildPlan, BuildPlanner, ConfigResolver};

/// A project directory together with its loaded tool configuration.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    config: ToolConfig,
}

impl Project {
    /// Load `packplan.yaml` (and overrides) from `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let config = ConfigLoader::load(&root)?;
        Ok(Self { root, config })
    }

    pub fn with_config(root: impl Into<PathBuf>, config: ToolConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub const fn config(&self) -> &ToolConfig {
        &self.config
    }

    pub fn declaration_source(&self) -> DeclarationFile {
        DeclarationFile::new(self.root.join(&self.config.declarations_file))
    }

    pub fn resolver(&self) -> Result<ConfigResolver> {
        let source = self.declaration_source();
        let resolver = ConfigResolver::from_source(self.config.pipeline.clone(), &source)
            .with_context(|| format!("Failed to load declarations from {}", source.describe()))?;
        Ok(resolver.with_unset_fallback(self.config.unset_environment))
    }

    /// Resolve with an explicit flag, or read the configured variable when `None`.
    pub fn resolve(&self, flag: Option<&str>) -> Result<Configuration> {
        let resolver = self.resolver()?;
        let configuration = match flag {
            Some(flag) => resolver.resolve(Some(flag)),
            None => resolver.resolve_from_env(&self.config.environment_variable),
        };
        configuration.context("Failed to resolve build configuration")
    }

    pub fn scan(&self) -> Result<Vec<SourceAsset>> {
        ProjectScanner::new(&self.root, self.config.source_dirs.iter().cloned())
            .scan()
            .context("Failed to scan project sources")
    }

    pub fn html_template(&self, configuration: &Configuration) -> Result<String> {
        let template = &configuration.plugins.html.template;
        read_project_file(&self.root, template)
            .with_context(|| format!("Failed to read HTML template {}", template.display()))
    }

    /// Scan the project and plan the build, including the HTML entry.
    pub fn plan(&self, configuration: &Configuration) -> Result<BuildPlan> {
        let assets = self.scan()?;
        let template = self.html_template(configuration)?;
        BuildPlanner::new(configuration)
            .plan(&assets, Some(&template))
            .context("Failed to plan build")
    }
}
