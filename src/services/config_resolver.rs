//! Environment-keyed configuration resolution.
//!
//! `ConfigResolver` turns a pipeline declaration plus the static declaration
//! table into a [`Configuration`] for exactly one environment. Resolution is
//! pure: the same flag always yields the same value, and a failure never
//! yields a partial configuration.

use std::env::{self, VarError};

use crate::domain::errors::{ConfigurationError, PipelineResult};
use crate::domain::models::{
    Configuration, DeclarationTable, Environment, PipelineDeclaration, PluginOptions,
};
use crate::domain::ports::DeclarationSource;

/// Resolves the active configuration from an environment flag.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    pipeline: PipelineDeclaration,
    declarations: DeclarationTable,
    unset_fallback: Option<Environment>,
}

impl ConfigResolver {
    /// Create a resolver that treats an unset flag as production.
    pub const fn new(pipeline: PipelineDeclaration, declarations: DeclarationTable) -> Self {
        Self {
            pipeline,
            declarations,
            unset_fallback: Some(Environment::Production),
        }
    }

    /// Create a resolver over the table `source` provides, read once.
    pub fn from_source(
        pipeline: PipelineDeclaration,
        source: &dyn DeclarationSource,
    ) -> PipelineResult<Self> {
        let declarations = source.load()?;
        tracing::debug!(
            source = %source.describe(),
            entries = declarations.len(),
            "declarations loaded"
        );
        Ok(Self::new(pipeline, declarations))
    }

    /// Environment used when the flag is unset; `None` makes an unset flag an error.
    #[must_use]
    pub fn with_unset_fallback(mut self, fallback: Option<Environment>) -> Self {
        self.unset_fallback = fallback;
        self
    }

    pub const fn pipeline(&self) -> &PipelineDeclaration {
        &self.pipeline
    }

    pub const fn declarations(&self) -> &DeclarationTable {
        &self.declarations
    }

    /// Pick the environment a raw flag selects.
    pub fn environment_for(&self, flag: Option<&str>) -> Result<Environment, ConfigurationError> {
        match Environment::from_flag(flag)? {
            Some(environment) => Ok(environment),
            None => self
                .unset_fallback
                .ok_or(ConfigurationError::MissingEnvironment),
        }
    }

    /// Resolve the configuration selected by `flag`.
    pub fn resolve(&self, flag: Option<&str>) -> Result<Configuration, ConfigurationError> {
        let environment = self.environment_for(flag)?;
        self.resolve_environment(environment)
    }

    /// Read `variable` from the process environment and resolve it.
    ///
    /// A value that is not valid UTF-8 is an unknown flag, not an unset one.
    pub fn resolve_from_env(&self, variable: &str) -> Result<Configuration, ConfigurationError> {
        let flag = match env::var(variable) {
            Ok(flag) => Some(flag),
            Err(VarError::NotPresent) => None,
            Err(VarError::NotUnicode(raw)) => {
                return Err(ConfigurationError::UnknownEnvironment(
                    raw.to_string_lossy().into_owned(),
                ));
            }
        };
        tracing::debug!(variable, flag = ?flag, "read environment flag");
        self.resolve(flag.as_deref())
    }

    pub fn resolve_environment(
        &self,
        environment: Environment,
    ) -> Result<Configuration, ConfigurationError> {
        let entry = self.declarations.for_environment(environment)?;
        let pipeline = &self.pipeline;

        let mut define = pipeline.define.clone();
        define.extend(entry.define.iter().map(|(k, v)| (k.clone(), v.clone())));

        let configuration = Configuration {
            environment,
            output: pipeline.output.clone(),
            resolve: pipeline.resolve.clone(),
            rules: pipeline.rules.clone(),
            plugins: PluginOptions {
                html: pipeline.html.clone(),
                css: pipeline.css.select(environment),
                clean_output: pipeline.clean_output,
                copy: pipeline.copy.clone(),
                provide: pipeline.provide.clone(),
                define,
                hot_module_replacement: *pipeline.hot_module_replacement.select(environment),
            },
            hashing: pipeline.hashing,
            source_map: *pipeline.source_map.select(environment),
            dev_server: pipeline.dev_server.clone(),
            template_variables: entry.template.clone(),
        };

        tracing::debug!(
            environment = %environment,
            rules = configuration.rules.len(),
            template_variables = configuration.template_variables.len(),
            "configuration resolved"
        );

        Ok(configuration)
    }
}
