//! `packplan define <file>`: apply compile-time defines to a source file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::cli::display::{output, CommandOutput};
use crate::cli::Session;
use crate::domain::models::Environment;
use crate::infrastructure::fs::read_project_file;
use crate::services::DefineTable;

#[derive(Args, Debug)]
pub struct DefineArgs {
    /// Source file, relative to the project root
    pub file: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct DefineOutput {
    pub environment: Environment,
    pub file: PathBuf,
    pub changed: bool,
    pub source: String,
}

impl CommandOutput for DefineOutput {
    fn to_human(&self) -> String {
        self.source.clone()
    }
}

pub fn execute(args: &DefineArgs, session: &Session) -> Result<()> {
    let configuration = session.configuration()?;
    let original = read_project_file(session.project.root(), &args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let table = DefineTable::from(configuration.plugins.define.clone());
    let source = table.substitute(&original);
    tracing::debug!(
        file = %args.file.display(),
        defines = configuration.plugins.define.len(),
        changed = source != original,
        "defines applied"
    );

    output(
        &DefineOutput {
            environment: configuration.environment,
            file: args.file.clone(),
            changed: source != original,
            source,
        },
        session.json,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_output_is_source() {
        let out = DefineOutput {
            environment: Environment::Production,
            file: PathBuf::from("src/index.js"),
            changed: true,
            source: "if (\"dev\") {}".to_string(),
        };
        assert_eq!(out.to_human(), "if (\"dev\") {}");
        assert_eq!(out.to_json()["changed"], true);
    }
}
