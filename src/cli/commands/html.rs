//! `packplan html`: render the HTML entry page.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::cli::display::{output, CommandOutput};
use crate::cli::Session;
use crate::domain::models::Environment;

#[derive(Args, Debug, Default)]
pub struct HtmlArgs {
    /// Write the page to this file instead of printing it
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct HtmlOutput {
    pub environment: Environment,
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub written_to: Option<PathBuf>,
    pub page: String,
}

impl CommandOutput for HtmlOutput {
    fn to_human(&self) -> String {
        match &self.written_to {
            Some(path) => format!(
                "Wrote {} ({} bytes, {})",
                path.display(),
                self.page.len(),
                self.environment
            ),
            None => self.page.clone(),
        }
    }
}

pub fn execute(args: &HtmlArgs, session: &Session) -> Result<()> {
    let configuration = session.configuration()?;
    let plan = session.project.plan(&configuration)?;
    let page = plan
        .html
        .context("Build plan did not render an HTML page")?;

    if let Some(path) = &args.output {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, &page).with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), bytes = page.len(), "HTML page written");
    }

    output(
        &HtmlOutput {
            environment: configuration.environment,
            filename: configuration.plugins.html.filename.clone(),
            written_to: args.output.clone(),
            page,
        },
        session.json,
    );
    Ok(())
}
