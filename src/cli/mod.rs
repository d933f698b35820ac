//! Command-line interface.

pub mod commands;
pub mod display;
pub mod types;

use anyhow::Result;

pub use types::{Cli, Commands, GlobalArgs};

use crate::application::Project;
use crate::domain::models::Configuration;

/// State shared by a single CLI invocation
#[derive(Debug)]
pub struct Session {
    pub project: Project,
    pub environment: Option<String>,
    pub json: bool,
}

impl Session {
    pub fn new(project: Project, global: &GlobalArgs) -> Self {
        Self {
            project,
            environment: global.environment.clone(),
            json: global.json,
        }
    }

    /// Resolve the configuration for the `--env` flag or the configured variable.
    pub fn configuration(&self) -> Result<Configuration> {
        self.project.resolve(self.environment.as_deref())
    }
}

/// Run `command` within `session`.
pub fn dispatch(command: Commands, session: &Session) -> Result<()> {
    match command {
        Commands::Resolve(args) => commands::resolve::execute(&args, session),
        Commands::Route(args) => commands::route::execute(&args, session),
        Commands::Plan(args) => commands::plan::execute(&args, session),
        Commands::Html(args) => commands::html::execute(&args, session),
        Commands::Define(args) => commands::define::execute(&args, session),
    }
}

/// Report `err` and exit with status 1.
pub fn handle_error(err: &anyhow::Error, json: bool) -> ! {
    tracing::error!(error = %format!("{err:#}"), "command failed");
    if json {
        let body = serde_json::json!({
            "error": err.to_string(),
            "causes": err.chain().skip(1).map(ToString::to_string).collect::<Vec<_>>(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&body).unwrap_or_default()
        );
    } else {
        eprintln!("Error: {err}");
        for cause in err.chain().skip(1) {
            eprintln!("  caused by: {cause}");
        }
    }
    std::process::exit(1)
}
