//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::commands::{
    define::DefineArgs, html::HtmlArgs, plan::PlanArgs, resolve::ResolveArgs, route::RouteArgs,
};

#[derive(Parser, Debug)]
#[command(name = "packplan")]
#[command(about = "Resolve asset pipeline configuration and plan build output", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Options shared by every command
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Project root containing packplan.yaml
    #[arg(short, long, global = true, default_value = ".")]
    pub project: PathBuf,

    /// Environment flag (development, dev, production, prod, build);
    /// overrides the configured environment variable
    #[arg(short, long = "env", global = true, value_name = "FLAG")]
    pub environment: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the configuration resolved for the selected environment
    Resolve(ResolveArgs),

    /// Show which rule a source file is routed by and where it ends up
    Route(RouteArgs),

    /// Plan the complete output layout of the project
    Plan(PlanArgs),

    /// Render the HTML entry page
    Html(HtmlArgs),

    /// Apply compile-time defines to a source file
    Define(DefineArgs),
}
