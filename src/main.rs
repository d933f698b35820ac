//! Packplan CLI entry point.

use clap::Parser;

use packplan::application::Project;
use packplan::cli::{dispatch, handle_error, Cli, Session};
use packplan::infrastructure::logging::LoggerImpl;

fn main() {
    let cli = Cli::parse();
    let json = cli.global.json;

    let project = match Project::open(&cli.global.project) {
        Ok(project) => project,
        Err(err) => handle_error(&err, json),
    };

    let logger = match LoggerImpl::init(&project.config().logging) {
        Ok(logger) => Some(logger),
        Err(err) => {
            eprintln!("Warning: logging disabled: {err:#}");
            None
        }
    };

    let session = Session::new(project, &cli.global);
    let result = dispatch(cli.command, &session);
    drop(logger);

    if let Err(err) = result {
        handle_error(&err, json);
    }
}
