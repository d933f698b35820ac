use std::path::PathBuf;

use clap::Parser;
use packplan::cli::commands::plan::KindFilter;
use packplan::cli::{Cli, Commands};

#[test]
fn test_parse_resolve_defaults() {
    let cli = Cli::try_parse_from(["packplan", "resolve"]).unwrap();

    assert!(!cli.global.json);
    assert_eq!(cli.global.project, PathBuf::from("."));
    assert!(cli.global.environment.is_none());
    match cli.command {
        Commands::Resolve(args) => assert!(!args.rules),
        other => panic!("Wrong command: {other:?}"),
    }
}

#[test]
fn test_parse_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "packplan", "resolve", "--rules", "--json", "--env", "dev", "-p", "demos/site",
    ])
    .unwrap();

    assert!(cli.global.json);
    assert_eq!(cli.global.environment.as_deref(), Some("dev"));
    assert_eq!(cli.global.project, PathBuf::from("demos/site"));
    assert!(matches!(cli.command, Commands::Resolve(args) if args.rules));
}

#[test]
fn test_parse_route() {
    let cli = Cli::try_parse_from(["packplan", "-e", "production", "route", "src/index.js"]).unwrap();

    match cli.command {
        Commands::Route(args) => assert_eq!(args.path, PathBuf::from("src/index.js")),
        other => panic!("Wrong command: {other:?}"),
    }
    assert_eq!(cli.global.environment.as_deref(), Some("production"));
}

#[test]
fn test_route_requires_path() {
    assert!(Cli::try_parse_from(["packplan", "route"]).is_err());
}

#[test]
fn test_parse_plan_kind() {
    let cli = Cli::try_parse_from(["packplan", "plan", "--kind", "stylesheet", "--with-html"]).unwrap();

    match cli.command {
        Commands::Plan(args) => {
            assert_eq!(args.kind, Some(KindFilter::Stylesheet));
            assert!(args.with_html);
        }
        other => panic!("Wrong command: {other:?}"),
    }
}

#[test]
fn test_parse_plan_rejects_unknown_kind() {
    assert!(Cli::try_parse_from(["packplan", "plan", "--kind", "video"]).is_err());
}

#[test]
fn test_parse_html_output() {
    let cli = Cli::try_parse_from(["packplan", "html", "-o", "dist/index.html"]).unwrap();
    match cli.command {
        Commands::Html(args) => assert_eq!(args.output, Some(PathBuf::from("dist/index.html"))),
        other => panic!("Wrong command: {other:?}"),
    }
}

#[test]
fn test_parse_define() {
    let cli = Cli::try_parse_from(["packplan", "define", "src/index.js"]).unwrap();
    assert!(matches!(cli.command, Commands::Define(args) if args.file == PathBuf::from("src/index.js")));
}

#[test]
fn test_unknown_subcommand() {
    assert!(Cli::try_parse_from(["packplan", "serve"]).is_err());
}
