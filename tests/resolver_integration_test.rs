//! End-to-end resolution behavior: environment selection, template variables
//! and failure modes.

mod common;

use packplan::domain::models::{Environment, PipelineDeclaration, SourceMap};
use packplan::domain::ports::InMemoryDeclarations;
use packplan::{ConfigResolver, ConfigurationError, DeclarationTable};

fn resolver() -> ConfigResolver {
    common::capture_planner_logs();
    let source = InMemoryDeclarations::new(common::declarations());
    ConfigResolver::from_source(PipelineDeclaration::default(), &source).unwrap()
}

#[test]
fn test_template_variables_match_declared_table() {
    let resolver = resolver();
    let table = common::declarations();

    for (flag, key) in [
        ("development", "dev"),
        ("dev", "dev"),
        ("production", "build"),
        ("prod", "build"),
        ("build", "build"),
    ] {
        let config = resolver.resolve(Some(flag)).unwrap();
        assert_eq!(
            config.template_variables,
            table.get(key).unwrap().template,
            "flag {flag} should select the '{key}' entry"
        );
    }
}

#[test]
fn test_unset_flag_falls_back_to_production() {
    let config = resolver().resolve(None).unwrap();
    assert_eq!(config.environment, Environment::Production);
    assert_eq!(config.template_variables["title"], "Build");

    let config = resolver().resolve(Some("   ")).unwrap();
    assert_eq!(config.environment, Environment::Production);
}

#[test]
fn test_unset_flag_without_fallback_fails() {
    let resolver = resolver().with_unset_fallback(None);
    assert_eq!(
        resolver.resolve(None),
        Err(ConfigurationError::MissingEnvironment)
    );
}

#[test]
fn test_unknown_flag_fails_without_partial_configuration() {
    let result = resolver().resolve(Some("staging"));
    assert_eq!(
        result,
        Err(ConfigurationError::UnknownEnvironment("staging".to_string()))
    );
}

#[test]
fn test_missing_declaration_entry() {
    let table = DeclarationTable::new().with_entry(
        "build",
        common::declarations().get("build").unwrap().clone(),
    );
    let resolver = ConfigResolver::new(PipelineDeclaration::default(), table);

    assert!(resolver.resolve(Some("production")).is_ok());
    assert!(matches!(
        resolver.resolve(Some("development")),
        Err(ConfigurationError::MissingDeclaration { environment: Environment::Development, ref key }) if key == "dev"
    ));
}

#[test]
fn test_environment_conditional_options() {
    let dev = resolver().resolve(Some("development")).unwrap();
    assert_eq!(dev.source_map, SourceMap::CheapModuleEvalSourceMap);
    assert!(dev.plugins.hot_module_replacement);
    assert!(dev.plugins.css.hot_reload);

    let build = resolver().resolve(Some("production")).unwrap();
    assert_eq!(build.source_map, SourceMap::None);
    assert!(!build.plugins.hot_module_replacement);
    assert!(!build.plugins.css.hot_reload);
}

#[test]
fn test_resolve_from_process_variable() {
    let resolver = resolver();

    let dev = temp_env::with_var("NODE_ENV", Some("development"), || {
        resolver.resolve_from_env("NODE_ENV").unwrap()
    });
    assert_eq!(dev.template_variables["title"], "Dev");

    let build = temp_env::with_var_unset("NODE_ENV", || resolver.resolve_from_env("NODE_ENV").unwrap());
    assert_eq!(build.template_variables["title"], "Build");

    let err = temp_env::with_var("NODE_ENV", Some("test"), || resolver.resolve_from_env("NODE_ENV"));
    assert!(matches!(err, Err(ConfigurationError::UnknownEnvironment(_))));
}

#[test]
fn test_resolution_is_idempotent() {
    let resolver = resolver();
    for flag in ["development", "production"] {
        assert_eq!(
            resolver.resolve(Some(flag)).unwrap(),
            resolver.resolve(Some(flag)).unwrap()
        );
    }
}

#[test]
fn test_environment_defines_override_global_defines() {
    let mut table = common::declarations();
    let mut build = table.get("build").unwrap().clone();
    build.define.insert("DEV".to_string(), "\"build\"".to_string());
    table = table.with_entry("build", build);

    let config = ConfigResolver::new(PipelineDeclaration::default(), table)
        .resolve(Some("production"))
        .unwrap();
    assert_eq!(config.plugins.define["DEV"], "\"build\"");
    assert_eq!(config.plugins.define["FLAG"], "true");
}
