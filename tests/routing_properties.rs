//! Property tests for resolution and routing invariants.

mod common;

use std::path::PathBuf;

use packplan::domain::models::{
    Destination, FilePattern, OutputTemplate, PipelineDeclaration, RouteRule, RuleSet,
    SourceAsset, TemplateContext,
};
use packplan::services::{AssetRouter, Emission};
use packplan::{ConfigResolver, ConfigurationError};
use proptest::prelude::*;

const KNOWN_FLAGS: [&str; 5] = ["development", "dev", "production", "prod", "build"];

fn resolver() -> ConfigResolver {
    ConfigResolver::new(PipelineDeclaration::default(), common::declarations())
}

fn rule(name: &str, test: &str) -> RouteRule {
    RouteRule {
        name: name.to_string(),
        test: FilePattern::regex(test).unwrap(),
        exclude: None,
        transforms: Vec::new(),
        destination: Destination::Bundle,
    }
}

proptest! {
    /// Property: resolving the same flag twice yields identical results
    #[test]
    fn prop_resolution_is_idempotent(flag in proptest::option::of("[a-z ]{0,12}")) {
        let resolver = resolver();
        prop_assert_eq!(resolver.resolve(flag.as_deref()), resolver.resolve(flag.as_deref()));
    }

    /// Property: any non-blank flag outside the known aliases is rejected
    #[test]
    fn prop_unknown_flags_rejected(flag in "[a-z]{1,12}") {
        prop_assume!(!KNOWN_FLAGS.contains(&flag.as_str()));
        prop_assert_eq!(
            resolver().resolve(Some(&flag)),
            Err(ConfigurationError::UnknownEnvironment(flag.clone()))
        );
    }

    /// Property: media at or under the limit is inlined, larger media is emitted
    #[test]
    fn prop_inline_threshold(size in 0usize..2048, ext in prop::sample::select(vec!["png", "jpg", "gif", "svg", "woff2"])) {
        let config = resolver().resolve(Some("production")).unwrap();
        let asset = SourceAsset::new(format!("src/media/file.{ext}"), vec![1u8; size]);
        let decision = AssetRouter::new(&config).route(&asset, "0123456789abcdef").unwrap().unwrap();

        if size <= 1024 {
            prop_assert!(decision.emission.is_inline());
        } else {
            match decision.emission {
                Emission::File { output } => prop_assert!(output.starts_with("assets")),
                other => prop_assert!(false, "expected file emission, got {:?}", other),
            }
        }
    }

    /// Property: the first applicable rule in declaration order wins
    #[test]
    fn prop_first_match_wins(stem in "[a-z]{1,8}", ext in prop::sample::select(vec!["js", "jsx", "ts", "css"])) {
        let rules = RuleSet {
            scripts: vec![rule("js", r"\.js$"), rule("jsx", r"\.jsx?$"), rule("any", ".*")],
            ..RuleSet::default()
        };
        let path = PathBuf::from(format!("src/{stem}.{ext}"));
        let (_, matched) = rules.first_match(&path).unwrap();

        let expected = match ext {
            "js" => "js",
            "jsx" => "jsx",
            _ => "any",
        };
        prop_assert_eq!(matched.name.as_str(), expected);
    }

    /// Property: `[hash:N]` renders exactly N characters of the hash
    #[test]
    fn prop_hash_length(len in 1usize..=64) {
        let template = OutputTemplate::parse(&format!("[name].[hash:{len}].[ext]")).unwrap();
        let hash = "f".repeat(64);
        let rendered = template.render(&TemplateContext {
            name: "app",
            ext: "js",
            hash: &hash,
            content_hash: &hash,
            default_hash_length: 20,
        });
        prop_assert_eq!(rendered.len(), "app..js".len() + len);
    }
}
