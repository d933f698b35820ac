//! `packplan route <path>`: explain how one source file is handled.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::cli::display::{output, truncate_ellipsis, CommandOutput, DetailView};
use crate::cli::Session;
use crate::domain::models::{AssetCategory, SourceAsset};
use crate::infrastructure::fs::ProjectScanner;
use crate::services::{ArtifactKind, AssetRouter, BuildPlan, BuildPlanner, Emission};

#[derive(Args, Debug)]
pub struct RouteArgs {
    /// Source file, relative to the project root
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteStatus {
    /// Written to (or merged into) an output file
    Emitted,
    /// Embedded as a data URI
    Inlined,
    /// Dropped by a copy pattern's ignore list
    Ignored,
    /// No rule or copy pattern applies
    Unmatched,
}

#[derive(Debug, Serialize)]
pub struct RouteOutput {
    pub source: PathBuf,
    pub status: RouteStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<AssetCategory>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub transforms: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<ArtifactKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_uri: Option<String>,
}

impl RouteOutput {
    const fn bare(source: PathBuf, status: RouteStatus) -> Self {
        Self {
            source,
            status,
            category: None,
            rule: None,
            transforms: Vec::new(),
            kind: None,
            output: None,
            url: None,
            data_uri: None,
        }
    }
}

impl CommandOutput for RouteOutput {
    fn to_human(&self) -> String {
        let status = match self.status {
            RouteStatus::Emitted => "emitted",
            RouteStatus::Inlined => "inlined",
            RouteStatus::Ignored => "ignored by copy pattern",
            RouteStatus::Unmatched => "no matching rule",
        };
        let category = self.category.map(AssetCategory::as_str);
        let kind = self.kind.map(ArtifactKind::as_str);
        let output = self.output.as_ref().map(|p| p.display().to_string());
        let data_uri = self.data_uri.as_deref().map(|uri| truncate_ellipsis(uri, 48));
        let transforms = (!self.transforms.is_empty()).then(|| self.transforms.join(" > "));

        DetailView::new(&self.source.display().to_string())
            .field("Status", status)
            .field_opt("Category", category)
            .field_opt("Rule", self.rule.as_deref())
            .field_opt("Transforms", transforms.as_deref())
            .field_opt("Artifact", kind)
            .field_opt("Output", output.as_deref())
            .field_opt("URL", self.url.as_deref())
            .field_opt("Data URI", data_uri.as_deref())
            .render()
    }
}

/// Locate `source` in a build plan of the whole project.
pub fn describe(plan: &BuildPlan, router: &AssetRouter<'_>, source: &Path) -> Option<RouteOutput> {
    if plan.ignored.iter().any(|p| p == source) {
        return Some(RouteOutput::bare(source.to_path_buf(), RouteStatus::Ignored));
    }
    if let Some(inlined) = plan.inlined.iter().find(|a| a.source == source) {
        return Some(RouteOutput {
            category: router.matching_rule(source).map(|(category, _)| category),
            rule: Some(inlined.rule.clone()),
            data_uri: Some(inlined.data_uri.clone()),
            ..RouteOutput::bare(source.to_path_buf(), RouteStatus::Inlined)
        });
    }
    if let Some(artifact) = plan.artifact_for_source(source) {
        let routed = if artifact.rules.is_empty() {
            None
        } else {
            router.matching_rule(source)
        };
        return Some(RouteOutput {
            category: routed.map(|(category, _)| category),
            rule: routed.map(|(_, rule)| rule.name.clone()),
            transforms: routed.map(|(_, rule)| rule.loader_names()).unwrap_or_default(),
            kind: Some(artifact.kind),
            output: Some(artifact.output.clone()),
            url: Some(artifact.url.clone()),
            ..RouteOutput::bare(source.to_path_buf(), RouteStatus::Emitted)
        });
    }
    if plan.unmatched.iter().any(|p| p == source) {
        return Some(RouteOutput::bare(source.to_path_buf(), RouteStatus::Unmatched));
    }
    None
}

/// Route a file that lies outside the scanned source directories.
fn route_single(
    router: &AssetRouter<'_>,
    plan: &BuildPlan,
    asset: &SourceAsset,
) -> Result<RouteOutput> {
    let Some(decision) = router.route(asset, &plan.build_hash)? else {
        return Ok(RouteOutput::bare(asset.path.clone(), RouteStatus::Unmatched));
    };

    let mut out = RouteOutput {
        category: Some(decision.category),
        rule: Some(decision.rule),
        transforms: decision.transforms,
        ..RouteOutput::bare(decision.source, RouteStatus::Emitted)
    };
    let (kind, output) = match decision.emission {
        Emission::Inline { data_uri, .. } => {
            out.status = RouteStatus::Inlined;
            out.data_uri = Some(data_uri);
            return Ok(out);
        }
        Emission::Bundled { output } => (ArtifactKind::Bundle, output),
        Emission::Extracted { output } => (ArtifactKind::Stylesheet, output),
        Emission::File { output } => (ArtifactKind::Asset, output),
    };
    out.kind = Some(kind);
    out.output = Some(plan.output_root.join(output));
    Ok(out)
}

pub fn execute(args: &RouteArgs, session: &Session) -> Result<()> {
    let configuration = session.configuration()?;
    let assets = session.project.scan()?;
    let plan = BuildPlanner::new(&configuration)
        .plan(&assets, None)
        .context("Failed to plan build")?;
    let router = AssetRouter::new(&configuration);

    let result = match describe(&plan, &router, &args.path) {
        Some(result) => result,
        None => {
            let root = session.project.root();
            let contents = std::fs::read(root.join(&args.path))
                .with_context(|| format!("Failed to read {}", args.path.display()))?;
            route_single(&router, &plan, &SourceAsset::new(args.path.clone(), contents))?
        }
    };

    output(&result, session.json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{
        DeclarationTable, Destination, EnvironmentDeclaration, FilePattern, PipelineDeclaration,
        TransformStep,
    };
    use crate::services::ConfigResolver;

    fn configuration() -> crate::domain::models::Configuration {
        let table = DeclarationTable::new()
            .with_entry("dev", EnvironmentDeclaration::default())
            .with_entry("build", EnvironmentDeclaration::default());
        ConfigResolver::new(PipelineDeclaration::default(), table)
            .resolve(Some("production"))
            .unwrap()
    }

    fn assets() -> Vec<SourceAsset> {
        vec![
            SourceAsset::new("src/index.js", b"import './index.scss';".to_vec()),
            SourceAsset::new("src/index.scss", b"body { color: red }".to_vec()),
            SourceAsset::new("src/icon.png", vec![0u8; 16]),
            SourceAsset::new("src/photo.jpg", vec![0u8; 4096]),
            SourceAsset::new("src/notes.txt", b"todo".to_vec()),
        ]
    }

    #[test]
    fn test_describe_statuses() {
        let config = configuration();
        let plan = BuildPlanner::new(&config).plan(&assets(), None).unwrap();
        let router = AssetRouter::new(&config);

        let script = describe(&plan, &router, Path::new("src/index.js")).unwrap();
        assert_eq!(script.status, RouteStatus::Emitted);
        assert_eq!(script.kind, Some(ArtifactKind::Bundle));
        assert_eq!(script.category, Some(AssetCategory::Scripts));

        let icon = describe(&plan, &router, Path::new("src/icon.png")).unwrap();
        assert_eq!(icon.status, RouteStatus::Inlined);
        assert!(icon.data_uri.unwrap().starts_with("data:image/png;base64,"));

        let photo = describe(&plan, &router, Path::new("src/photo.jpg")).unwrap();
        assert_eq!(photo.kind, Some(ArtifactKind::Asset));

        let notes = describe(&plan, &router, Path::new("src/notes.txt")).unwrap();
        assert_eq!(notes.status, RouteStatus::Unmatched);

        assert!(describe(&plan, &router, Path::new("lib/other.js")).is_none());
    }

    #[test]
    fn test_route_single_uses_plan_hash() {
        let config = configuration();
        let plan = BuildPlanner::new(&config).plan(&assets(), None).unwrap();
        let router = AssetRouter::new(&config);

        let asset = SourceAsset::new("lib/other.js", b"1".to_vec());
        let out = route_single(&router, &plan, &asset).unwrap();
        assert_eq!(out.status, RouteStatus::Emitted);
        assert_eq!(out.output, plan.artifacts_of(ArtifactKind::Bundle).next().map(|a| a.output.clone()));
    }

    #[test]
    fn test_route_single_kind_follows_destination() {
        let mut config = configuration();
        config.rules.media[0].destination = Destination::Bundle;
        let plan = BuildPlanner::new(&config).plan(&assets(), None).unwrap();
        let router = AssetRouter::new(&config);

        let asset = SourceAsset::new("lib/banner.png", vec![0u8; 4096]);
        let out = route_single(&router, &plan, &asset).unwrap();
        assert_eq!(out.category, Some(AssetCategory::Media));
        assert_eq!(out.kind, Some(ArtifactKind::Bundle));
    }

    #[test]
    fn test_describe_reports_rule_of_each_bundle_source() {
        let mut config = configuration();
        let mut typescript = config.rules.scripts[0].clone();
        typescript.name = "typescript".to_string();
        typescript.test = FilePattern::regex(r"\.ts$").unwrap();
        typescript.transforms = vec![TransformStep::new("ts-loader")];
        config.rules.scripts.push(typescript);

        let mut sources = assets();
        sources.push(SourceAsset::new("src/util.ts", b"export {}".to_vec()));
        let plan = BuildPlanner::new(&config).plan(&sources, None).unwrap();
        let router = AssetRouter::new(&config);

        let util = describe(&plan, &router, Path::new("src/util.ts")).unwrap();
        assert_eq!(util.rule.as_deref(), Some("typescript"));
        assert_eq!(util.transforms, vec!["ts-loader"]);
        let index = describe(&plan, &router, Path::new("src/index.js")).unwrap();
        assert_eq!(index.rule.as_deref(), Some("scripts"));
        assert_eq!(util.output, index.output);
    }

    #[test]
    fn test_human_output_lists_fields() {
        let out = RouteOutput {
            rule: Some("media".to_string()),
            data_uri: Some(format!("data:image/png;base64,{}", "A".repeat(100))),
            ..RouteOutput::bare(PathBuf::from("src/icon.png"), RouteStatus::Inlined)
        };
        let text = out.to_human();
        assert!(text.contains("src/icon.png"));
        assert!(text.contains("inlined"));
        assert!(text.contains('\u{2026}'));
        assert!(!text.contains("Output"));
    }
}
