//! `packplan plan`: list every artifact the build will produce.

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;

use crate::cli::display::{list_table, output, render_list, CommandOutput};
use crate::cli::Session;
use crate::domain::models::pattern::normalize_path;
use crate::services::{ArtifactKind, BuildPlan};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindFilter {
    Bundle,
    Stylesheet,
    Asset,
    Copy,
    Html,
}

impl From<KindFilter> for ArtifactKind {
    fn from(filter: KindFilter) -> Self {
        match filter {
            KindFilter::Bundle => Self::Bundle,
            KindFilter::Stylesheet => Self::Stylesheet,
            KindFilter::Asset => Self::Asset,
            KindFilter::Copy => Self::Copy,
            KindFilter::Html => Self::Html,
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct PlanArgs {
    /// Only show artifacts of this kind
    #[arg(short, long, value_enum)]
    pub kind: Option<KindFilter>,

    /// Include the rendered HTML page in JSON output
    #[arg(long)]
    pub with_html: bool,
}

#[derive(Debug, Serialize)]
pub struct PlanOutput {
    #[serde(flatten)]
    pub plan: BuildPlan,
}

impl PlanOutput {
    pub fn new(mut plan: BuildPlan, args: &PlanArgs) -> Self {
        if let Some(kind) = args.kind {
            let kind = ArtifactKind::from(kind);
            plan.artifacts.retain(|a| a.kind == kind);
        }
        if !args.with_html {
            plan.html = None;
        }
        Self { plan }
    }
}

impl CommandOutput for PlanOutput {
    fn to_human(&self) -> String {
        let plan = &self.plan;
        let mut sections = vec![format!(
            "Environment: {}  Build hash: {}",
            plan.environment,
            &plan.build_hash[..plan.build_hash.len().min(12)]
        )];

        let mut table = list_table(&["kind", "output", "url", "rule", "sources"]);
        for artifact in &plan.artifacts {
            table.add_row(vec![
                artifact.kind.as_str().to_string(),
                normalize_path(&artifact.output),
                artifact.url.clone(),
                if artifact.rules.is_empty() {
                    "-".to_string()
                } else {
                    artifact.rules.join(", ")
                },
                artifact.sources.len().to_string(),
            ]);
        }
        sections.push(render_list("artifact", &table, plan.artifacts.len()));

        if !plan.inlined.is_empty() {
            let mut table = list_table(&["source", "mime", "bytes"]);
            for asset in &plan.inlined {
                table.add_row(vec![
                    normalize_path(&asset.source),
                    asset.mime.clone(),
                    asset.size.to_string(),
                ]);
            }
            sections.push(render_list("inlined asset", &table, plan.inlined.len()));
        }

        for (label, paths) in [("Unmatched", &plan.unmatched), ("Ignored", &plan.ignored)] {
            if !paths.is_empty() {
                let listed: Vec<String> = paths.iter().map(|p| normalize_path(p)).collect();
                sections.push(format!("{label}: {}", listed.join(", ")));
            }
        }

        sections.join("\n\n")
    }
}

pub fn execute(args: &PlanArgs, session: &Session) -> Result<()> {
    let configuration = session.configuration()?;
    let plan = session.project.plan(&configuration)?;
    output(&PlanOutput::new(plan, args), session.json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{
        DeclarationTable, EnvironmentDeclaration, PipelineDeclaration, SourceAsset,
    };
    use crate::services::{BuildPlanner, ConfigResolver};

    fn plan() -> BuildPlan {
        let table = DeclarationTable::new()
            .with_entry("dev", EnvironmentDeclaration::default())
            .with_entry("build", EnvironmentDeclaration::default());
        let config = ConfigResolver::new(PipelineDeclaration::default(), table)
            .resolve(Some("production"))
            .unwrap();
        let assets = vec![
            SourceAsset::new("src/index.js", b"let a = 1;".to_vec()),
            SourceAsset::new("src/index.scss", b"body {}".to_vec()),
            SourceAsset::new("src/icon.svg", b"<svg/>".to_vec()),
            SourceAsset::new("static/js/vendor.js", b"vendor".to_vec()),
            SourceAsset::new("static/js/other.js", b"other".to_vec()),
            SourceAsset::new("src/notes.md", b"# notes".to_vec()),
        ];
        BuildPlanner::new(&config)
            .plan(&assets, Some("<html><head></head><body></body></html>"))
            .unwrap()
    }

    #[test]
    fn test_kind_filter() {
        let args = PlanArgs {
            kind: Some(KindFilter::Copy),
            with_html: false,
        };
        let out = PlanOutput::new(plan(), &args);
        assert_eq!(out.plan.artifacts.len(), 1);
        assert_eq!(out.plan.artifacts[0].url, "/js/vendor.js");
        assert!(out.plan.html.is_none());
    }

    #[test]
    fn test_human_output() {
        let out = PlanOutput::new(plan(), &PlanArgs::default());
        let text = out.to_human();
        assert!(text.contains("Environment: production"));
        assert!(text.contains("dist/index.html"));
        assert!(text.contains("image/svg+xml"));
        assert!(text.contains("Unmatched: src/notes.md"));
        assert!(text.contains("Ignored: static/js/other.js"));
    }

    #[test]
    fn test_json_output_flattens_plan() {
        let out = PlanOutput::new(
            plan(),
            &PlanArgs {
                kind: None,
                with_html: true,
            },
        );
        let json = out.to_json();
        assert_eq!(json["environment"], "production");
        assert!(json["artifacts"].as_array().is_some_and(|a| a.len() == 4));
        assert!(json["html"].as_str().is_some_and(|h| h.contains("<script")));
    }
}
