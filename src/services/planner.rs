//! Output layout planning.
//!
//! `BuildPlanner` maps a set of source files onto the artifacts the external
//! bundler will emit for a resolved [`Configuration`]: the script bundle,
//! extracted stylesheets, per-file assets, inlined assets, copied files and
//! the HTML entry. Planning is pure; nothing is written.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::errors::{PipelineError, PipelineResult};
use crate::domain::models::pattern::normalize_path;
use crate::domain::models::{Configuration, CopyPattern, Destination, Environment, SourceAsset};
use crate::services::asset_router::{AssetRouter, Emission};
use crate::services::hashing::{build_hash, content_hash};
use crate::services::html::{HtmlAssets, HtmlEmitter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Bundle,
    Stylesheet,
    Asset,
    Copy,
    Html,
}

impl ArtifactKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bundle => "bundle",
            Self::Stylesheet => "stylesheet",
            Self::Asset => "asset",
            Self::Copy => "copy",
            Self::Html => "html",
        }
    }
}

/// One file the build will write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    /// Path under the output root
    pub output: PathBuf,
    /// URL the file is served from
    pub url: String,
    pub kind: ArtifactKind,
    /// Source files that produce this artifact, sorted
    pub sources: Vec<PathBuf>,
    /// Route rules that fed sources into this artifact, sorted; empty for
    /// copies and the HTML entry
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<String>,
    #[serde(skip)]
    digest: Option<String>,
}

/// A file embedded as a `data:` URI instead of being written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlinedAsset {
    pub source: PathBuf,
    pub rule: String,
    pub mime: String,
    pub size: u64,
    pub data_uri: String,
}

/// The complete output layout of one build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildPlan {
    pub environment: Environment,
    pub output_root: PathBuf,
    pub build_hash: String,
    pub artifacts: Vec<Artifact>,
    pub inlined: Vec<InlinedAsset>,
    /// Sources no rule or copy pattern applies to
    pub unmatched: Vec<PathBuf>,
    /// Sources dropped by a copy pattern's ignore list
    pub ignored: Vec<PathBuf>,
    /// Rendered HTML entry, when a template was supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

impl BuildPlan {
    pub fn artifact(&self, output: &Path) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.output == output)
    }

    pub fn artifacts_of(&self, kind: ArtifactKind) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter().filter(move |a| a.kind == kind)
    }

    /// Artifact a given source file ends up in, if it is written to disk.
    pub fn artifact_for_source(&self, source: &Path) -> Option<&Artifact> {
        self.artifacts
            .iter()
            .find(|a| a.sources.iter().any(|s| s == source))
    }
}

/// Plans the artifact layout for a resolved configuration.
#[derive(Debug, Clone, Copy)]
pub struct BuildPlanner<'a> {
    config: &'a Configuration,
}

impl<'a> BuildPlanner<'a> {
    pub const fn new(config: &'a Configuration) -> Self {
        Self { config }
    }

    /// Plan the build of `assets`, rendering `html_template` when given.
    #[tracing::instrument(skip_all, fields(environment = %self.config.environment, assets = assets.len()))]
    pub fn plan(
        &self,
        assets: &[SourceAsset],
        html_template: Option<&str>,
    ) -> PipelineResult<BuildPlan> {
        let router = AssetRouter::new(self.config);

        let mut copied = Vec::new();
        let mut ignored = Vec::new();
        let mut routable = Vec::new();
        for asset in assets {
            match self.copy_pattern_for(&asset.path) {
                Some(pattern) if is_ignored(pattern, &asset.path) => ignored.push(asset.path.clone()),
                Some(pattern) => copied.push((pattern, asset)),
                None => routable.push(asset),
            }
        }

        let merged_inputs = routable.iter().copied().filter(|asset| {
            router.matching_rule(&asset.path).is_some_and(|(_, rule)| {
                matches!(
                    rule.destination,
                    Destination::Bundle | Destination::Extract { .. }
                )
            })
        });
        let build_hash = build_hash(merged_inputs);

        let mut artifacts: BTreeMap<PathBuf, Artifact> = BTreeMap::new();
        let mut inlined = Vec::new();
        let mut unmatched = Vec::new();

        for asset in routable {
            let Some(decision) = router.route(asset, &build_hash)? else {
                unmatched.push(asset.path.clone());
                continue;
            };

            let (kind, output, digest) = match decision.emission {
                Emission::Bundled { output } => (ArtifactKind::Bundle, output, None),
                Emission::Extracted { output } => (ArtifactKind::Stylesheet, output, None),
                Emission::File { output } => (
                    ArtifactKind::Asset,
                    output,
                    Some(content_hash(&asset.contents)),
                ),
                Emission::Inline { mime, data_uri } => {
                    inlined.push(InlinedAsset {
                        source: decision.source,
                        rule: decision.rule,
                        mime,
                        size: asset.size(),
                        data_uri,
                    });
                    continue;
                }
            };

            add_artifact(
                &mut artifacts,
                Artifact {
                    url: self.public_url(&output),
                    output: self.config.output.root.join(&output),
                    kind,
                    sources: vec![decision.source],
                    rules: vec![decision.rule],
                    digest,
                },
            )?;
        }

        for (pattern, asset) in copied {
            let output = copy_destination(pattern, &asset.path);
            add_artifact(
                &mut artifacts,
                Artifact {
                    url: self.public_url(&output),
                    output: self.config.output.root.join(&output),
                    kind: ArtifactKind::Copy,
                    sources: vec![asset.path.clone()],
                    rules: Vec::new(),
                    digest: Some(content_hash(&asset.contents)),
                },
            )?;
        }

        let html = match html_template {
            Some(template) => {
                let page = self.render_html(template, &artifacts)?;
                let options = &self.config.plugins.html;
                let output = PathBuf::from(&options.filename);
                add_artifact(
                    &mut artifacts,
                    Artifact {
                        url: self.public_url(&output),
                        output: self.config.output.root.join(&output),
                        kind: ArtifactKind::Html,
                        sources: vec![options.template.clone()],
                        rules: Vec::new(),
                        digest: Some(content_hash(page.as_bytes())),
                    },
                )?;
                Some(page)
            }
            None => None,
        };

        let mut artifacts: Vec<Artifact> = artifacts.into_values().collect();
        for artifact in &mut artifacts {
            artifact.sources.sort();
            artifact.rules.sort();
            artifact.rules.dedup();
        }
        inlined.sort_by(|a, b| a.source.cmp(&b.source));
        unmatched.sort();
        ignored.sort();

        tracing::info!(
            artifacts = artifacts.len(),
            inlined = inlined.len(),
            unmatched = unmatched.len(),
            build_hash = %build_hash,
            "build plan ready"
        );

        Ok(BuildPlan {
            environment: self.config.environment,
            output_root: self.config.output.root.clone(),
            build_hash,
            artifacts,
            inlined,
            unmatched,
            ignored,
            html,
        })
    }

    fn copy_pattern_for(&self, path: &Path) -> Option<&'a CopyPattern> {
        self.config
            .plugins
            .copy
            .iter()
            .find(|pattern| pattern.from.is_match(path))
    }

    /// Public URL of a path relative to the output root.
    pub fn public_url(&self, relative: &Path) -> String {
        let public_path = &self.config.output.public_path;
        let relative = normalize_path(relative);
        if public_path.is_empty() || public_path.ends_with('/') {
            format!("{public_path}{relative}")
        } else {
            format!("{public_path}/{relative}")
        }
    }

    fn render_html(
        &self,
        template: &str,
        artifacts: &BTreeMap<PathBuf, Artifact>,
    ) -> PipelineResult<String> {
        let urls = |kind: ArtifactKind| {
            artifacts
                .values()
                .filter(|a| a.kind == kind)
                .map(|a| a.url.clone())
                .collect::<Vec<_>>()
        };
        let assets = HtmlAssets {
            scripts: urls(ArtifactKind::Bundle),
            stylesheets: urls(ArtifactKind::Stylesheet),
        };
        HtmlEmitter::new(self.config).render(template, &assets)
    }
}

/// Add `artifact`, merging inputs of shared bundles and rejecting conflicting writes.
///
/// Every bundle or extract rule targeting the same output joins one artifact,
/// whichever rule routed the file there.
fn add_artifact(
    artifacts: &mut BTreeMap<PathBuf, Artifact>,
    artifact: Artifact,
) -> PipelineResult<()> {
    let Some(existing) = artifacts.get_mut(&artifact.output) else {
        artifacts.insert(artifact.output.clone(), artifact);
        return Ok(());
    };

    let mergeable = existing.kind == artifact.kind
        && match artifact.kind {
            ArtifactKind::Bundle | ArtifactKind::Stylesheet => true,
            _ => existing.digest.is_some() && existing.digest == artifact.digest,
        };

    if !mergeable {
        let source = artifact.sources.first().cloned().unwrap_or_default();
        return Err(PipelineError::transform(
            source,
            "emit",
            format!(
                "output {} conflicts with {} artifact from {}",
                artifact.output.display(),
                existing.kind.as_str(),
                existing
                    .sources
                    .iter()
                    .map(|s| s.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        ));
    }

    existing.sources.extend(artifact.sources);
    existing.rules.extend(artifact.rules);
    Ok(())
}

fn is_ignored(pattern: &CopyPattern, path: &Path) -> bool {
    let file_name = path.file_name().map(Path::new);
    pattern
        .ignore
        .iter()
        .any(|ignore| file_name.is_some_and(|name| ignore.is_match(name)) || ignore.is_match(path))
}

fn copy_destination(pattern: &CopyPattern, path: &Path) -> PathBuf {
    let target = Path::new(&pattern.to);
    if pattern.flatten {
        path.file_name()
            .map_or_else(|| target.join(path), |name| target.join(name))
    } else {
        target.join(path)
    }
}
