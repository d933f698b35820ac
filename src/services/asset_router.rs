//! Routing of individual source files to output destinations.
//!
//! Rules are evaluated in category order (scripts, stylesheets, media) and
//! declaration order within a category; the first applicable rule wins.

use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD as base64_engine, Engine as _};
use serde::Serialize;

use crate::domain::errors::{PipelineError, PipelineResult};
use crate::domain::models::{
    AssetCategory, Configuration, Destination, OutputTemplate, RouteRule, SourceAsset,
    TemplateContext,
};
use crate::services::hashing::content_hash;

/// What happens to a routed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Emission {
    /// Part of the script bundle at `output`.
    Bundled { output: PathBuf },
    /// Part of the extracted file at `output`.
    Extracted { output: PathBuf },
    /// Emitted on its own at `output`.
    File { output: PathBuf },
    /// Embedded where referenced; no file is written.
    Inline { mime: String, data_uri: String },
}

impl Emission {
    /// Output path relative to the output root, if a file is written.
    pub fn output(&self) -> Option<&Path> {
        match self {
            Self::Bundled { output } | Self::Extracted { output } | Self::File { output } => {
                Some(output.as_path())
            }
            Self::Inline { .. } => None,
        }
    }

    pub const fn is_inline(&self) -> bool {
        matches!(self, Self::Inline { .. })
    }
}

/// Routing outcome for one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDecision {
    pub source: PathBuf,
    pub rule: String,
    pub category: AssetCategory,
    pub transforms: Vec<String>,
    pub emission: Emission,
}

/// Maps source files onto the destinations declared by a [`Configuration`].
#[derive(Debug, Clone, Copy)]
pub struct AssetRouter<'a> {
    config: &'a Configuration,
}

impl<'a> AssetRouter<'a> {
    pub const fn new(config: &'a Configuration) -> Self {
        Self { config }
    }

    /// First rule applicable to `path`, without looking at contents.
    pub fn matching_rule(&self, path: &Path) -> Option<(AssetCategory, &'a RouteRule)> {
        self.config.rules.first_match(path)
    }

    /// Route `asset`. Returns `Ok(None)` when no rule applies.
    ///
    /// `build_hash` is substituted for `[hash]` in bundle and extract names.
    pub fn route(
        &self,
        asset: &SourceAsset,
        build_hash: &str,
    ) -> PipelineResult<Option<RouteDecision>> {
        let Some((category, rule)) = self.matching_rule(&asset.path) else {
            tracing::trace!(path = %asset.path.display(), "no route rule matched");
            return Ok(None);
        };

        let emission = match &rule.destination {
            Destination::Bundle => Emission::Bundled {
                output: self.bundle_output(build_hash),
            },
            Destination::Extract { filename } => Emission::Extracted {
                output: self.merged_output(filename, "css", build_hash),
            },
            Destination::Asset {
                name,
                output_path,
                inline_limit,
            } => {
                if inline_limit.is_some_and(|limit| asset.size() <= limit) {
                    inline(asset, rule)?
                } else {
                    Emission::File {
                        output: self.asset_output(asset, name, output_path.as_deref()),
                    }
                }
            }
        };

        tracing::debug!(
            path = %asset.path.display(),
            rule = %rule.name,
            category = %category,
            inline = emission.is_inline(),
            "asset routed"
        );

        Ok(Some(RouteDecision {
            source: asset.path.clone(),
            rule: rule.name.clone(),
            category,
            transforms: rule.loader_names(),
            emission,
        }))
    }

    /// Path of the script bundle, relative to the output root.
    pub fn bundle_output(&self, build_hash: &str) -> PathBuf {
        self.merged_output(&self.config.output.filename, "js", build_hash)
    }

    fn merged_output(&self, template: &OutputTemplate, ext: &str, build_hash: &str) -> PathBuf {
        PathBuf::from(template.render(&TemplateContext {
            name: &self.config.output.chunk_name,
            ext,
            hash: build_hash,
            content_hash: build_hash,
            default_hash_length: self.config.hashing.default_length,
        }))
    }

    fn asset_output(
        &self,
        asset: &SourceAsset,
        name: &OutputTemplate,
        output_path: Option<&str>,
    ) -> PathBuf {
        let hash = content_hash(&asset.contents);
        let file_name = name.render(&TemplateContext {
            name: asset.name(),
            ext: asset.ext(),
            hash: &hash,
            content_hash: &hash,
            default_hash_length: self.config.hashing.default_length,
        });
        match output_path {
            Some(dir) if !dir.is_empty() => Path::new(dir).join(file_name),
            _ => PathBuf::from(file_name),
        }
    }
}

fn inline(asset: &SourceAsset, rule: &RouteRule) -> PipelineResult<Emission> {
    let mime = mime_type(asset.ext()).ok_or_else(|| {
        PipelineError::transform(
            &asset.path,
            rule.loader_names().join(" -> "),
            format!("no MIME type known for extension '{}'", asset.ext()),
        )
    })?;
    let data_uri = format!(
        "data:{mime};base64,{}",
        base64_engine.encode(&asset.contents)
    );
    Ok(Emission::Inline {
        mime: mime.to_string(),
        data_uri,
    })
}

/// MIME type for inlined media, by extension.
pub fn mime_type(ext: &str) -> Option<&'static str> {
    let mime = match ext.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        "svg" => "image/svg+xml",
        "eot" => "application/vnd.ms-fontobject",
        "ttf" => "font/ttf",
        "otf" => "font/otf",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        _ => return None,
    };
    Some(mime)
}
