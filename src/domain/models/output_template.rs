//! Output path templates such as `bundle.[hash:6].js`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::errors::ConfigurationError;

/// Longest hash prefix a template may request (a full SHA-256 hex digest).
pub const MAX_HASH_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Name,
    Ext,
    Hash(Option<usize>),
    ContentHash(Option<usize>),
}

/// Values substituted into an [`OutputTemplate`].
#[derive(Debug, Clone, Copy)]
pub struct TemplateContext<'a> {
    /// File stem or chunk name.
    pub name: &'a str,
    /// Extension without the leading dot.
    pub ext: &'a str,
    /// Value of `[hash]`: the build hash for bundles, the content hash for assets.
    pub hash: &'a str,
    /// Value of `[contenthash]`.
    pub content_hash: &'a str,
    /// Length used when a hash placeholder has no explicit length.
    pub default_hash_length: usize,
}

/// A parsed output path template.
///
/// Supported placeholders: `[name]`, `[ext]`, `[hash]`, `[hash:N]`,
/// `[contenthash]` and `[contenthash:N]`.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OutputTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl OutputTemplate {
    pub fn parse(raw: &str) -> Result<Self, ConfigurationError> {
        let invalid = |reason: String| ConfigurationError::InvalidTemplate {
            template: raw.to_string(),
            reason,
        };

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = raw;

        while let Some(open) = rest.find('[') {
            literal.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let close = after
                .find(']')
                .ok_or_else(|| invalid(format!("unterminated placeholder at byte {open}")))?;
            let token = &after[..close];

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(parse_placeholder(token).map_err(invalid)?);
            rest = &after[close + 1..];
        }
        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        if segments.is_empty() {
            return Err(invalid("template is empty".to_string()));
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn render(&self, ctx: &TemplateContext<'_>) -> String {
        let mut out = String::with_capacity(self.raw.len() + 16);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Name => out.push_str(ctx.name),
                Segment::Ext => out.push_str(ctx.ext),
                Segment::Hash(len) => {
                    out.push_str(truncate(ctx.hash, len.unwrap_or(ctx.default_hash_length)));
                }
                Segment::ContentHash(len) => out.push_str(truncate(
                    ctx.content_hash,
                    len.unwrap_or(ctx.default_hash_length),
                )),
            }
        }
        out
    }
}

fn parse_placeholder(token: &str) -> Result<Segment, String> {
    let (key, length) = match token.split_once(':') {
        Some((key, len)) => {
            let len: usize = len
                .parse()
                .map_err(|_| format!("invalid hash length '{len}'"))?;
            if len == 0 || len > MAX_HASH_LENGTH {
                return Err(format!(
                    "hash length {len} out of range 1..={MAX_HASH_LENGTH}"
                ));
            }
            (key, Some(len))
        }
        None => (token, None),
    };

    match (key, length) {
        ("name", None) => Ok(Segment::Name),
        ("ext", None) => Ok(Segment::Ext),
        ("hash", len) => Ok(Segment::Hash(len)),
        ("contenthash", len) => Ok(Segment::ContentHash(len)),
        ("name" | "ext", Some(_)) => Err(format!("[{key}] does not take a length")),
        _ => Err(format!("unknown placeholder [{token}]")),
    }
}

fn truncate(hash: &str, len: usize) -> &str {
    hash.get(..len).unwrap_or(hash)
}

impl TryFrom<String> for OutputTemplate {
    type Error = ConfigurationError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(&raw)
    }
}

impl From<OutputTemplate> for String {
    fn from(template: OutputTemplate) -> Self {
        template.raw
    }
}

impl PartialEq for OutputTemplate {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for OutputTemplate {}

impl fmt::Debug for OutputTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OutputTemplate").field(&self.raw).finish()
    }
}

impl fmt::Display for OutputTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";
    const CONTENT: &str = "fedcba9876543210fedcba9876543210fedcba9876543210fedcba9876543210";

    fn ctx<'a>(name: &'a str, ext: &'a str) -> TemplateContext<'a> {
        TemplateContext {
            name,
            ext,
            hash: HASH,
            content_hash: CONTENT,
            default_hash_length: 20,
        }
    }

    #[test]
    fn test_bundle_template() {
        let template = OutputTemplate::parse("bundle.[hash:6].js").unwrap();
        assert_eq!(template.render(&ctx("main", "js")), "bundle.012345.js");
    }

    #[test]
    fn test_asset_template() {
        let template = OutputTemplate::parse("[name]_[hash:6].[ext]").unwrap();
        assert_eq!(template.render(&ctx("logo", "png")), "logo_012345.png");
    }

    #[test]
    fn test_default_hash_length() {
        let template = OutputTemplate::parse("[name].[contenthash].css").unwrap();
        assert_eq!(
            template.render(&ctx("main", "css")),
            "main.fedcba9876543210fedc.css"
        );
    }

    #[test]
    fn test_plain_template() {
        let template = OutputTemplate::parse("index.html").unwrap();
        assert_eq!(template.render(&ctx("x", "y")), "index.html");
    }

    #[test]
    fn test_rejects_unknown_placeholder() {
        let err = OutputTemplate::parse("[chunkhash].js").unwrap_err();
        assert!(err.to_string().contains("unknown placeholder [chunkhash]"));
    }

    #[test]
    fn test_rejects_bad_lengths() {
        assert!(OutputTemplate::parse("[hash:0].js").is_err());
        assert!(OutputTemplate::parse("[hash:65].js").is_err());
        assert!(OutputTemplate::parse("[hash:x].js").is_err());
        assert!(OutputTemplate::parse("[name:3].js").is_err());
    }

    #[test]
    fn test_rejects_unterminated_and_empty() {
        assert!(OutputTemplate::parse("bundle.[hash").is_err());
        assert!(OutputTemplate::parse("").is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: OutputTemplate = serde_yaml::from_str("'css/[name].[hash:6].css'").unwrap();
        assert_eq!(ok.as_str(), "css/[name].[hash:6].css");
        assert!(serde_yaml::from_str::<OutputTemplate>("'[bogus]'").is_err());
    }
}
