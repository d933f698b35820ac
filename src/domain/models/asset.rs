use std::path::{Path, PathBuf};

/// A source file as seen by the planner: project-relative path plus contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceAsset {
    pub path: PathBuf,
    pub contents: Vec<u8>,
}

impl SourceAsset {
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }

    pub fn size(&self) -> u64 {
        self.contents.len() as u64
    }

    /// File stem, used for `[name]`.
    pub fn name(&self) -> &str {
        self.path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
    }

    /// Extension without the dot, used for `[ext]`.
    pub fn ext(&self) -> &str {
        extension(&self.path)
    }
}

pub(crate) fn extension(path: &Path) -> &str {
    path.extension()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_and_ext() {
        let asset = SourceAsset::new("src/img/logo.min.png", vec![0u8; 4]);
        assert_eq!(asset.name(), "logo.min");
        assert_eq!(asset.ext(), "png");
        assert_eq!(asset.size(), 4);
    }

    #[test]
    fn test_no_extension() {
        let asset = SourceAsset::new("LICENSE", Vec::new());
        assert_eq!(asset.name(), "LICENSE");
        assert_eq!(asset.ext(), "");
    }
}
