use std::fs;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::domain::errors::{PipelineError, PipelineResult};
use crate::domain::models::SourceAsset;

const WALK_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: true,
};

/// Collects the source assets of a project.
///
/// Every regular file below the configured source directories is read into a
/// [`SourceAsset`] whose path is relative to the project root. Hidden files
/// are skipped. Directories that do not exist contribute nothing.
#[derive(Debug, Clone)]
pub struct ProjectScanner {
    root: PathBuf,
    source_dirs: Vec<PathBuf>,
}

impl ProjectScanner {
    pub fn new(root: impl Into<PathBuf>, source_dirs: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            root: root.into(),
            source_dirs: source_dirs.into_iter().collect(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scan all source directories, sorted by relative path.
    #[tracing::instrument(skip(self), fields(root = %self.root.display()))]
    pub fn scan(&self) -> PipelineResult<Vec<SourceAsset>> {
        let mut assets = Vec::new();
        for dir in &self.source_dirs {
            for path in self.files_under(dir)? {
                let contents = fs::read(&path).map_err(|e| PipelineError::from_io(&path, e))?;
                let relative = path.strip_prefix(&self.root).unwrap_or(&path).to_path_buf();
                assets.push(SourceAsset::new(relative, contents));
            }
        }

        assets.sort_by(|a, b| a.path.cmp(&b.path));
        assets.dedup_by(|a, b| a.path == b.path);
        tracing::debug!(count = assets.len(), "project scanned");
        Ok(assets)
    }

    fn files_under(&self, dir: &Path) -> PipelineResult<Vec<PathBuf>> {
        let base = self.root.join(dir);
        let pattern = format!("{}/**/*", Pattern::escape(&base.to_string_lossy()));

        let entries = glob::glob_with(&pattern, WALK_OPTIONS).map_err(|e| {
            PipelineError::transform(&base, "scan", format!("invalid scan pattern: {e}"))
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| {
                let path = e.path().to_path_buf();
                PipelineError::from_io(path, e.into_error())
            })?;
            if path.is_file() {
                files.push(path);
            }
        }
        Ok(files)
    }
}

/// Read a project-relative file as UTF-8 text.
pub fn read_project_file(root: &Path, relative: &Path) -> PipelineResult<String> {
    let path = root.join(relative);
    fs::read_to_string(&path).map_err(|e| PipelineError::from_io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/styles")).unwrap();
        fs::create_dir_all(root.join("static/js")).unwrap();
        fs::write(root.join("src/index.js"), "console.log(1);").unwrap();
        fs::write(root.join("src/styles/main.scss"), "body {}").unwrap();
        fs::write(root.join("src/.hidden"), "x").unwrap();
        fs::write(root.join("static/js/vendor.js"), "vendor").unwrap();
        fs::write(root.join("README.md"), "not scanned").unwrap();
        dir
    }

    #[test]
    fn test_scan_collects_relative_paths() {
        let dir = project();
        let scanner =
            ProjectScanner::new(dir.path(), [PathBuf::from("src"), PathBuf::from("static")]);
        let assets = scanner.scan().unwrap();

        let paths: Vec<_> = assets.iter().map(|a| a.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("src/index.js"),
                PathBuf::from("src/styles/main.scss"),
                PathBuf::from("static/js/vendor.js"),
            ]
        );
        assert_eq!(assets[0].contents, b"console.log(1);");
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = project();
        let scanner = ProjectScanner::new(dir.path(), [PathBuf::from("assets")]);
        assert!(scanner.scan().unwrap().is_empty());
    }

    #[test]
    fn test_overlapping_directories_dedup() {
        let dir = project();
        let scanner =
            ProjectScanner::new(dir.path(), [PathBuf::from("src"), PathBuf::from("src/styles")]);
        assert_eq!(scanner.scan().unwrap().len(), 2);
    }

    #[test]
    fn test_read_project_file() {
        let dir = project();
        let text = read_project_file(dir.path(), Path::new("README.md")).unwrap();
        assert_eq!(text, "not scanned");

        let err = read_project_file(dir.path(), Path::new("missing.html")).unwrap_err();
        assert!(matches!(err, PipelineError::FileNotFound(_)));
    }
}
