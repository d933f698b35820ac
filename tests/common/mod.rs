//! Common test utilities for integration tests
//!
//! Provides shared fixtures and helpers used across multiple integration test files.

use std::fs;
use std::path::{Path, PathBuf};

use packplan::domain::models::{DeclarationTable, EnvironmentDeclaration};
use serde_json::json;
use tempfile::TempDir;

/// Create a temporary directory for test isolation
///
/// Returns a TempDir that will be cleaned up when dropped.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Root of the demo project shipped with the crate
#[allow(dead_code)]
pub fn demo_site() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/site")
}

/// Declaration table with distinct `dev` and `build` template variables
#[allow(dead_code)]
pub fn declarations() -> DeclarationTable {
    let mut dev = EnvironmentDeclaration::default();
    dev.template.insert("title".to_string(), json!("Dev"));
    dev.template.insert("header".to_string(), json!(false));

    let mut build = EnvironmentDeclaration::default();
    build.template.insert("title".to_string(), json!("Build"));
    build
        .template
        .insert("header".to_string(), json!("//cdn.example.com/header.js"));

    DeclarationTable::new()
        .with_entry("dev", dev)
        .with_entry("build", build)
}

/// Write `contents` to `root/relative`, creating parent directories
#[allow(dead_code)]
pub fn write_file(root: &Path, relative: &str, contents: impl AsRef<[u8]>) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent dir");
    }
    fs::write(path, contents).expect("Failed to write file");
}

/// Route `packplan` debug events to the test harness output
///
/// Safe to call from every test; only the first call installs a subscriber.
#[allow(dead_code)]
pub fn capture_planner_logs() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::new("packplan=debug"))
        .with_target(false)
        .try_init();
}
