//! Manifest and session fixtures shared by the integration tests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Path to a fixture manifest
pub fn manifest_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/manifests")
        .join(name)
}

/// Path to a session script
pub fn session_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/sessions")
        .join(name)
}

/// Read a fixture manifest as text
pub fn manifest_text(name: &str) -> String {
    let path = manifest_path(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("fixture {}: {}", path.display(), e))
}
