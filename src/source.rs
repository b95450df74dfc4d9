//! Initial manifest providers
//!
//! The controller does not care where its first manifest comes from; it
//! only needs the text. Providers are loaded once, at session start.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Sample manifest compiled into the binary
pub const SAMPLE_MANIFEST: &str = include_str!("../samples/sample-manifest.json");

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Failed to read manifest {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Supplies the text of the initial manifest
pub trait InitialManifest {
    fn load(&self) -> Result<String, SourceError>;

    /// Label for logs
    fn describe(&self) -> String;
}

/// The bundled sample manifest
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledSample;

impl InitialManifest for BundledSample {
    fn load(&self) -> Result<String, SourceError> {
        Ok(SAMPLE_MANIFEST.to_string())
    }

    fn describe(&self) -> String {
        "bundled sample".to_string()
    }
}

/// A manifest read from disk
#[derive(Debug, Clone)]
pub struct ManifestFile {
    path: PathBuf,
}

impl ManifestFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl InitialManifest for ManifestFile {
    fn load(&self) -> Result<String, SourceError> {
        fs::read_to_string(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Literal text, mostly for tests and piped input
#[derive(Debug, Clone)]
pub struct InlineText(pub String);

impl InitialManifest for InlineText {
    fn load(&self) -> Result<String, SourceError> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        "inline text".to_string()
    }
}
