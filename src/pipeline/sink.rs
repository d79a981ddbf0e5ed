//! Artifact persistence

use crate::models::DocumentKind;
use crate::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Destination for generated documents
pub trait ArtifactSink: Send + Sync {
    /// Write `content` for `kind`, returning where it landed
    fn persist(&self, kind: DocumentKind, content: &str) -> Result<PathBuf>;
}

/// Writes each document as `<kind>.md` under a directory
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Sink rooted at the process working directory
    pub fn current_dir() -> Result<Self> {
        let root = std::env::current_dir().context("Failed to get current directory")?;
        Ok(Self::new(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ArtifactSink for DirectorySink {
    fn persist(&self, kind: DocumentKind, content: &str) -> Result<PathBuf> {
        let path = self.root.join(kind.file_name());
        std::fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        debug!(kind = %kind, path = %path.display(), bytes = content.len(), "artifact persisted");
        Ok(path)
    }
}
