//! Working-area staging
//!
//! Materializes submitted source into a fresh uniquely-named temporary
//! directory. Removal is tied to the value's lifetime, so every exit path of
//! a run, including errors and panics, releases the directory.

use std::path::Path;

use tempfile::TempDir;
use tracing::{debug, instrument};

use crate::runner::RunError;

/// Per-request ephemeral directory holding the staged source and whatever
/// build artifacts the toolchain leaves behind.
#[derive(Debug)]
pub struct WorkArea {
    dir: TempDir,
}

impl WorkArea {
    /// Create a fresh working area and write `source` into `source_name`
    #[instrument(skip(source))]
    pub async fn stage(source: &str, source_name: &str) -> Result<Self, RunError> {
        let dir = tempfile::Builder::new()
            .prefix("playpen-")
            .tempdir()
            .map_err(RunError::Workspace)?;

        let source_path = dir.path().join(source_name);
        tokio::fs::write(&source_path, source)
            .await
            .map_err(RunError::WriteSource)?;

        debug!(path = %dir.path().display(), len = source.len(), "staged source");

        Ok(Self { dir })
    }

    /// Path to the working directory
    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
