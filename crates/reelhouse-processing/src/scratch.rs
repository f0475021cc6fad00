//! Request-scoped scratch files
//!
//! Every file created here is removed when its [`ScratchFile`] guard is
//! dropped, so early returns, tool failures and cancelled requests all clean
//! up after themselves.

use std::io;
use std::path::{Path, PathBuf};
use tempfile::TempPath;
use uuid::Uuid;

/// Directory holding in-flight uploads.
#[derive(Debug, Clone)]
pub struct ScratchDir {
    root: PathBuf,
}

impl ScratchDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Create the directory if it does not exist yet.
    pub async fn ensure(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Write `data` to a new file named `{video_id}-{random}.{extension}`.
    ///
    /// The name is reserved with an exclusive create, so concurrent requests
    /// (even for the same video) never share a file.
    pub async fn persist(
        &self,
        video_id: Uuid,
        extension: &str,
        data: &[u8],
    ) -> io::Result<ScratchFile> {
        let file = tempfile::Builder::new()
            .prefix(&format!("{}-", video_id))
            .suffix(&format!(".{}", extension))
            .tempfile_in(&self.root)?;
        let scratch = ScratchFile {
            path: file.into_temp_path(),
        };

        tokio::fs::write(scratch.path(), data).await?;

        tracing::debug!(
            video_id = %video_id,
            path = %scratch.path().display(),
            size_bytes = data.len(),
            "Scratch file written"
        );

        Ok(scratch)
    }
}

/// A scratch file deleted on drop.
#[derive(Debug)]
pub struct ScratchFile {
    path: TempPath,
}

impl ScratchFile {
    /// Take ownership of a path another component is about to write, so it is
    /// removed even if that component fails halfway.
    pub fn adopt(path: impl Into<PathBuf>) -> Self {
        Self {
            path: TempPath::from_path(path),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the file now, reporting failure. A file that was never created
    /// counts as deleted.
    pub fn close(self) -> io::Result<()> {
        match self.path.close() {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }

    /// Delete the file now, logging instead of failing.
    pub fn discard(self) {
        let path = self.path().to_path_buf();
        if let Err(e) = self.close() {
            tracing::warn!(error = %e, path = %path.display(), "Failed to remove scratch file");
        }
    }
}
