//! In-process stand-ins for ffprobe and ffmpeg.

use async_trait::async_trait;
use reelhouse_processing::video::processed_path;
use reelhouse_processing::{ContainerRepackager, MediaProber, ToolError, VideoGeometry};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Geometry comes from the payload prefix: `portrait` → 1080x1920,
/// `square` → 720x720, `corrupt` → tool failure, anything else 1920x1080.
pub struct FakeProber {
    calls: AtomicUsize,
}

impl FakeProber {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaProber for FakeProber {
    async fn probe(&self, path: &Path) -> Result<VideoGeometry, ToolError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let data = tokio::fs::read(path).await.map_err(|source| ToolError::Spawn {
            tool: "ffprobe",
            source,
        })?;

        let (width, height) = if data.starts_with(b"portrait") {
            (1080, 1920)
        } else if data.starts_with(b"square") {
            (720, 720)
        } else if data.starts_with(b"corrupt") {
            return Err(ToolError::NonZeroExit {
                tool: "ffprobe",
                status: "exit status: 1".to_string(),
                stderr: "moov atom not found".to_string(),
            });
        } else {
            (1920, 1080)
        };
        Ok(VideoGeometry { width, height })
    }
}

/// Writes `faststart:` + input to `<input>.processed`.
pub struct FakeRepackager;

#[async_trait]
impl ContainerRepackager for FakeRepackager {
    async fn repackage(&self, input: &Path) -> Result<PathBuf, ToolError> {
        let output = processed_path(input);
        let mut data = b"faststart:".to_vec();
        data.extend(tokio::fs::read(input).await.map_err(|source| ToolError::Spawn {
            tool: "ffmpeg",
            source,
        })?);
        tokio::fs::write(&output, data)
            .await
            .map_err(|source| ToolError::Spawn {
                tool: "ffmpeg",
                source,
            })?;
        Ok(output)
    }
}
