//! Fast-start remuxing via ffmpeg

use async_trait::async_trait;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::tool::{run_tool, validate_executable, ToolError};

/// Output path for a repackaged input: `<input>.processed`.
pub fn processed_path(input: &Path) -> PathBuf {
    let mut path = OsString::from(input.as_os_str());
    path.push(".processed");
    PathBuf::from(path)
}

/// Rewrites a container so playback metadata sits at the front of the file.
///
/// Implementations never modify the input and return the path of the file they
/// wrote. Callers publish and clean up that returned path; the ffmpeg adapter
/// uses [`processed_path`].
#[async_trait]
pub trait ContainerRepackager: Send + Sync {
    async fn repackage(&self, input: &Path) -> Result<PathBuf, ToolError>;
}

pub struct FfmpegRepackager {
    ffmpeg_path: String,
    timeout: Duration,
}

impl FfmpegRepackager {
    pub fn new(ffmpeg_path: impl Into<String>, timeout: Duration) -> Result<Self, ToolError> {
        let ffmpeg_path = ffmpeg_path.into();
        validate_executable("ffmpeg", &ffmpeg_path)?;
        Ok(Self {
            ffmpeg_path,
            timeout,
        })
    }
}

#[async_trait]
impl ContainerRepackager for FfmpegRepackager {
    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffmpeg",
        process.executable.path = %self.ffmpeg_path,
        ffmpeg.operation = "faststart"
    ))]
    async fn repackage(&self, input: &Path) -> Result<PathBuf, ToolError> {
        let start = std::time::Instant::now();
        let output = processed_path(input);

        // Stream copy only; codecs are never touched.
        let args: [&OsStr; 12] = [
            OsStr::new("-nostdin"),
            OsStr::new("-i"),
            input.as_os_str(),
            OsStr::new("-movflags"),
            OsStr::new("faststart"),
            OsStr::new("-map_metadata"),
            OsStr::new("0"),
            OsStr::new("-codec"),
            OsStr::new("copy"),
            OsStr::new("-f"),
            OsStr::new("mp4"),
            output.as_os_str(),
        ];

        run_tool("ffmpeg", &self.ffmpeg_path, args, self.timeout).await?;

        if !tokio::fs::try_exists(&output).await.unwrap_or(false) {
            return Err(ToolError::MissingOutput {
                tool: "ffmpeg",
                path: output.display().to_string(),
            });
        }

        tracing::info!(
            output = %output.display(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Fast-start repackaging completed"
        );

        Ok(output)
    }
}
