//! Stream geometry extraction via ffprobe

use async_trait::async_trait;
use serde::Deserialize;
use std::ffi::OsStr;
use std::path::Path;
use std::time::Duration;

use crate::tool::{run_tool, validate_executable, ToolError};

/// Pixel dimensions of the first video stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoGeometry {
    pub width: u32,
    pub height: u32,
}

const FFPROBE_ARGS: &[&str] = &[
    "-v",
    "error",
    "-select_streams",
    "v:0",
    "-show_entries",
    "stream=width,height",
    "-of",
    "json",
];

#[async_trait]
pub trait MediaProber: Send + Sync {
    async fn probe(&self, path: &Path) -> Result<VideoGeometry, ToolError>;
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    width: Option<u32>,
    height: Option<u32>,
}

/// Parse `ffprobe -of json -show_entries stream=width,height` output.
pub fn parse_probe_output(stdout: &[u8]) -> Result<VideoGeometry, ToolError> {
    let output: ProbeOutput = serde_json::from_slice(stdout).map_err(|e| ToolError::Parse {
        tool: "ffprobe",
        message: e.to_string(),
    })?;

    let stream = output.streams.first().ok_or(ToolError::NoStreams)?;
    match (stream.width, stream.height) {
        (Some(width), Some(height)) => Ok(VideoGeometry { width, height }),
        _ => Err(ToolError::Parse {
            tool: "ffprobe",
            message: "stream is missing width or height".to_string(),
        }),
    }
}

pub struct FfprobeProber {
    ffprobe_path: String,
    timeout: Duration,
}

impl FfprobeProber {
    pub fn new(ffprobe_path: impl Into<String>, timeout: Duration) -> Result<Self, ToolError> {
        let ffprobe_path = ffprobe_path.into();
        validate_executable("ffprobe", &ffprobe_path)?;
        Ok(Self {
            ffprobe_path,
            timeout,
        })
    }
}

#[async_trait]
impl MediaProber for FfprobeProber {
    #[tracing::instrument(skip(self), fields(
        process.executable.name = "ffprobe",
        process.executable.path = %self.ffprobe_path,
        ffmpeg.operation = "probe"
    ))]
    async fn probe(&self, path: &Path) -> Result<VideoGeometry, ToolError> {
        let start = std::time::Instant::now();

        let mut args: Vec<&OsStr> = FFPROBE_ARGS.iter().copied().map(OsStr::new).collect();
        args.push(path.as_os_str());

        let output = run_tool("ffprobe", &self.ffprobe_path, args, self.timeout).await?;

        let geometry = parse_probe_output(&output.stdout)?;

        tracing::info!(
            width = geometry.width,
            height = geometry.height,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Video probe completed"
        );

        Ok(geometry)
    }
}
