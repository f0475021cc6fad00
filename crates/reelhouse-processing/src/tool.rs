//! Subprocess plumbing shared by the ffprobe and ffmpeg adapters.

use std::ffi::OsStr;
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;

use reelhouse_core::constants::SHELL_METACHARACTERS;

/// External tool failures
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Invalid {tool} path: {path}")]
    InvalidPath { tool: &'static str, path: String },

    #[error("Failed to execute {tool}: {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} failed ({status}): {stderr}")]
    NonZeroExit {
        tool: &'static str,
        status: String,
        stderr: String,
    },

    #[error("{tool} timed out after {timeout_secs:.1}s")]
    Timeout { tool: &'static str, timeout_secs: f64 },

    #[error("Failed to parse {tool} output: {message}")]
    Parse { tool: &'static str, message: String },

    #[error("{tool} exited cleanly but wrote no output at {path}")]
    MissingOutput { tool: &'static str, path: String },

    #[error("No video stream found")]
    NoStreams,
}

impl From<ToolError> for reelhouse_core::AppError {
    fn from(err: ToolError) -> Self {
        reelhouse_core::AppError::MediaProcessing(err.to_string())
    }
}

/// Reject executable paths containing shell metacharacters.
pub(crate) fn validate_executable(tool: &'static str, path: &str) -> Result<(), ToolError> {
    if path.is_empty() || path.contains(SHELL_METACHARACTERS) {
        return Err(ToolError::InvalidPath {
            tool,
            path: path.to_string(),
        });
    }
    Ok(())
}

/// Run `program` to completion, capturing stdout and stderr.
///
/// The child gets a null stdin and is killed if `timeout` elapses or the
/// returned future is dropped. A non-zero exit status is an error carrying
/// the captured stderr.
pub(crate) async fn run_tool<I, S>(
    tool: &'static str,
    program: &str,
    args: I,
    timeout: Duration,
) -> Result<Output, ToolError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let start = std::time::Instant::now();

    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| ToolError::Spawn { tool, source })?;

    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(result) => result.map_err(|source| ToolError::Spawn { tool, source })?,
        Err(_) => {
            tracing::error!(
                tool = tool,
                timeout_secs = timeout.as_secs_f64(),
                "Media tool timed out, child killed"
            );
            return Err(ToolError::Timeout {
                tool,
                timeout_secs: timeout.as_secs_f64(),
            });
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        tracing::error!(
            tool = tool,
            status = %output.status,
            stderr = %stderr,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Media tool failed"
        );
        return Err(ToolError::NonZeroExit {
            tool,
            status: output.status.to_string(),
            stderr,
        });
    }

    tracing::debug!(
        tool = tool,
        duration_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Media tool finished"
    );

    Ok(output)
}
