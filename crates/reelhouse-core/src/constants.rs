//! Shared constants

/// Path prefix for all API routes.
pub const API_PREFIX: &str = "/api";

/// Maximum accepted video payload (1 GiB).
pub const MAX_VIDEO_UPLOAD_BYTES: usize = 1 << 30;

/// Maximum accepted thumbnail payload (10 MiB).
pub const MAX_THUMBNAIL_UPLOAD_BYTES: usize = 10 << 20;

/// Multipart field carrying the video file.
pub const VIDEO_FIELD: &str = "video";

/// Multipart field carrying the thumbnail file.
pub const THUMBNAIL_FIELD: &str = "thumbnail";

pub const VIDEO_CONTENT_TYPES: &[&str] = &["video/mp4"];
pub const THUMBNAIL_CONTENT_TYPES: &[&str] = &["image/jpeg", "image/png"];

/// Default timeout applied to every ffprobe/ffmpeg invocation.
pub const DEFAULT_MEDIA_TOOL_TIMEOUT_SECS: u64 = 300;

/// Characters that must never appear in an executable path handed to `Command`.
pub const SHELL_METACHARACTERS: &[char] = &[';', '|', '&', '$', '`', '(', ')', '<', '>', '\n', '\r'];
