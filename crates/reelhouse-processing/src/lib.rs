//! Reelhouse Processing Library
//!
//! The upload ingestion pipeline: validation, scratch files, ffprobe/ffmpeg
//! adapters, orientation classification and the orchestrators that drive them
//! for videos and thumbnails.

mod access;
mod commit;
pub mod orientation;
pub mod scratch;
#[cfg(test)]
mod test_support;
pub mod thumbnail;
pub mod tool;
pub mod validator;
pub mod video;

// Re-export commonly used types
pub use orientation::classify_orientation;
pub use scratch::{ScratchDir, ScratchFile};
pub use thumbnail::ThumbnailService;
pub use tool::ToolError;
pub use validator::{UploadValidator, ValidationError};
pub use video::{
    ContainerRepackager, FfmpegRepackager, FfprobeProber, IngestionOrchestrator, MediaProber,
    VideoGeometry,
};
