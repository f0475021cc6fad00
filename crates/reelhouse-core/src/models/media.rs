use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::constants::{
    THUMBNAIL_CONTENT_TYPES, THUMBNAIL_FIELD, VIDEO_CONTENT_TYPES, VIDEO_FIELD,
};

/// Geometric orientation of a video, used as the storage key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrientationBucket {
    Landscape,
    Portrait,
    Other,
}

impl OrientationBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrientationBucket::Landscape => "landscape",
            OrientationBucket::Portrait => "portrait",
            OrientationBucket::Other => "other",
        }
    }
}

impl Display for OrientationBucket {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Which asset of a video an upload targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadKind {
    Video,
    Thumbnail,
}

impl UploadKind {
    /// Multipart field name carrying the file.
    pub fn field_name(&self) -> &'static str {
        match self {
            UploadKind::Video => VIDEO_FIELD,
            UploadKind::Thumbnail => THUMBNAIL_FIELD,
        }
    }

    pub fn accepted_content_types(&self) -> &'static [&'static str] {
        match self {
            UploadKind::Video => VIDEO_CONTENT_TYPES,
            UploadKind::Thumbnail => THUMBNAIL_CONTENT_TYPES,
        }
    }

    /// Capitalised noun used in client-facing messages ("Video is too large").
    pub fn label(&self) -> &'static str {
        match self {
            UploadKind::Video => "Video",
            UploadKind::Thumbnail => "Thumbnail",
        }
    }
}

/// A request-scoped upload payload. Never persisted beyond scratch storage.
#[derive(Debug, Clone)]
pub struct UploadedAsset {
    pub kind: UploadKind,
    pub filename: Option<String>,
    /// Declared media type, lowercased.
    pub content_type: String,
    pub data: Bytes,
}

impl UploadedAsset {
    pub fn new(kind: UploadKind, filename: Option<String>, content_type: &str, data: Bytes) -> Self {
        Self {
            kind,
            filename,
            content_type: content_type.trim().to_lowercase(),
            data,
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// File extension derived from the media subtype (`video/mp4` -> `mp4`).
    pub fn extension(&self) -> &str {
        self.content_type
            .rsplit('/')
            .next()
            .unwrap_or(self.content_type.as_str())
    }
}
