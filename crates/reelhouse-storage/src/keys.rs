//! Shared key generation for published assets.
//!
//! Key format: `{prefix}/{32 lowercase hex chars}.{extension}`.

use rand::Rng;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::traits::{StorageError, StorageResult};

/// Prefix used for thumbnail keys.
pub const THUMBNAIL_PREFIX: &str = "thumbnails";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

fn is_key_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

impl StorageKey {
    /// Generate a fresh key under `prefix` with a random 128-bit identifier.
    ///
    /// Both `prefix` and `extension` must be a single path segment made of
    /// ASCII alphanumerics, `-` or `_`.
    pub fn generate(prefix: &str, extension: &str) -> StorageResult<Self> {
        if !is_key_segment(prefix) {
            return Err(StorageError::InvalidKey(format!(
                "Invalid key prefix: {:?}",
                prefix
            )));
        }
        if !is_key_segment(extension) {
            return Err(StorageError::InvalidKey(format!(
                "Invalid key extension: {:?}",
                extension
            )));
        }

        let mut id = [0u8; 16];
        rand::rng().fill(&mut id);

        Ok(StorageKey(format!(
            "{}/{}.{}",
            prefix,
            hex::encode(id),
            extension.to_lowercase()
        )))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The leading path segment (orientation bucket or `thumbnails`).
    pub fn prefix(&self) -> &str {
        self.0.split('/').next().unwrap_or_default()
    }
}

impl Display for StorageKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
