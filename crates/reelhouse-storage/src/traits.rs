//! Publisher abstraction trait
//!
//! This module defines the Publisher trait that all publication strategies implement.

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

use crate::keys::StorageKey;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for reelhouse_core::AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(key) => {
                reelhouse_core::AppError::NotFound(format!("Stored file not found: {}", key))
            }
            other => reelhouse_core::AppError::Storage(other.to_string()),
        }
    }
}

/// A finished local file ready to be made reachable.
#[derive(Debug, Clone)]
pub struct PublishRequest {
    /// Video the asset belongs to.
    pub video_id: Uuid,
    pub key: StorageKey,
    pub local_path: PathBuf,
    pub content_type: String,
}

/// Publication strategy
///
/// Implementations read the file at `local_path` and return a URL under which
/// its bytes can be fetched. Publishing the same key twice overwrites.
/// Implementations never delete `local_path`; the caller owns it.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, request: PublishRequest) -> StorageResult<String>;

    /// Withdraw an asset published for `video_id` under `key`. Used when the
    /// record commit that would have referenced it fails. Withdrawing
    /// something that is already gone succeeds.
    async fn unpublish(&self, video_id: Uuid, key: &StorageKey) -> StorageResult<()>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}
