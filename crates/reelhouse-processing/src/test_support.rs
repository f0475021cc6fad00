//! Failure-injecting doubles shared by the pipeline tests.

use async_trait::async_trait;
use reelhouse_core::{models::VideoRecord, AppError};
use reelhouse_db::{InMemoryVideoStore, VideoStore};
use reelhouse_storage::{PublishRequest, Publisher, StorageError, StorageKey, StorageResult};
use std::sync::Arc;
use uuid::Uuid;

/// Reads go through; every URL commit fails as if the database dropped.
pub(crate) struct FailingCommitStore(pub Arc<InMemoryVideoStore>);

#[async_trait]
impl VideoStore for FailingCommitStore {
    async fn get(&self, id: Uuid) -> Result<Option<VideoRecord>, AppError> {
        self.0.get(id).await
    }

    async fn set_video_url(&self, _id: Uuid, _url: &str) -> Result<VideoRecord, AppError> {
        Err(AppError::Internal("connection reset by peer".to_string()))
    }

    async fn set_thumbnail_url(&self, _id: Uuid, _url: &str) -> Result<VideoRecord, AppError> {
        Err(AppError::Internal("connection reset by peer".to_string()))
    }

    async fn insert(&self, video: &VideoRecord) -> Result<(), AppError> {
        self.0.insert(video).await
    }
}

pub(crate) struct RejectingPublisher;

#[async_trait]
impl Publisher for RejectingPublisher {
    async fn publish(&self, _request: PublishRequest) -> StorageResult<String> {
        Err(StorageError::UploadFailed("AccessDenied".to_string()))
    }

    async fn unpublish(&self, _video_id: Uuid, _key: &StorageKey) -> StorageResult<()> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "rejecting"
    }
}
