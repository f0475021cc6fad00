//! Video record repositories

pub mod memory;
pub mod video;

pub use memory::InMemoryVideoStore;
pub use video::PgVideoRepository;

use async_trait::async_trait;
use reelhouse_core::{models::VideoRecord, AppError};
use uuid::Uuid;

/// Lookup and column-scoped writes of video records.
///
/// Each pipeline owns exactly one URL column and commits it with a single
/// targeted write, so a video ingest and a thumbnail upload racing on the same
/// record never overwrite each other's column.
#[async_trait]
pub trait VideoStore: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<VideoRecord>, AppError>;

    /// Set `video_url` and bump `updated_at`, returning the stored record.
    /// Fails with `NotFound` if the record no longer exists.
    async fn set_video_url(&self, id: Uuid, url: &str) -> Result<VideoRecord, AppError>;

    /// Same as [`VideoStore::set_video_url`] for `thumbnail_url`.
    async fn set_thumbnail_url(&self, id: Uuid, url: &str) -> Result<VideoRecord, AppError>;

    async fn insert(&self, video: &VideoRecord) -> Result<(), AppError>;
}
