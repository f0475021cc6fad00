use async_trait::async_trait;
use reelhouse_core::{models::VideoRecord, AppError};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::VideoStore;

/// Process-local video store used when no `DATABASE_URL` is configured.
#[derive(Default)]
pub struct InMemoryVideoStore {
    videos: RwLock<HashMap<Uuid, VideoRecord>>,
}

impl InMemoryVideoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.videos.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl VideoStore for InMemoryVideoStore {
    async fn get(&self, id: Uuid) -> Result<Option<VideoRecord>, AppError> {
        Ok(self.videos.read().await.get(&id).cloned())
    }

    async fn set_video_url(&self, id: Uuid, url: &str) -> Result<VideoRecord, AppError> {
        let mut videos = self.videos.write().await;
        let existing = videos
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound("Couldn't find video".to_string()))?;
        existing.set_video_url(url.to_string());
        Ok(existing.clone())
    }

    async fn set_thumbnail_url(&self, id: Uuid, url: &str) -> Result<VideoRecord, AppError> {
        let mut videos = self.videos.write().await;
        let existing = videos
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound("Couldn't find video".to_string()))?;
        existing.set_thumbnail_url(url.to_string());
        Ok(existing.clone())
    }

    async fn insert(&self, video: &VideoRecord) -> Result<(), AppError> {
        let mut videos = self.videos.write().await;
        if videos.contains_key(&video.id) {
            return Err(AppError::BadRequest(format!(
                "Video {} already exists",
                video.id
            )));
        }
        videos.insert(video.id, video.clone());
        Ok(())
    }
}
