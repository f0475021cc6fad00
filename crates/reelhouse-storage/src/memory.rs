use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;
use uuid::Uuid;

use crate::cache::{AssetCache, CachedAsset};
use crate::keys::StorageKey;
use crate::traits::{PublishRequest, Publisher, StorageResult};

/// Keeps published bytes in the [`AssetCache`] and hands out a URL on this
/// server's `/api/thumbnails/{video_id}` route.
///
/// Publishing again for the same video replaces the cached bytes, so
/// unpublishing drops whatever is cached for the video. The storage key is
/// not used.
pub struct MemoryPublisher {
    cache: Arc<AssetCache>,
    public_base_url: String,
}

impl MemoryPublisher {
    pub fn new(cache: Arc<AssetCache>, public_base_url: impl Into<String>) -> Self {
        Self {
            cache,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl Publisher for MemoryPublisher {
    async fn publish(&self, request: PublishRequest) -> StorageResult<String> {
        let data = tokio::fs::read(&request.local_path).await?;
        let size = data.len();

        self.cache.insert(
            request.video_id,
            CachedAsset {
                content_type: request.content_type,
                data: Bytes::from(data),
            },
        );

        tracing::info!(
            video_id = %request.video_id,
            size_bytes = size,
            "Asset stored in memory cache"
        );

        Ok(format!(
            "{}/api/thumbnails/{}",
            self.public_base_url, request.video_id
        ))
    }

    async fn unpublish(&self, video_id: Uuid, _key: &StorageKey) -> StorageResult<()> {
        if self.cache.remove(&video_id).is_some() {
            tracing::info!(video_id = %video_id, "Asset removed from memory cache");
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
