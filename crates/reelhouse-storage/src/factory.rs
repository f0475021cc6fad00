use reelhouse_core::{Config, PublisherKind, StorageBackend};
use std::sync::Arc;

use crate::cache::AssetCache;
use crate::data_url::DataUrlPublisher;
use crate::memory::MemoryPublisher;
use crate::object::ObjectStorePublisher;
use crate::traits::{Publisher, StorageError, StorageResult};

async fn create_object_store_publisher(config: &Config) -> StorageResult<ObjectStorePublisher> {
    let storage = &config.storage;

    match storage.backend {
        StorageBackend::S3 => {
            let bucket = storage
                .s3_bucket
                .clone()
                .ok_or_else(|| StorageError::ConfigError("S3_BUCKET not configured".to_string()))?;
            let region = storage.region().map(String::from).ok_or_else(|| {
                StorageError::ConfigError("S3_REGION or AWS_REGION not configured".to_string())
            })?;

            ObjectStorePublisher::s3(bucket, region, storage.s3_endpoint.clone())
        }
        StorageBackend::Local => {
            let base_path = storage.local_storage_path.clone().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
            })?;
            let base_url = storage.local_storage_base_url.as_deref().ok_or_else(|| {
                StorageError::ConfigError("LOCAL_STORAGE_BASE_URL not configured".to_string())
            })?;

            ObjectStorePublisher::local(base_path, base_url).await
        }
    }
}

/// Create the publisher for repackaged videos. Videos always go to the
/// configured object store.
pub async fn create_video_publisher(config: &Config) -> StorageResult<Arc<dyn Publisher>> {
    let publisher = create_object_store_publisher(config).await?;
    tracing::info!(backend = %config.storage.backend, "Video publisher ready");
    Ok(Arc::new(publisher))
}

/// Create the publisher for thumbnails as selected by `THUMBNAIL_PUBLISHER`.
pub async fn create_thumbnail_publisher(
    config: &Config,
    cache: Arc<AssetCache>,
) -> StorageResult<Arc<dyn Publisher>> {
    let kind = config.storage.thumbnail_publisher;
    let publisher: Arc<dyn Publisher> = match kind {
        PublisherKind::ObjectStore => Arc::new(create_object_store_publisher(config).await?),
        PublisherKind::DataUrl => Arc::new(DataUrlPublisher::new()),
        PublisherKind::Memory => {
            Arc::new(MemoryPublisher::new(cache, config.base.public_base_url.clone()))
        }
    };
    tracing::info!(publisher = %kind, "Thumbnail publisher ready");
    Ok(publisher)
}
