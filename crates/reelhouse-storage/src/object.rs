use async_trait::async_trait;
use bytes::Bytes;
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::path::Path;
use object_store::{Attribute, Attributes, ObjectStore, ObjectStoreExt, PutOptions, PutPayload};
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

use crate::keys::StorageKey;
use crate::traits::{PublishRequest, Publisher, StorageError, StorageResult};

/// How public URLs are composed for a published key.
#[derive(Debug, Clone)]
enum UrlStyle {
    /// `https://{bucket}.s3.{region}.amazonaws.com/{key}`
    AwsVirtualHost { bucket: String, region: String },
    /// `{endpoint}/{bucket}/{key}` for S3-compatible providers
    PathStyle { endpoint: String, bucket: String },
    /// `{base_url}/{key}`
    BaseUrl(String),
}

/// Uploads files to an object store and returns their public URL.
#[derive(Clone)]
pub struct ObjectStorePublisher {
    store: Arc<dyn ObjectStore>,
    url_style: UrlStyle,
    /// `LocalFileSystem` rejects object attributes; content type is implied
    /// by the key's extension there.
    content_type_attribute: bool,
    label: String,
}

impl ObjectStorePublisher {
    /// Create a publisher for an S3 bucket
    ///
    /// # Arguments
    /// * `bucket` - S3 bucket name
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    pub fn s3(bucket: String, region: String, endpoint_url: Option<String>) -> StorageResult<Self> {
        // Credentials come from the environment (AWS_ACCESS_KEY_ID etc.).
        let mut builder = AmazonS3Builder::from_env()
            .with_region(region.clone())
            .with_bucket_name(bucket.clone());

        if let Some(ref endpoint) = endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        let store = builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        let url_style = match endpoint_url {
            Some(endpoint) => UrlStyle::PathStyle {
                endpoint: endpoint.trim_end_matches('/').to_string(),
                bucket: bucket.clone(),
            },
            None => UrlStyle::AwsVirtualHost {
                bucket: bucket.clone(),
                region,
            },
        };

        Ok(Self {
            store: Arc::new(store),
            url_style,
            content_type_attribute: true,
            label: bucket,
        })
    }

    /// Create a publisher writing under a local directory
    ///
    /// # Arguments
    /// * `base_path` - Root directory for published files (created if missing)
    /// * `base_url` - Base URL under which that directory is served
    pub async fn local(base_path: impl Into<PathBuf>, base_url: &str) -> StorageResult<Self> {
        let base_path = base_path.into();

        tokio::fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        let store = LocalFileSystem::new_with_prefix(&base_path)
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        Ok(Self {
            store: Arc::new(store),
            url_style: UrlStyle::BaseUrl(base_url.trim_end_matches('/').to_string()),
            content_type_attribute: false,
            label: base_path.display().to_string(),
        })
    }

    /// Wrap an arbitrary store (e.g. `InMemory`) whose objects are served under `base_url`.
    pub fn with_store(store: Arc<dyn ObjectStore>, base_url: &str) -> Self {
        Self {
            store,
            url_style: UrlStyle::BaseUrl(base_url.trim_end_matches('/').to_string()),
            content_type_attribute: true,
            label: "custom".to_string(),
        }
    }

    /// Generate public URL for a key
    pub fn generate_url(&self, key: &str) -> String {
        match &self.url_style {
            UrlStyle::AwsVirtualHost { bucket, region } => {
                format!("https://{}.s3.{}.amazonaws.com/{}", bucket, region, key)
            }
            UrlStyle::PathStyle { endpoint, bucket } => {
                format!("{}/{}/{}", endpoint, bucket, key)
            }
            UrlStyle::BaseUrl(base) => format!("{}/{}", base, key),
        }
    }

    pub fn store(&self) -> Arc<dyn ObjectStore> {
        self.store.clone()
    }
}

#[async_trait]
impl Publisher for ObjectStorePublisher {
    async fn publish(&self, request: PublishRequest) -> StorageResult<String> {
        let key = request.key.as_str();
        let data = tokio::fs::read(&request.local_path).await?;
        let size = data.len() as u64;
        let location = Path::from(key);

        let mut attributes = Attributes::new();
        if self.content_type_attribute {
            attributes.insert(Attribute::ContentType, request.content_type.clone().into());
        }
        let options = PutOptions {
            attributes,
            ..Default::default()
        };

        let start = std::time::Instant::now();

        self.store
            .put_opts(&location, PutPayload::from(Bytes::from(data)), options)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %self.label,
                    key = %key,
                    size_bytes = size,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Object upload failed"
                );
                StorageError::UploadFailed(e.to_string())
            })?;

        let url = self.generate_url(key);

        tracing::info!(
            video_id = %request.video_id,
            bucket = %self.label,
            key = %key,
            content_type = %request.content_type,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Object upload successful"
        );

        Ok(url)
    }

    async fn unpublish(&self, video_id: Uuid, key: &StorageKey) -> StorageResult<()> {
        let start = std::time::Instant::now();
        let location = Path::from(key.as_str());

        match self.store.delete(&location).await {
            Ok(()) | Err(object_store::Error::NotFound { .. }) => {}
            Err(e) => {
                tracing::error!(
                    error = %e,
                    video_id = %video_id,
                    bucket = %self.label,
                    key = %key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Object delete failed"
                );
                return Err(StorageError::BackendError(e.to_string()));
            }
        }

        tracing::info!(
            video_id = %video_id,
            bucket = %self.label,
            key = %key,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Object delete successful"
        );

        Ok(())
    }

    fn name(&self) -> &'static str {
        "object-store"
    }
}
