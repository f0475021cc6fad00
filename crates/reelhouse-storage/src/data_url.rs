use async_trait::async_trait;
use base64::Engine;
use uuid::Uuid;

use crate::keys::StorageKey;
use crate::traits::{PublishRequest, Publisher, StorageResult};

/// Embeds the file inline as `data:{content_type};base64,{payload}`.
///
/// Nothing is stored remotely; the URL itself carries the bytes, so this is
/// only suitable for small assets such as thumbnails.
#[derive(Debug, Default, Clone)]
pub struct DataUrlPublisher;

impl DataUrlPublisher {
    pub fn new() -> Self {
        Self
    }
}

pub fn encode_data_url(content_type: &str, data: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        content_type,
        base64::engine::general_purpose::STANDARD.encode(data)
    )
}

#[async_trait]
impl Publisher for DataUrlPublisher {
    async fn publish(&self, request: PublishRequest) -> StorageResult<String> {
        let data = tokio::fs::read(&request.local_path).await?;
        tracing::debug!(
            video_id = %request.video_id,
            size_bytes = data.len(),
            "Encoding asset as data URL"
        );
        Ok(encode_data_url(&request.content_type, &data))
    }

    // The URL is the asset; nothing to withdraw.
    async fn unpublish(&self, _video_id: Uuid, _key: &StorageKey) -> StorageResult<()> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "data-url"
    }
}
