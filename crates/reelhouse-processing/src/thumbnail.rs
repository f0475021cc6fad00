//! Thumbnail uploads: validate → scratch → publish → commit.
//!
//! Same access and validation rules as videos, without probing or repackaging.

use std::sync::Arc;
use uuid::Uuid;

use reelhouse_core::models::{UploadedAsset, VideoRecord};
use reelhouse_core::AppError;
use reelhouse_db::VideoStore;
use reelhouse_storage::keys::THUMBNAIL_PREFIX;
use reelhouse_storage::{PublishRequest, Publisher, StorageKey};

use crate::access::load_owned_video;
use crate::commit::commit_or_unpublish;
use crate::scratch::ScratchDir;
use crate::validator::UploadValidator;

pub struct ThumbnailService {
    videos: Arc<dyn VideoStore>,
    publisher: Arc<dyn Publisher>,
    scratch: ScratchDir,
    validator: UploadValidator,
}

impl ThumbnailService {
    pub fn new(
        videos: Arc<dyn VideoStore>,
        publisher: Arc<dyn Publisher>,
        scratch: ScratchDir,
        validator: UploadValidator,
    ) -> Self {
        Self {
            videos,
            publisher,
            scratch,
            validator,
        }
    }

    pub fn validator(&self) -> &UploadValidator {
        &self.validator
    }

    #[tracing::instrument(skip(self, upload), fields(video_id = %video_id, user_id = %user_id))]
    pub async fn upload(
        &self,
        user_id: Uuid,
        video_id: Uuid,
        upload: UploadedAsset,
    ) -> Result<VideoRecord, AppError> {
        self.validator.validate_size(upload.size())?;
        load_owned_video(self.videos.as_ref(), video_id, user_id).await?;
        self.validator.validate_content_type(&upload.content_type)?;

        tracing::info!(
            video_id = %video_id,
            user_id = %user_id,
            size_bytes = upload.size(),
            publisher = self.publisher.name(),
            "Uploading thumbnail"
        );

        let key = StorageKey::generate(THUMBNAIL_PREFIX, upload.extension())?;
        let file = self
            .scratch
            .persist(video_id, upload.extension(), &upload.data)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to write scratch file: {}", e)))?;

        let published = self
            .publisher
            .publish(PublishRequest {
                video_id,
                key: key.clone(),
                local_path: file.path().to_path_buf(),
                content_type: upload.content_type,
            })
            .await;
        file.discard();
        let url = published?;

        commit_or_unpublish(
            self.publisher.as_ref(),
            video_id,
            &key,
            self.videos.set_thumbnail_url(video_id, &url),
        )
        .await
    }
}
