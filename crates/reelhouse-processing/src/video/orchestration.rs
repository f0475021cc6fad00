//! Video ingestion: validate → scratch → probe → classify → faststart → publish → commit.

use std::sync::Arc;
use uuid::Uuid;

use reelhouse_core::models::{UploadedAsset, VideoRecord};
use reelhouse_core::AppError;
use reelhouse_db::VideoStore;
use reelhouse_storage::{PublishRequest, Publisher, StorageKey};

use super::prober::MediaProber;
use super::repackager::{processed_path, ContainerRepackager};
use crate::access::load_owned_video;
use crate::commit::commit_or_unpublish;
use crate::orientation::classify_orientation;
use crate::scratch::{ScratchDir, ScratchFile};
use crate::validator::UploadValidator;

/// Drives one video upload through the pipeline.
///
/// A run either ends with exactly one published object and one record update,
/// or fails with neither; scratch files are removed on every path, including
/// when the future is dropped.
pub struct IngestionOrchestrator {
    videos: Arc<dyn VideoStore>,
    prober: Arc<dyn MediaProber>,
    repackager: Arc<dyn ContainerRepackager>,
    publisher: Arc<dyn Publisher>,
    scratch: ScratchDir,
    validator: UploadValidator,
}

impl IngestionOrchestrator {
    pub fn new(
        videos: Arc<dyn VideoStore>,
        prober: Arc<dyn MediaProber>,
        repackager: Arc<dyn ContainerRepackager>,
        publisher: Arc<dyn Publisher>,
        scratch: ScratchDir,
        validator: UploadValidator,
    ) -> Self {
        Self {
            videos,
            prober,
            repackager,
            publisher,
            scratch,
            validator,
        }
    }

    pub fn validator(&self) -> &UploadValidator {
        &self.validator
    }

    /// Ingest `upload` as the video file of `video_id` on behalf of `user_id`.
    #[tracing::instrument(skip(self, upload), fields(video_id = %video_id, user_id = %user_id))]
    pub async fn ingest(
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
            "Uploading video"
        );

        let extension = upload.extension().to_string();
        let content_type = upload.content_type.clone();

        let original = self
            .scratch
            .persist(video_id, &extension, &upload.data)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to write scratch file: {}", e)))?;
        // The request body is no longer needed once it is on disk.
        drop(upload);

        let geometry = self.prober.probe(original.path()).await?;
        let orientation = classify_orientation(geometry.width, geometry.height);

        tracing::info!(
            video_id = %video_id,
            width = geometry.width,
            height = geometry.height,
            orientation = %orientation,
            "Video probed"
        );

        // Claim the conventional output before the tool runs so a partial
        // write is removed on failure.
        let partial = ScratchFile::adopt(processed_path(original.path()));
        let output = self.repackager.repackage(original.path()).await?;
        original.discard();
        let processed = if output.as_path() == partial.path() {
            partial
        } else {
            let adopted = ScratchFile::adopt(output);
            partial.discard();
            adopted
        };

        let key = StorageKey::generate(orientation.as_str(), &extension)?;
        let published = self
            .publisher
            .publish(PublishRequest {
                video_id,
                key: key.clone(),
                local_path: processed.path().to_path_buf(),
                content_type,
            })
            .await;
        processed.discard();
        let url = published?;

        let video = commit_or_unpublish(
            self.publisher.as_ref(),
            video_id,
            &key,
            self.videos.set_video_url(video_id, &url),
        )
        .await?;

        tracing::info!(
            video_id = %video_id,
            key = %key,
            orientation = %orientation,
            "Video ingested"
        );

        Ok(video)
    }
}
