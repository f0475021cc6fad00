//! Service construction

use anyhow::{Context, Result};
use reelhouse_core::models::UploadKind;
use reelhouse_core::Config;
use reelhouse_db::{InMemoryVideoStore, PgVideoRepository, VideoStore};
use reelhouse_processing::{
    FfmpegRepackager, FfprobeProber, IngestionOrchestrator, ScratchDir, ThumbnailService,
    UploadValidator,
};
use reelhouse_storage::{create_thumbnail_publisher, create_video_publisher, AssetCache};
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

use crate::auth::JwtService;
use crate::state::AppState;

/// Build every service from configuration.
pub async fn initialize_services(config: &Config, pool: Option<PgPool>) -> Result<Arc<AppState>> {
    let videos: Arc<dyn VideoStore> = match pool {
        Some(pool) => Arc::new(PgVideoRepository::new(pool)),
        None => Arc::new(InMemoryVideoStore::new()),
    };

    let scratch = ScratchDir::new(&config.media.scratch_dir);
    scratch.ensure().await.with_context(|| {
        format!(
            "Failed to create scratch directory {}",
            config.media.scratch_dir.display()
        )
    })?;

    let tool_timeout = Duration::from_secs(config.media.tool_timeout_secs);
    let prober = FfprobeProber::new(config.media.ffprobe_path.clone(), tool_timeout)
        .context("Invalid FFPROBE_PATH")?;
    let repackager = FfmpegRepackager::new(config.media.ffmpeg_path.clone(), tool_timeout)
        .context("Invalid FFMPEG_PATH")?;

    let asset_cache = Arc::new(AssetCache::new(config.storage.thumbnail_cache_capacity));
    let video_publisher = create_video_publisher(config)
        .await
        .context("Failed to initialize video storage")?;
    let thumbnail_publisher = create_thumbnail_publisher(config, asset_cache.clone())
        .await
        .context("Failed to initialize thumbnail storage")?;

    let ingestion = IngestionOrchestrator::new(
        videos.clone(),
        Arc::new(prober),
        Arc::new(repackager),
        video_publisher,
        scratch.clone(),
        UploadValidator::new(UploadKind::Video, config.media.max_video_size_bytes),
    );
    let thumbnails = ThumbnailService::new(
        videos.clone(),
        thumbnail_publisher,
        scratch,
        UploadValidator::new(UploadKind::Thumbnail, config.media.max_thumbnail_size_bytes),
    );

    tracing::info!(
        scratch_dir = %config.media.scratch_dir.display(),
        ffprobe_path = %config.media.ffprobe_path,
        ffmpeg_path = %config.media.ffmpeg_path,
        tool_timeout_secs = config.media.tool_timeout_secs,
        "Services initialized"
    );

    Ok(Arc::new(AppState {
        config: config.clone(),
        videos,
        ingestion: Arc::new(ingestion),
        thumbnails: Arc::new(thumbnails),
        asset_cache,
        jwt: JwtService::new(&config.base.jwt_secret, config.base.jwt_expiry_hours),
    }))
}
