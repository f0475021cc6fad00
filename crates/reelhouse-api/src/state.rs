use reelhouse_core::Config;
use reelhouse_db::VideoStore;
use reelhouse_processing::{IngestionOrchestrator, ThumbnailService};
use reelhouse_storage::AssetCache;
use std::sync::Arc;

use crate::auth::JwtService;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub videos: Arc<dyn VideoStore>,
    pub ingestion: Arc<IngestionOrchestrator>,
    pub thumbnails: Arc<ThumbnailService>,
    /// Backs `GET /api/thumbnails/{video_id}` when the memory publisher is selected.
    pub asset_cache: Arc<AssetCache>,
    pub jwt: JwtService,
}
