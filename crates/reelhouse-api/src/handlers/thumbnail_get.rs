use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use reelhouse_core::AppError;
use std::sync::Arc;

use crate::error::HttpAppError;
use crate::handlers::parse_video_id;
use crate::state::AppState;

/// `GET /api/thumbnails/{video_id}`: serve a thumbnail held by the memory publisher.
pub async fn get_thumbnail(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
) -> Result<Response, HttpAppError> {
    let video_id = parse_video_id(&video_id)?;

    let asset = state
        .asset_cache
        .get(&video_id)
        .ok_or_else(|| AppError::NotFound("Thumbnail not found".to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, asset.content_type),
            (header::CACHE_CONTROL, "no-cache".to_string()),
        ],
        asset.data,
    )
        .into_response())
}
