use axum::{
    extract::{Path, State},
    Json,
};
use reelhouse_core::models::VideoRecord;
use reelhouse_core::AppError;
use std::sync::Arc;

use crate::auth::AuthContext;
use crate::error::HttpAppError;
use crate::handlers::parse_video_id;
use crate::state::AppState;

/// `GET /api/videos/{video_id}`: the owner's view of a video record.
pub async fn get_video(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(video_id): Path<String>,
) -> Result<Json<VideoRecord>, HttpAppError> {
    let video_id = parse_video_id(&video_id)?;

    let video = state
        .videos
        .get(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Couldn't find video".to_string()))?;

    if !video.is_owned_by(auth.user_id) {
        return Err(AppError::Forbidden("Forbidden".to_string()).into());
    }

    Ok(Json(video))
}
