use axum::{
    extract::{multipart::MultipartRejection, Multipart, Path, State},
    Json,
};
use reelhouse_core::models::VideoRecord;
use std::sync::Arc;

use crate::auth::AuthContext;
use crate::error::HttpAppError;
use crate::handlers::parse_video_id;
use crate::state::AppState;
use crate::utils::multipart::read_upload;

/// `POST /api/thumbnail_upload/{video_id}`: store the `thumbnail` form field.
#[tracing::instrument(skip(state, multipart), fields(user_id = %auth.user_id))]
pub async fn upload_thumbnail(
    State(state): State<Arc<AppState>>,
    auth: AuthContext,
    Path(video_id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<VideoRecord>, HttpAppError> {
    let video_id = parse_video_id(&video_id)?;
    let mut multipart = multipart?;

    let upload = read_upload(&mut multipart, state.thumbnails.validator()).await?;
    let video = state
        .thumbnails
        .upload(auth.user_id, video_id, upload)
        .await?;

    Ok(Json(video))
}
