use reelhouse_core::{models::VideoRecord, AppError};
use reelhouse_db::VideoStore;
use uuid::Uuid;

/// Load `video_id` and check that `user_id` owns it.
pub(crate) async fn load_owned_video(
    videos: &dyn VideoStore,
    video_id: Uuid,
    user_id: Uuid,
) -> Result<VideoRecord, AppError> {
    let video = videos
        .get(video_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Couldn't find video".to_string()))?;

    if !video.is_owned_by(user_id) {
        tracing::warn!(
            video_id = %video_id,
            user_id = %user_id,
            "Upload rejected: user does not own video"
        );
        return Err(AppError::Forbidden("Forbidden".to_string()));
    }

    Ok(video)
}
