use std::future::Future;

use reelhouse_core::{models::VideoRecord, AppError};
use reelhouse_storage::{Publisher, StorageKey};
use uuid::Uuid;

/// Run the record commit for an asset that is already published.
///
/// If the commit fails the asset is withdrawn so no object outlives a failed
/// request; the commit error is returned either way.
pub(crate) async fn commit_or_unpublish<F>(
    publisher: &dyn Publisher,
    video_id: Uuid,
    key: &StorageKey,
    commit: F,
) -> Result<VideoRecord, AppError>
where
    F: Future<Output = Result<VideoRecord, AppError>>,
{
    match commit.await {
        Ok(video) => Ok(video),
        Err(err) => {
            if let Err(cleanup_err) = publisher.unpublish(video_id, key).await {
                tracing::warn!(
                    error = %cleanup_err,
                    video_id = %video_id,
                    key = %key,
                    publisher = publisher.name(),
                    "Failed to withdraw published asset after commit error"
                );
            }
            Err(err)
        }
    }
}
