//! Multipart intake
//!
//! Streams one named file field into memory, enforcing the upload limit
//! while reading so an oversized body is refused without buffering it.

use axum::extract::Multipart;
use bytes::BytesMut;
use reelhouse_core::models::UploadedAsset;
use reelhouse_core::AppError;
use reelhouse_processing::{UploadValidator, ValidationError};

use crate::error::HttpAppError;

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Read the file field for the validator's upload kind.
///
/// Other fields are skipped. A field with the right name but without a
/// filename does not count as a file.
pub async fn read_upload(
    multipart: &mut Multipart,
    validator: &UploadValidator,
) -> Result<UploadedAsset, HttpAppError> {
    let kind = validator.kind();

    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some(kind.field_name()) {
            continue;
        }

        let Some(filename) = field.file_name().map(str::to_string) else {
            break;
        };
        let content_type = field
            .content_type()
            .unwrap_or(DEFAULT_CONTENT_TYPE)
            .to_string();

        let mut data = BytesMut::new();
        while let Some(chunk) = field.chunk().await? {
            if data.len() + chunk.len() > validator.max_size() {
                tracing::debug!(
                    field = kind.field_name(),
                    max_size = validator.max_size(),
                    "Upload exceeds size limit"
                );
                return Err(AppError::from(ValidationError::TooLarge {
                    kind,
                    max: validator.max_size(),
                })
                .into());
            }
            data.extend_from_slice(&chunk);
        }

        return Ok(UploadedAsset::new(
            kind,
            Some(filename),
            &content_type,
            data.freeze(),
        ));
    }

    Err(AppError::from(ValidationError::MissingFile { kind }).into())
}
