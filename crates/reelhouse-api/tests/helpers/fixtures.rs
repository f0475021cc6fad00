use axum_test::multipart::{MultipartForm, Part};
use bytes::Bytes;

/// A form with one file field.
pub fn file_form(field: &str, file_name: &str, mime_type: &str, data: &[u8]) -> MultipartForm {
    let part = Part::bytes(Bytes::copy_from_slice(data))
        .file_name(file_name)
        .mime_type(mime_type);
    MultipartForm::new().add_part(field.to_string(), part)
}

pub fn video_form(data: &[u8]) -> MultipartForm {
    file_form("video", "launch.mp4", "video/mp4", data)
}

pub fn thumbnail_form(mime_type: &str, data: &[u8]) -> MultipartForm {
    file_form("thumbnail", "launch.png", mime_type, data)
}

/// PNG signature plus an empty IHDR prefix; enough for content-type tests.
pub const PNG_BYTES: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
