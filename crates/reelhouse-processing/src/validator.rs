use reelhouse_core::models::UploadKind;
use reelhouse_core::AppError;

/// Upload validation failures. Display strings are client-facing.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("{} file missing", .kind.label())]
    MissingFile { kind: UploadKind },

    #[error("{} is too large", .kind.label())]
    TooLarge { kind: UploadKind, max: usize },

    #[error("{} is not an accepted media type", .kind.label())]
    UnsupportedMediaType {
        kind: UploadKind,
        content_type: String,
    },
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// Size and media type rules for one upload kind.
#[derive(Debug, Clone)]
pub struct UploadValidator {
    kind: UploadKind,
    max_size: usize,
}

impl UploadValidator {
    pub fn new(kind: UploadKind, max_size: usize) -> Self {
        Self { kind, max_size }
    }

    pub fn kind(&self) -> UploadKind {
        self.kind
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn validate_size(&self, size: usize) -> Result<(), ValidationError> {
        if size > self.max_size {
            return Err(ValidationError::TooLarge {
                kind: self.kind,
                max: self.max_size,
            });
        }
        Ok(())
    }

    /// Case-insensitive comparison against the accepted set; parameters such
    /// as `; codecs=...` are not stripped.
    pub fn validate_content_type(&self, content_type: &str) -> Result<(), ValidationError> {
        let normalized = content_type.trim().to_lowercase();
        if !self
            .kind
            .accepted_content_types()
            .contains(&normalized.as_str())
        {
            return Err(ValidationError::UnsupportedMediaType {
                kind: self.kind,
                content_type: content_type.to_string(),
            });
        }
        Ok(())
    }
}
