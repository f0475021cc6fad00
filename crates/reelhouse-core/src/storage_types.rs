use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Object storage backend used by the object-store publisher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    S3,
    Local,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "s3" => Ok(StorageBackend::S3),
            "local" => Ok(StorageBackend::Local),
            _ => Err(anyhow::anyhow!("Invalid storage backend: {}", s)),
        }
    }
}

impl Display for StorageBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageBackend::S3 => write!(f, "s3"),
            StorageBackend::Local => write!(f, "local"),
        }
    }
}

/// Publication strategy for finished assets.
///
/// All strategies share the same publisher contract and differ only in how the
/// resulting URL addresses the bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PublisherKind {
    /// Upload to the configured object store and compose its public URL.
    ObjectStore,
    /// Embed the bytes inline as a base64 `data:` URL.
    DataUrl,
    /// Keep the bytes in the process-local asset cache and re-serve them.
    Memory,
}

impl FromStr for PublisherKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "object-store" | "object_store" | "s3" => Ok(PublisherKind::ObjectStore),
            "data-url" | "data_url" => Ok(PublisherKind::DataUrl),
            "memory" => Ok(PublisherKind::Memory),
            _ => Err(anyhow::anyhow!("Invalid publisher kind: {}", s)),
        }
    }
}

impl Display for PublisherKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            PublisherKind::ObjectStore => write!(f, "object-store"),
            PublisherKind::DataUrl => write!(f, "data-url"),
            PublisherKind::Memory => write!(f, "memory"),
        }
    }
}
