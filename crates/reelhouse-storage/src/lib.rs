//! Reelhouse Storage Library
//!
//! Publication of finished local files. Every strategy implements the
//! [`Publisher`] trait and returns the URL under which the bytes are reachable.
//!
//! # Storage key format
//!
//! Keys are `{prefix}/{identifier}.{extension}` where the prefix is an
//! orientation bucket for videos (`landscape`, `portrait`, `other`) or
//! `thumbnails`, and the identifier is 128 random bits as lowercase hex.
//! Key generation is centralized in the `keys` module.

pub mod cache;
pub mod data_url;
pub mod factory;
pub mod keys;
pub mod memory;
pub mod object;
pub mod traits;

// Re-export commonly used types
pub use cache::{AssetCache, CachedAsset};
pub use data_url::DataUrlPublisher;
pub use factory::{create_thumbnail_publisher, create_video_publisher};
pub use keys::StorageKey;
pub use memory::MemoryPublisher;
pub use object::ObjectStorePublisher;
pub use reelhouse_core::{PublisherKind, StorageBackend};
pub use traits::{PublishRequest, Publisher, StorageError, StorageResult};
