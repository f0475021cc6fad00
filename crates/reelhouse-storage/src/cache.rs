//! Bounded in-process asset cache
//!
//! Backs the memory publisher. Entries are keyed by video id, the least
//! recently used entry is evicted once capacity is reached, and nothing
//! survives a restart.

use bytes::Bytes;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedAsset {
    pub content_type: String,
    pub data: Bytes,
}

pub struct AssetCache {
    entries: Mutex<LruCache<Uuid, CachedAsset>>,
}

impl AssetCache {
    /// A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Insert or replace the asset for `video_id`.
    pub fn insert(&self, video_id: Uuid, asset: CachedAsset) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        if let Some((evicted, _)) = entries.push(video_id, asset) {
            if evicted != video_id {
                tracing::debug!(video_id = %evicted, "Evicted asset from cache");
            }
        }
    }

    pub fn get(&self, video_id: &Uuid) -> Option<CachedAsset> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.get(video_id).cloned()
    }

    /// Drop the asset for `video_id`, returning it if it was cached.
    pub fn remove(&self, video_id: &Uuid) -> Option<CachedAsset> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.pop(video_id)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for AssetCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetCache").field("len", &self.len()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(body: &'static [u8]) -> CachedAsset {
        CachedAsset {
            content_type: "image/png".to_string(),
            data: Bytes::from_static(body),
        }
    }

    #[test]
    fn test_replaces_existing_entry() {
        let cache = AssetCache::new(4);
        let id = Uuid::new_v4();
        cache.insert(id, asset(b"first"));
        cache.insert(id, asset(b"second"));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&id).unwrap().data, Bytes::from_static(b"second"));
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let cache = AssetCache::new(2);
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        cache.insert(a, asset(b"a"));
        cache.insert(b, asset(b"b"));

        // Touch `a` so `b` becomes the eviction candidate.
        assert!(cache.get(&a).is_some());
        cache.insert(c, asset(b"c"));

        assert!(cache.get(&a).is_some());
        assert!(cache.get(&b).is_none());
        assert!(cache.get(&c).is_some());
    }

    #[test]
    fn test_remove_drops_entry() {
        let cache = AssetCache::new(4);
        let id = Uuid::new_v4();
        cache.insert(id, asset(b"png"));

        assert_eq!(cache.remove(&id), Some(asset(b"png")));
        assert!(cache.get(&id).is_none());
        assert!(cache.remove(&id).is_none());
    }

    #[test]
    fn test_zero_capacity_holds_one_entry() {
        let cache = AssetCache::new(0);
        assert!(cache.is_empty());
        cache.insert(Uuid::new_v4(), asset(b"x"));
        assert_eq!(cache.len(), 1);
    }
}
