//! Process-local cache implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use crate::{Cache, CacheBucket, CacheError, validate_key};

/// A stored value and the instant it stops being valid.
struct Entry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

type Store = RwLock<HashMap<(String, String), Entry>>;

/// In-memory [`Cache`] shared by every bucket handle it produces.
///
/// Cloning is cheap and clones share storage, which lets one process serve
/// concurrent readers from a single extraction pass.
#[derive(Clone, Default)]
pub struct MemoryCache {
    store: Arc<Store>,
}

impl MemoryCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cache for MemoryCache {
    fn bucket(&self, name: &str) -> Box<dyn CacheBucket> {
        Box::new(MemoryCacheBucket {
            name: name.to_owned(),
            store: Arc::clone(&self.store),
        })
    }
}

/// A bucket view over a [`MemoryCache`].
struct MemoryCacheBucket {
    name: String,
    store: Arc<Store>,
}

impl MemoryCacheBucket {
    fn slot(&self, key: &str) -> (String, String) {
        (self.name.clone(), key.to_owned())
    }
}

impl CacheBucket for MemoryCacheBucket {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        validate_key(key).ok()?;
        let store = self.store.read().ok()?;
        let entry = store.get(&self.slot(key))?;
        if entry.is_expired(Instant::now()) {
            return None;
        }
        Some(entry.value.clone())
    }

    fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) {
        if let Err(e) = validate_key(key) {
            tracing::warn!("not caching value: {e}");
            return;
        }
        let Ok(mut store) = self.store.write() else {
            return;
        };
        let expires_at = ttl.and_then(|ttl| Instant::now().checked_add(ttl));
        store.insert(
            self.slot(key),
            Entry {
                value: value.to_vec(),
                expires_at,
            },
        );
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        validate_key(key)?;
        if let Ok(mut store) = self.store.write() {
            store.remove(&self.slot(key));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_memory_bucket_set_and_get() {
        let cache = MemoryCache::new();
        let bucket = cache.bucket("help");

        bucket.set("tag", b"payload", None);
        assert_eq!(bucket.get("tag"), Some(b"payload".to_vec()));
    }

    #[test]
    fn test_memory_bucket_expired_entry_misses() {
        let cache = MemoryCache::new();
        let bucket = cache.bucket("help");

        bucket.set("tag", b"payload", Some(Duration::ZERO));
        assert_eq!(bucket.get("tag"), None);
    }

    #[test]
    fn test_memory_bucket_delete() {
        let cache = MemoryCache::new();
        let bucket = cache.bucket("help");

        bucket.set("tag", b"payload", None);
        bucket.delete("tag").unwrap();
        assert_eq!(bucket.get("tag"), None);

        // Deleting again is fine
        bucket.delete("tag").unwrap();
    }

    #[test]
    fn test_memory_bucket_delete_invalid_key() {
        let bucket = MemoryCache::new().bucket("help");
        assert!(matches!(
            bucket.delete("a/b"),
            Err(CacheError::InvalidKey { .. })
        ));
    }

    #[test]
    fn test_memory_handles_share_storage() {
        let cache = MemoryCache::new();
        let writer = cache.bucket("help");
        let reader = cache.clone().bucket("help");

        writer.set("tag", b"shared", None);
        assert_eq!(reader.get("tag"), Some(b"shared".to_vec()));
    }

    #[test]
    fn test_memory_buckets_are_isolated() {
        let cache = MemoryCache::new();
        let alpha = cache.bucket("alpha");
        let beta = cache.bucket("beta");

        alpha.set("key", b"alpha-data", None);
        assert_eq!(beta.get("key"), None);
    }
}
