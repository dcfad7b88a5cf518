//! Extension trait for [`CacheBucket`] with typed convenience methods.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::CacheBucket;

/// Typed convenience methods for [`CacheBucket`].
///
/// Provides `get_json`/`set_json` for serde-serializable types and the
/// memoising `get_or_insert_json`. These are implemented as default methods
/// on an extension trait so that:
///
/// - [`CacheBucket`] stays object-safe with no serde dependency
/// - Implementors only need to handle raw bytes
/// - Callers get ergonomic typed access via a blanket impl
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use dh_cache::{Cache, CacheBucketExt, MemoryCache};
///
/// let cache = MemoryCache::new();
/// let bucket = cache.bucket("help");
///
/// let ttl = Some(Duration::from_secs(60));
/// let value: Result<Vec<String>, std::convert::Infallible> =
///     bucket.get_or_insert_json("tag", ttl, || Ok(vec!["computed".to_owned()]));
/// assert_eq!(value.unwrap(), vec!["computed".to_owned()]);
/// ```
pub trait CacheBucketExt: CacheBucket {
    /// Retrieve a JSON-deserialized value from the cache.
    ///
    /// Returns `None` on cache miss, expiry, or deserialization failure.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let bytes = self.get(key)?;
        serde_json::from_slice(&bytes).ok()
    }

    /// Store a value as JSON in the cache.
    ///
    /// Silently does nothing if serialization fails.
    fn set_json<T: Serialize>(&self, key: &str, value: &T, ttl: Option<Duration>) {
        if let Ok(bytes) = serde_json::to_vec(value) {
            self.set(key, &bytes, ttl);
        }
    }

    /// Return the cached value for `key`, computing and storing it on a miss.
    ///
    /// If `factory` fails, its error is returned and nothing is cached.
    fn get_or_insert_json<T, E, F>(
        &self,
        key: &str,
        ttl: Option<Duration>,
        factory: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(value) = self.get_json(key) {
            tracing::debug!("cache hit: {key}");
            return Ok(value);
        }
        tracing::debug!("cache miss: {key}");
        let value = factory()?;
        self.set_json(key, &value, ttl);
        Ok(value)
    }
}

impl<B: CacheBucket + ?Sized> CacheBucketExt for B {}
