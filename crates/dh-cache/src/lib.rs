//! Cache abstraction layer for docshelp.
//!
//! This crate provides generic caching traits that decouple cache consumers
//! from the underlying storage mechanism. Two traits form the core API:
//!
//! - [`Cache`]: Factory for named cache buckets
//! - [`CacheBucket`]: Key-value store with time-based expiry
//!
//! # Implementations
//!
//! - [`NullCache`] / [`NullCacheBucket`]: No-op implementations (always miss)
//! - [`MemoryCache`]: Process-local implementation
//! - [`FileCache`]: File-based implementation with version validation
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use dh_cache::{Cache, MemoryCache};
//!
//! let cache = MemoryCache::new();
//! let bucket = cache.bucket("help");
//! bucket.set("google_docs_help", b"{}", Some(Duration::from_secs(3600)));
//! assert_eq!(bucket.get("google_docs_help"), Some(b"{}".to_vec()));
//! ```

mod ext;
mod file;
mod memory;

use std::time::Duration;

pub use ext::CacheBucketExt;
pub use file::FileCache;
pub use memory::MemoryCache;

/// Characters a cache key may not contain.
const RESERVED_KEY_CHARS: &[char] = &['{', '}', '(', ')', '/', '\\', '@', ':'];

/// Cache precondition error.
///
/// Raised when the caller hands the cache something it cannot act on, such
/// as a malformed key. Lookups never fail; they miss.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Key is empty or contains reserved characters.
    #[error("invalid cache key '{key}': {reason}")]
    InvalidKey {
        /// The rejected key.
        key: String,
        /// Why it was rejected.
        reason: &'static str,
    },
    /// I/O error from a persistent backend.
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Check that `key` is usable as a cache key.
///
/// # Errors
///
/// Returns [`CacheError::InvalidKey`] for empty keys, keys containing any of
/// `{}()/\@:`, and keys containing `..`.
pub fn validate_key(key: &str) -> Result<(), CacheError> {
    let reason = if key.is_empty() {
        "key cannot be empty"
    } else if key.contains(RESERVED_KEY_CHARS) {
        "key contains reserved characters"
    } else if key.contains("..") {
        "key cannot contain '..'"
    } else {
        return Ok(());
    };
    Err(CacheError::InvalidKey {
        key: key.to_owned(),
        reason,
    })
}

/// A named partition within a [`Cache`].
///
/// Each bucket stores key-value pairs that optionally expire. A cache hit
/// occurs only when the key exists and its entry has not expired.
pub trait CacheBucket: Send + Sync {
    /// Retrieve a cached value.
    ///
    /// Returns `None` on cache miss, on an expired entry, or for an invalid key.
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// Store a value in the cache.
    ///
    /// Overwrites any existing entry for the same key. A `ttl` of `None`
    /// keeps the entry until it is deleted. Invalid keys are ignored.
    ///
    /// # Arguments
    ///
    /// * `key` - Cache key (e.g., the extraction tag)
    /// * `value` - Raw bytes to cache
    /// * `ttl` - Lifetime of the entry
    fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>);

    /// Remove a cached value.
    ///
    /// Deleting a key that is not cached succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidKey`] if the key is malformed, or
    /// [`CacheError::Io`] if a persistent backend fails to remove the entry.
    fn delete(&self, key: &str) -> Result<(), CacheError>;
}

/// Factory for named cache [`CacheBucket`]s.
///
/// A `Cache` produces buckets that are logically isolated from each other.
/// For example, a file-based cache stores each bucket in a separate
/// subdirectory.
pub trait Cache: Send + Sync {
    /// Open or create a named bucket.
    ///
    /// Calling `bucket` multiple times with the same name returns independent
    /// handles that share the same underlying storage.
    ///
    /// # Arguments
    ///
    /// * `name` - Bucket name (e.g., "help")
    fn bucket(&self, name: &str) -> Box<dyn CacheBucket>;
}

/// No-op [`CacheBucket`] that never stores or retrieves data.
///
/// Every `get` returns `None`; every `set` is silently discarded.
/// Used as the bucket type for [`NullCache`].
pub struct NullCacheBucket;

impl CacheBucket for NullCacheBucket {
    fn get(&self, _key: &str) -> Option<Vec<u8>> {
        None
    }

    fn set(&self, _key: &str, _value: &[u8], _ttl: Option<Duration>) {}

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        validate_key(key)
    }
}

/// No-op [`Cache`] that always returns [`NullCacheBucket`]s.
///
/// Use when caching is disabled.
pub struct NullCache;

impl Cache for NullCache {
    fn bucket(&self, _name: &str) -> Box<dyn CacheBucket> {
        Box::new(NullCacheBucket)
    }
}
