//! File-based cache implementation.
//!
//! [`FileCache`] stores cache entries as files on disk, organized into buckets
//! (subdirectories). Each entry is a single file with a binary header followed
//! by the data:
//!
//! ```text
//! [expires_at: u64 LE, unix seconds, 0 = never][data bytes]
//! ```
//!
//! On read, only the header is read first to check expiry. The full data
//! is read only on cache hit, avoiding unnecessary I/O on stale entries.
//!
//! On construction, [`FileCache`] validates a `VERSION` file in the cache root.
//! If the version mismatches or is missing, the entire cache directory is wiped
//! and recreated. This ensures stale caches from previous builds are never used.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::{Cache, CacheBucket, CacheError, validate_key};

/// File-based [`Cache`] rooted at a directory on disk.
///
/// Directory layout:
/// ```text
/// {root}/
/// +-- VERSION              # contains the cache version string
/// +-- help/                # bucket "help"
///     +-- google_docs_help # cache entry
/// ```
pub struct FileCache {
    root: PathBuf,
}

impl FileCache {
    /// Create a new file-based cache at `root`, validating the cache version.
    ///
    /// If the `VERSION` file inside `root` does not match `version`, the entire
    /// cache directory is removed and recreated with the new version. Errors
    /// during validation are logged but never fatal.
    #[must_use]
    pub fn new(root: PathBuf, version: &str) -> Self {
        validate_version(&root, version);
        Self { root }
    }
}

impl Cache for FileCache {
    fn bucket(&self, name: &str) -> Box<dyn CacheBucket> {
        Box::new(FileCacheBucket {
            dir: self.root.join(name),
        })
    }
}

/// A single bucket backed by a directory on disk.
struct FileCacheBucket {
    dir: PathBuf,
}

/// Seconds since the Unix epoch.
fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

impl CacheBucket for FileCacheBucket {
    fn get(&self, key: &str) -> Option<Vec<u8>> {
        validate_key(key).ok()?;
        let path = self.dir.join(key);
        let mut file = File::open(&path).ok()?;

        let mut header = [0u8; 8];
        file.read_exact(&mut header).ok()?;
        let expires_at = u64::from_le_bytes(header);

        if expires_at != 0 && unix_now() >= expires_at {
            return None;
        }

        let mut data = Vec::new();
        file.read_to_end(&mut data).ok()?;
        Some(data)
    }

    fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) {
        if let Err(e) = validate_key(key) {
            tracing::warn!("not caching value: {e}");
            return;
        }

        // Silently ignore errors, cache is optional
        if fs::create_dir_all(&self.dir).is_err() {
            return;
        }

        let expires_at = ttl.map_or(0, |ttl| unix_now().saturating_add(ttl.as_secs()));
        let mut buf = Vec::with_capacity(8 + value.len());
        buf.extend_from_slice(&expires_at.to_le_bytes());
        buf.extend_from_slice(value);

        if let Err(e) = fs::write(self.dir.join(key), &buf) {
            tracing::warn!("failed to write cache entry {key}: {e}");
        }
    }

    fn delete(&self, key: &str) -> Result<(), CacheError> {
        validate_key(key)?;
        match fs::remove_file(self.dir.join(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Validate the cache version, wiping the directory on mismatch.
fn validate_version(root: &Path, version: &str) {
    let version_file = root.join("VERSION");

    match fs::read_to_string(&version_file) {
        Ok(stored) if stored == version => {
            tracing::debug!("cache version matches: {version}");
            return;
        }
        Ok(stored) => {
            tracing::info!(
                "cache version mismatch (stored={stored}, current={version}), wiping cache"
            );
        }
        Err(_) => {
            tracing::info!("no cache VERSION file found, initializing cache");
        }
    }

    if root.exists()
        && let Err(e) = fs::remove_dir_all(root)
    {
        tracing::warn!("failed to remove cache directory: {e}");
    }
    if let Err(e) = fs::create_dir_all(root) {
        tracing::warn!("failed to create cache directory: {e}");
        return;
    }
    if let Err(e) = fs::write(&version_file, version) {
        tracing::warn!("failed to write cache VERSION file: {e}");
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_file_bucket_set_and_get() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");
        let bucket = cache.bucket("help");

        bucket.set("google_docs_help", b"{\"errors\":[]}", None);
        assert_eq!(
            bucket.get("google_docs_help"),
            Some(b"{\"errors\":[]}".to_vec())
        );
    }

    #[test]
    fn test_file_bucket_ttl_not_yet_expired() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");
        let bucket = cache.bucket("help");

        bucket.set("key", b"data", Some(Duration::from_secs(3600)));
        assert_eq!(bucket.get("key"), Some(b"data".to_vec()));
    }

    #[test]
    fn test_file_bucket_expired_entry_misses() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");
        let bucket = cache.bucket("help");

        // Hand-write an entry that expired at t=1
        fs::create_dir_all(tmp.path().join("cache/help")).unwrap();
        let mut raw = 1u64.to_le_bytes().to_vec();
        raw.extend_from_slice(b"stale");
        fs::write(tmp.path().join("cache/help/key"), raw).unwrap();

        assert_eq!(bucket.get("key"), None);
    }

    #[test]
    fn test_file_bucket_get_nonexistent_key() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");
        let bucket = cache.bucket("help");

        assert_eq!(bucket.get("nonexistent"), None);
    }

    #[test]
    fn test_file_bucket_overwrite() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");
        let bucket = cache.bucket("help");

        bucket.set("key", b"first", None);
        bucket.set("key", b"second", None);

        assert_eq!(bucket.get("key"), Some(b"second".to_vec()));
    }

    #[test]
    fn test_file_bucket_delete() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");
        let bucket = cache.bucket("help");

        bucket.set("key", b"data", None);
        bucket.delete("key").unwrap();
        assert_eq!(bucket.get("key"), None);

        // Missing entries delete cleanly
        bucket.delete("key").unwrap();
    }

    #[test]
    fn test_file_bucket_delete_rejects_path_traversal() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");
        let bucket = cache.bucket("help");

        assert!(matches!(
            bucket.delete("../VERSION"),
            Err(CacheError::InvalidKey { .. })
        ));
        assert!(tmp.path().join("cache/VERSION").exists());
    }

    #[test]
    fn test_file_cache_buckets_are_isolated() {
        let tmp = TempDir::new().unwrap();
        let cache = FileCache::new(tmp.path().join("cache"), "v1");

        let bucket_a = cache.bucket("alpha");
        let bucket_b = cache.bucket("beta");

        bucket_a.set("key", b"alpha-data", None);
        bucket_b.set("key", b"beta-data", None);

        assert_eq!(bucket_a.get("key"), Some(b"alpha-data".to_vec()));
        assert_eq!(bucket_b.get("key"), Some(b"beta-data".to_vec()));
    }

    #[test]
    fn test_version_match_keeps_cache() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("cache");

        let cache = FileCache::new(root.clone(), "v1");
        cache.bucket("help").set("key", b"preserved", None);

        let cache2 = FileCache::new(root, "v1");
        assert_eq!(cache2.bucket("help").get("key"), Some(b"preserved".to_vec()));
    }

    #[test]
    fn test_version_mismatch_wipes_cache() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("cache");

        let cache = FileCache::new(root.clone(), "v1");
        cache.bucket("help").set("key", b"will-be-wiped", None);

        let cache2 = FileCache::new(root.clone(), "v2");
        assert_eq!(cache2.bucket("help").get("key"), None);

        let version = fs::read_to_string(root.join("VERSION")).unwrap();
        assert_eq!(version, "v2");
    }
}
