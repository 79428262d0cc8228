//! Time-stamped caching for reference data
//!
//! Two tiers:
//! - L1: in-memory LRU cache for fast access
//! - L2: JSON files on disk so fresh data survives restarts
//!
//! Every entry carries its fetch timestamp. A lookup only returns data
//! younger than the TTL; anything older is a miss and the caller refetches.
//! The cache is owned by the client object rather than living in a global
//! static, so invalidation rules stay explicit, and the disk tier's base
//! directory is injectable so tests never touch the user's cache.

use lru::LruCache;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    fmt, fs,
    hash::Hash,
    io::{Read, Write},
    num::NonZeroUsize,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
    time::{Duration, SystemTime, UNIX_EPOCH},
};
use tracing::debug;

use crate::model::{Map, Operator, Weapon};

/// Reference data stays valid for 30 minutes after a fetch.
pub const REFERENCE_TTL: Duration = Duration::from_secs(30 * 60);

/// Default disk tier location: ~/.cache/siege-stats/
pub fn default_cache_dir() -> PathBuf {
    let base = dirs::cache_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".cache");
        home
    });
    base.join("siege-stats")
}

/// Try to read a file into a String
pub fn try_read_to_string(path: &Path) -> Option<String> {
    let mut f = fs::File::open(path).ok()?;
    let mut s = String::new();

    f.read_to_string(&mut s).ok()?;

    Some(s)
}

/// Write a string to file
pub fn write_string(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut f = fs::File::create(path)?;
    f.write_all(contents.as_bytes())
}

/// Generic cache key that can be used for both memory and disk caching
pub trait CacheKey: Hash + Eq + Clone + Send + Sync {
    /// Generate a string representation for file system storage
    fn to_file_key(&self) -> String;
}

/// Which reference collection a cache entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Operators,
    Weapons,
    Maps,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceKind::Operators => write!(f, "operators"),
            ReferenceKind::Weapons => write!(f, "weapons"),
            ReferenceKind::Maps => write!(f, "maps"),
        }
    }
}

/// Cache key for reference data queries.
///
/// The active filter set is part of the key: a request with different
/// filters never reuses a cached payload fetched under other filters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReferenceCacheKey {
    pub kind: ReferenceKind,
    pub filters: Vec<(String, String)>,
}

impl ReferenceCacheKey {
    pub fn unfiltered(kind: ReferenceKind) -> Self {
        Self {
            kind,
            filters: Vec::new(),
        }
    }
}

impl CacheKey for ReferenceCacheKey {
    fn to_file_key(&self) -> String {
        let filters_hash = if self.filters.is_empty() {
            "unfiltered".to_string()
        } else {
            self.filters
                .iter()
                .map(|(k, v)| format!("{}-{}", k, v.to_lowercase().replace(' ', "_")))
                .collect::<Vec<_>>()
                .join("_")
        };

        format!("reference_{}_{}", self.kind, filters_hash)
    }
}

/// A cached value plus the moment it was fetched, in unix seconds so disk
/// entries keep their age across processes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimedEntry<V> {
    pub fetched_at_unix: u64,
    pub value: V,
}

impl<V> TimedEntry<V> {
    pub fn now(value: V) -> Self {
        Self {
            fetched_at_unix: unix_now(),
            value,
        }
    }

    /// Whether the entry is still younger than `ttl`.
    pub fn is_fresh(&self, ttl: Duration) -> bool {
        unix_now().saturating_sub(self.fetched_at_unix) < ttl.as_secs()
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// TTL-aware cache that combines an LRU memory tier with file persistence.
pub struct TimedCache<K, V>
where
    K: CacheKey,
    V: Clone + Serialize + DeserializeOwned,
{
    memory_cache: Arc<Mutex<LruCache<K, TimedEntry<V>>>>,
    memory_capacity: usize,
    base_dir: PathBuf,
}

impl<K, V> TimedCache<K, V>
where
    K: CacheKey,
    V: Clone + Serialize + DeserializeOwned,
{
    /// Create a new cache with the given memory capacity, persisting under
    /// the default cache directory.
    pub fn new(memory_capacity: usize) -> Self {
        Self::with_base_dir(memory_capacity, default_cache_dir())
    }

    /// Create a new cache persisting its disk tier under `base_dir`.
    pub fn with_base_dir(memory_capacity: usize, base_dir: PathBuf) -> Self {
        Self {
            memory_cache: Arc::new(Mutex::new(LruCache::new(
                NonZeroUsize::new(memory_capacity).unwrap(),
            ))),
            memory_capacity,
            base_dir,
        }
    }

    fn file_path(&self, key: &K) -> PathBuf {
        self.base_dir.join(format!("{}.json", key.to_file_key()))
    }

    /// Get a fresh entry (checks memory first, then disk).
    ///
    /// Entries older than `ttl` are treated as misses and dropped from the
    /// memory tier.
    pub fn get(&self, key: &K, ttl: Duration) -> Option<V> {
        {
            let mut mem = self.memory_cache.lock().unwrap();
            let hit = mem.get(key).map(|entry| {
                if entry.is_fresh(ttl) {
                    Some(entry.value.clone())
                } else {
                    None
                }
            });
            match hit {
                Some(Some(value)) => {
                    debug!(key = %key.to_file_key(), "cache hit (memory)");
                    return Some(value);
                }
                // Stale entries are evicted, not served.
                Some(None) => {
                    mem.pop(key);
                }
                None => {}
            }
        }

        if let Some(entry) = self.get_from_disk(key) {
            if entry.is_fresh(ttl) {
                debug!(key = %key.to_file_key(), "cache hit (disk)");
                // Promote to memory cache
                self.memory_cache
                    .lock()
                    .unwrap()
                    .put(key.clone(), entry.clone());
                return Some(entry.value);
            }
        }

        debug!(key = %key.to_file_key(), "cache miss");
        None
    }

    /// Put an item into cache, stamping the fetch time.
    pub fn put(&self, key: K, value: V) {
        let entry = TimedEntry::now(value);

        self.memory_cache
            .lock()
            .unwrap()
            .put(key.clone(), entry.clone());

        let _ = self.put_to_disk(&key, &entry);
    }

    fn get_from_disk(&self, key: &K) -> Option<TimedEntry<V>> {
        let content = try_read_to_string(&self.file_path(key))?;
        serde_json::from_str(&content).ok()
    }

    fn put_to_disk(&self, key: &K, entry: &TimedEntry<V>) -> std::io::Result<()> {
        let content = serde_json::to_string_pretty(entry)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        write_string(&self.file_path(key), &content)
    }

    /// Clear memory cache only (keeps disk cache)
    pub fn clear_memory(&self) {
        self.memory_cache.lock().unwrap().clear();
    }

    /// Remove the disk entry for a specific key.
    pub fn invalidate_disk_cache(&self, key: &K) -> std::io::Result<()> {
        let path = self.file_path(key);
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Get memory cache statistics
    pub fn memory_stats(&self) -> (usize, usize) {
        let cache = self.memory_cache.lock().unwrap();
        (cache.len(), self.memory_capacity)
    }
}

/// All caches used by a client, one per reference collection.
pub struct CacheManager {
    pub operators: TimedCache<ReferenceCacheKey, Vec<Operator>>,
    pub weapons: TimedCache<ReferenceCacheKey, Vec<Weapon>>,
    pub maps: TimedCache<ReferenceCacheKey, Vec<Map>>,
}

impl CacheManager {
    pub fn new() -> Self {
        Self::with_base_dir(default_cache_dir())
    }

    /// Persist all disk tiers under `base_dir` instead of the default
    /// cache directory.
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self {
            operators: TimedCache::with_base_dir(8, base_dir.clone()),
            weapons: TimedCache::with_base_dir(8, base_dir.clone()),
            maps: TimedCache::with_base_dir(8, base_dir),
        }
    }

    /// Clear all memory caches
    pub fn clear_all_memory(&self) {
        self.operators.clear_memory();
        self.weapons.clear_memory();
        self.maps.clear_memory();
    }
}

impl Default for CacheManager {
    fn default() -> Self {
        Self::new()
    }
}
