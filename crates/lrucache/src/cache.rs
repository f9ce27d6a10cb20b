//! StringCache: string-keyed LRU cache with hit/miss accounting

use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::lru::{Iter, LruCache, PutOutcome};
use crate::stats::CacheStats;

/// Fixed-capacity cache mapping `String` keys to `String` values
///
/// `get` and `put` both mark the touched key as most recently used; when a
/// new key arrives at capacity the least recently used entry is evicted.
/// Not internally synchronized: share across threads behind a lock.
pub struct StringCache {
    /// Recency list and key index
    cache: LruCache<String, String>,

    /// Cache statistics
    stats: CacheStats,
}

impl StringCache {
    /// Create an empty cache holding at most `capacity` entries
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries, must be greater than zero
    ///
    /// # Returns
    /// * `Result<StringCache>` - `Error::InvalidCapacity` when `capacity` is zero
    pub fn new(capacity: usize) -> Result<Self> {
        let cache = LruCache::new(capacity)?;
        debug!(capacity, "created LRU cache");

        Ok(Self {
            cache,
            stats: CacheStats::new(),
        })
    }

    /// Look up a value and mark it most recently used
    ///
    /// # Arguments
    /// * `key` - Key to look up
    ///
    /// # Returns
    /// * `Result<&str>` - The cached value, or `Error::KeyNotFound` on a miss
    pub fn get(&mut self, key: &str) -> Result<&str> {
        match self.cache.get(key) {
            Some(value) => {
                self.stats.record_hit();
                Ok(value.as_str())
            }
            None => {
                self.stats.record_miss();
                Err(Error::KeyNotFound(key.to_owned()))
            }
        }
    }

    /// Insert or update a key, marking it most recently used
    ///
    /// # Arguments
    /// * `key` - Key to store
    /// * `value` - Value to associate with `key`
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        match self.cache.put(key.into(), value.into()) {
            PutOutcome::Inserted => self.stats.record_insert(),
            PutOutcome::Updated(_) => self.stats.record_update(),
            PutOutcome::Evicted { key, .. } => {
                trace!(key = %key, "evicted least recently used entry");
                self.stats.record_eviction();
                self.stats.record_insert();
            }
        }
    }

    /// Look up a value without affecting recency or stats
    pub fn peek(&self, key: &str) -> Option<&str> {
        self.cache.peek(key).map(String::as_str)
    }

    /// Check whether a key is cached without affecting recency or stats
    pub fn contains_key(&self, key: &str) -> bool {
        self.cache.contains_key(key)
    }

    /// Remove a key, returning its value if it was cached
    ///
    /// Stats are untouched; only capacity pressure counts as an eviction.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.cache.remove(key)
    }

    /// Entries from most to least recently used
    pub fn iter(&self) -> Iter<'_, String, String> {
        self.cache.iter()
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Get current number of entries
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.cache.capacity()
    }

    /// Drop every entry and reset statistics; capacity is unchanged
    pub fn clear(&mut self) {
        self.cache.clear();
        self.stats.reset();
    }
}

impl std::fmt::Debug for StringCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StringCache")
            .field("capacity", &self.capacity())
            .field("entries", &self.cache)
            .field("stats", &self.stats)
            .finish()
    }
}
