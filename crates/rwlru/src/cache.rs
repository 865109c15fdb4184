//! Thread-safe LRU cache
//!
//! One `parking_lot::RwLock` guards the store and the recency list together.
//! Writers (`set`, a `get` hit, `close`) hold it exclusively; plain lookups and
//! snapshots share it. `get` starts with an upgradable read so concurrent
//! readers are not blocked on a miss, and upgrades atomically on a hit.

use std::hash::Hash;

use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::lru::{Insertion, KeySet, LruCore, ValueMap};
use crate::stats::CacheStats;

/// Fixed-capacity LRU cache safe to share between threads
///
/// Share it with `Arc<LruCache<K, V>>`. Once [`close`](LruCache::close) has
/// been called every operation returns [`Error::Closed`].
pub struct LruCache<K, V> {
    /// Store and recency list; `None` once closed
    inner: RwLock<Option<LruCore<K, V>>>,

    /// Cache statistics
    stats: CacheStats,

    /// Maximum number of entries
    capacity: usize,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new cache holding at most `capacity` entries
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries, fixed for the cache's lifetime
    ///
    /// # Returns
    /// * `Result<LruCache>` - `Error::InvalidCapacity` if `capacity` is zero
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity(capacity));
        }

        debug!(capacity, "lru cache created");

        Ok(Self {
            inner: RwLock::new(Some(LruCore::new(capacity))),
            stats: CacheStats::new(),
            capacity,
        })
    }

    /// Insert or overwrite a value and mark its key most recently used
    ///
    /// Inserting a new key into a full cache evicts the least recently used
    /// entry first.
    ///
    /// # Returns
    /// * `Result<()>` - `Ok(())` once the entry is stored; `Error::Closed`
    ///   after [`close`](LruCache::close)
    pub fn set(&self, key: K, value: V) -> Result<()> {
        let mut guard = self.inner.write();
        let core = guard.as_mut().ok_or(Error::Closed)?;

        match core.set(key, value) {
            Insertion::Updated => self.stats.record_update(),
            Insertion::Inserted => self.stats.record_insert(),
            Insertion::Evicted => {
                self.stats.record_insert();
                self.stats.record_eviction();
                trace!(len = core.len(), "evicted least recently used entry");
            }
        }

        Ok(())
    }

    /// Get a copy of a value and mark its key most recently used
    ///
    /// # Returns
    /// * `Result<Option<V>>` - `Ok(None)` if the key is absent; a miss
    ///   changes nothing
    pub fn get(&self, key: &K) -> Result<Option<V>>
    where
        V: Clone,
    {
        let guard = self.inner.upgradable_read();
        let core = guard.as_ref().ok_or(Error::Closed)?;

        if !core.contains_key(key) {
            self.stats.record_miss();
            return Ok(None);
        }

        // Upgrade is atomic: no writer can run between the check and the promotion
        let mut guard = RwLockUpgradableReadGuard::upgrade(guard);
        let core = guard.as_mut().ok_or(Error::Closed)?;

        match core.get(key) {
            Some(value) => {
                self.stats.record_hit();
                trace!("promoted key to most recently used");
                Ok(Some(value.clone()))
            }
            None => {
                self.stats.record_miss();
                Ok(None)
            }
        }
    }

    /// Get a copy of a value without changing the recency order
    pub fn peek(&self, key: &K) -> Result<Option<V>>
    where
        V: Clone,
    {
        let guard = self.inner.read();
        let core = guard.as_ref().ok_or(Error::Closed)?;
        Ok(core.peek(key).cloned())
    }

    /// Check whether a key is cached
    ///
    /// The answer may be stale as soon as the lock is released.
    pub fn contains_key(&self, key: &K) -> Result<bool> {
        let guard = self.inner.read();
        let core = guard.as_ref().ok_or(Error::Closed)?;
        Ok(core.contains_key(key))
    }

    /// Owned snapshot of the cached keys
    pub fn keys(&self) -> Result<KeySet<K>> {
        let guard = self.inner.read();
        let core = guard.as_ref().ok_or(Error::Closed)?;
        Ok(core.keys())
    }

    /// Owned snapshot of the cached keys, most recently used first
    pub fn keys_by_recency(&self) -> Result<Vec<K>> {
        let guard = self.inner.read();
        let core = guard.as_ref().ok_or(Error::Closed)?;
        Ok(core.keys_by_recency())
    }

    /// Owned snapshot of the cached entries
    pub fn values(&self) -> Result<ValueMap<K, V>>
    where
        V: Clone,
    {
        let guard = self.inner.read();
        let core = guard.as_ref().ok_or(Error::Closed)?;
        Ok(core.values())
    }

    /// Number of cached entries
    pub fn count(&self) -> Result<usize> {
        let guard = self.inner.read();
        let core = guard.as_ref().ok_or(Error::Closed)?;
        Ok(core.len())
    }

    /// Check if the cache holds no entries
    pub fn is_empty(&self) -> Result<bool> {
        let guard = self.inner.read();
        let core = guard.as_ref().ok_or(Error::Closed)?;
        Ok(core.is_empty())
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Check if the cache has been closed
    pub fn is_closed(&self) -> bool {
        self.inner.read().is_none()
    }

    /// Release all entries; later calls return `Error::Closed`
    ///
    /// Safe to call more than once. Dropping the cache releases the same
    /// resources, so calling this is only needed while other handles remain.
    pub fn close(&self) {
        let mut guard = self.inner.write();
        if let Some(core) = guard.take() {
            debug!(entries = core.len(), "lru cache closed");
        }
    }
}
