//! LruCache: hash index and recency list kept in lockstep

use std::hash::{BuildHasher, Hash};

use tracing::{debug, error, trace};

use crate::error::{Error, Result};
use crate::hash::KnuthState;
use crate::list::RecencyList;
use crate::map::IndexMap;
use crate::stats::CacheStats;

/// The two structures describing the live entries
#[derive(Debug)]
struct Inner<K, V, S> {
    map: IndexMap<S>,
    list: RecencyList<K, V>,
}

/// Fixed-capacity cache evicting the least recently used entry
///
/// Not thread-safe: wrap it in a lock to share it.
///
/// A capacity of zero is allowed. Such a cache never stores anything, every
/// `get` misses and every `put` is a no-op.
#[derive(Debug)]
pub struct LruCache<K, V, S = KnuthState> {
    capacity: usize,
    /// `None` exactly when `capacity == 0`
    inner: Option<Inner<K, V, S>>,
    stats: CacheStats,
}

impl<K, V> LruCache<K, V, KnuthState>
where
    K: Hash + Eq,
{
    /// Create a new LRU cache with the given capacity
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries held at once
    ///
    /// # Returns
    /// * `Result<LruCache>` - Empty cache, or `AllocationFailure`
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_hasher(capacity, KnuthState::default())
    }
}

impl<K, V, S> LruCache<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Create a new LRU cache that hashes keys with `hash_builder`
    pub fn with_hasher(capacity: usize, hash_builder: S) -> Result<Self> {
        let inner = if capacity == 0 {
            None
        } else {
            let map = IndexMap::with_hasher(capacity, hash_builder)?;
            let list = RecencyList::new(capacity)?;
            Some(Inner { map, list })
        };

        debug!(
            capacity,
            buckets = inner.as_ref().map_or(0, |inner| inner.map.bucket_count()),
            "LRU cache created"
        );

        Ok(Self {
            capacity,
            inner,
            stats: CacheStats::new(),
        })
    }

    /// Get a value and mark it most recently used
    ///
    /// # Returns
    /// * `Ok(Some(&V))` - key present
    /// * `Ok(None)` - miss
    /// * `Err(_)` - index and list disagree (internal bug)
    pub fn get(&mut self, key: &K) -> Result<Option<&V>> {
        let Some(inner) = self.inner.as_mut() else {
            self.stats.record_miss();
            return Ok(None);
        };

        let Some(id) = inner.map.lookup(inner.list.entries(), key) else {
            self.stats.record_miss();
            return Ok(None);
        };

        inner.list.touch(id).map_err(out_of_sync)?;
        self.stats.record_hit();

        let entry = inner.list.entries().get(id).map_err(out_of_sync)?;
        Ok(Some(entry.value()))
    }

    /// Insert or update a key-value pair
    ///
    /// Updating counts as a use and promotes the key. Inserting into a full
    /// cache evicts the least recently used entry, which is handed back.
    ///
    /// # Returns
    /// * `Ok(Some((K, V)))` - the evicted pair
    /// * `Ok(None)` - nothing was evicted
    /// * `Err(Error::AllocationFailure)` - entry storage could not grow; the
    ///   cache is unchanged
    pub fn put(&mut self, key: K, value: V) -> Result<Option<(K, V)>> {
        let Some(inner) = self.inner.as_mut() else {
            return Ok(None);
        };

        if let Some(id) = inner.map.lookup(inner.list.entries(), &key) {
            inner
                .map
                .update_value(inner.list.entries_mut(), &key, value)
                .map_err(out_of_sync)?;
            inner.list.touch(id).map_err(out_of_sync)?;
            self.stats.record_update();
            return Ok(None);
        }

        // Everything that can run out of memory happens before the first write.
        inner.map.reserve(&key)?;
        let inserted = inner.list.insert_as_newest(key, value)?;

        // Drop the evicted key from the index before indexing the new one.
        let evicted = match inserted.evicted {
            Some(evicted) => {
                inner
                    .map
                    .remove(&evicted.key, evicted.id)
                    .map_err(out_of_sync)?;
                trace!(slot = evicted.id.index(), "evicted least recently used entry");
                self.stats.record_eviction();
                Some((evicted.key, evicted.value))
            }
            None => None,
        };

        inner
            .map
            .insert(inner.list.entries(), inserted.id)
            .map_err(out_of_sync)?;
        self.stats.record_insert();

        Ok(evicted)
    }

    /// Check whether a key is present without touching its recency
    pub fn contains(&self, key: &K) -> bool {
        self.inner
            .as_ref()
            .map_or(false, |inner| inner.map.contains(inner.list.entries(), key))
    }

    /// Iterate over entries from least to most recently used
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self.inner.iter().flat_map(|inner| inner.list.iter())
    }

    /// Get the current number of entries
    pub fn len(&self) -> usize {
        self.inner.as_ref().map_or(0, |inner| inner.list.len())
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Reset cache statistics (entries are kept)
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    /// Release every entry and the index storage
    pub fn destroy(mut self) {
        if let Some(inner) = self.inner.as_mut() {
            inner.map.clear();
            inner.list.clear();
        }
        debug!(capacity = self.capacity, "LRU cache destroyed");
    }
}

fn out_of_sync(err: Error) -> Error {
    error!(error = %err, "hash index and recency list out of sync");
    err
}
