//! Hash index from key to entry handle
//!
//! Open chaining over a bucket array whose length is fixed at construction.
//! Chains hold only [`EntryId`]s; keys are read back from the arena, so the
//! index never owns an entry.
//!
//! The table is never resized. The load factor bounds the expected chain
//! length, but adversarial keys can still pile into one bucket.

use std::hash::{BuildHasher, Hash};

use crate::entry::{Arena, EntryId};
use crate::error::{Error, Result};
use crate::hash::{bucket_of, KnuthState};

/// Target ratio of live entries to buckets
pub const LOAD_FACTOR: f64 = 0.75;

/// Bucket count for a cache of the given capacity: `max(1, floor(capacity / 0.75))`
pub fn bucket_count_for(capacity: usize) -> usize {
    ((capacity as f64 / LOAD_FACTOR) as usize).max(1)
}

/// Chained hash index
#[derive(Debug)]
pub struct IndexMap<S = KnuthState> {
    buckets: Vec<Vec<EntryId>>,
    hash_builder: S,
    len: usize,
}

impl IndexMap<KnuthState> {
    /// Create an index sized for `capacity` entries
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_hasher(capacity, KnuthState::default())
    }
}

impl<S: BuildHasher> IndexMap<S> {
    /// Create an index sized for `capacity` entries using `hash_builder`
    ///
    /// # Returns
    /// * `Err(Error::AllocationFailure)` - bucket array could not be reserved
    pub fn with_hasher(capacity: usize, hash_builder: S) -> Result<Self> {
        let bucket_count = bucket_count_for(capacity);
        let mut buckets = Vec::new();
        buckets.try_reserve_exact(bucket_count)?;
        buckets.resize_with(bucket_count, Vec::new);

        Ok(Self {
            buckets,
            hash_builder,
            len: 0,
        })
    }

    /// Number of buckets
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Number of indexed entries
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the index is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check whether `key` is indexed
    pub fn contains<K, V>(&self, entries: &Arena<K, V>, key: &K) -> bool
    where
        K: Hash + Eq,
    {
        self.lookup(entries, key).is_some()
    }

    /// Find the entry stored under `key`
    pub fn lookup<K, V>(&self, entries: &Arena<K, V>, key: &K) -> Option<EntryId>
    where
        K: Hash + Eq,
    {
        self.buckets[self.bucket(key)]
            .iter()
            .copied()
            .find(|&id| entries.get(id).map_or(false, |entry| entry.key() == key))
    }

    /// Reserve chain space so the next `insert` of `key` cannot fail to allocate
    pub fn reserve<K: Hash>(&mut self, key: &K) -> Result<()> {
        let bucket = self.bucket(key);
        self.buckets[bucket].try_reserve(1)?;
        Ok(())
    }

    /// Index the entry `id` under its own key, appending to the chain tail
    ///
    /// # Returns
    /// * `Err(Error::DuplicateKey)` - the key is already indexed
    pub fn insert<K, V>(&mut self, entries: &Arena<K, V>, id: EntryId) -> Result<()>
    where
        K: Hash + Eq,
    {
        let key = entries.get(id)?.key();
        if self.lookup(entries, key).is_some() {
            return Err(Error::DuplicateKey);
        }

        let bucket = self.bucket(key);
        let chain = &mut self.buckets[bucket];
        chain.try_reserve(1)?;
        chain.push(id);
        self.len += 1;
        Ok(())
    }

    /// Overwrite the value stored under `key` in place
    ///
    /// # Returns
    /// * `Err(Error::KeyNotFound)` - the key is not indexed
    pub fn update_value<K, V>(&self, entries: &mut Arena<K, V>, key: &K, value: V) -> Result<()>
    where
        K: Hash + Eq,
    {
        let id = self.lookup(entries, key).ok_or(Error::KeyNotFound)?;
        entries.get_mut(id)?.value = value;
        Ok(())
    }

    /// Unlink the entry `id` from the chain that `key` hashes to
    ///
    /// Matches on the handle, not the key, so the entry may already have
    /// been released from the arena.
    ///
    /// # Returns
    /// * `Err(Error::KeyNotFound)` - `id` is not in that chain
    pub fn remove<K: Hash>(&mut self, key: &K, id: EntryId) -> Result<()> {
        let bucket = self.bucket(key);
        let chain = &mut self.buckets[bucket];
        let pos = chain
            .iter()
            .position(|&candidate| candidate == id)
            .ok_or(Error::KeyNotFound)?;
        chain.remove(pos);
        self.len -= 1;
        Ok(())
    }

    /// Forget every entry, keeping the bucket array
    pub fn clear(&mut self) {
        for chain in &mut self.buckets {
            chain.clear();
        }
        self.len = 0;
    }

    /// Longest chain in the table
    pub fn max_chain_len(&self) -> usize {
        self.buckets.iter().map(Vec::len).max().unwrap_or(0)
    }

    fn bucket<K: Hash + ?Sized>(&self, key: &K) -> usize {
        bucket_of(&self.hash_builder, key, self.buckets.len())
    }
}
