//! Recency list: entries ordered from least to most recently used
//!
//! The list owns the entry arena and is the only place entries are created
//! or destroyed. It enforces the capacity bound by evicting from the oldest
//! end right after an insertion pushes it over.

use crate::entry::{Arena, Entry, EntryId};
use crate::error::{Error, Result};

/// An entry pushed out of the list by an insertion
#[derive(Debug)]
pub struct Evicted<K, V> {
    /// Slot the entry occupied before eviction
    pub id: EntryId,
    /// Key of the evicted entry
    pub key: K,
    /// Value of the evicted entry
    pub value: V,
}

/// Outcome of [`RecencyList::insert_as_newest`]
#[derive(Debug)]
pub struct Inserted<K, V> {
    /// Handle of the new newest entry
    pub id: EntryId,
    /// Oldest entry, if the insertion overflowed the list
    pub evicted: Option<Evicted<K, V>>,
}

/// Capacity-bounded doubly-linked list over arena slots
#[derive(Debug)]
pub struct RecencyList<K, V> {
    entries: Arena<K, V>,
    size: usize,
    capacity: usize,
    oldest: Option<EntryId>,
    newest: Option<EntryId>,
}

impl<K, V> RecencyList<K, V> {
    /// Create an empty list holding at most `capacity` entries
    ///
    /// # Returns
    /// * `Err(Error::InvalidCapacity)` - `capacity` is zero
    /// * `Err(Error::AllocationFailure)` - slot storage could not be reserved
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity);
        }

        // One spare slot: the new entry is linked before the oldest is dropped.
        let entries = Arena::with_capacity(capacity.saturating_add(1))?;

        Ok(Self {
            entries,
            size: 0,
            capacity,
            oldest: None,
            newest: None,
        })
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.size
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Maximum number of live entries
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Least recently used entry
    pub fn oldest(&self) -> Option<EntryId> {
        self.oldest
    }

    /// Most recently used entry
    pub fn newest(&self) -> Option<EntryId> {
        self.newest
    }

    /// Read access to the entry storage
    pub fn entries(&self) -> &Arena<K, V> {
        &self.entries
    }

    /// Write access to entry payloads; links stay private to the list
    pub(crate) fn entries_mut(&mut self) -> &mut Arena<K, V> {
        &mut self.entries
    }

    /// Append a new entry at the newest end, evicting the oldest on overflow
    ///
    /// The key must not already be in the list; the caller checks that.
    /// Storage is reserved before any link changes, so an allocation
    /// failure leaves the list exactly as it was.
    pub fn insert_as_newest(&mut self, key: K, value: V) -> Result<Inserted<K, V>> {
        self.entries.reserve_one()?;

        let mut entry = Entry::new(key, value);
        entry.prev = self.newest;
        let id = self.entries.alloc(entry)?;

        match self.newest {
            Some(newest) => self.entries.get_mut(newest)?.next = Some(id),
            None => self.oldest = Some(id),
        }
        self.newest = Some(id);
        self.size += 1;

        let evicted = if self.size > self.capacity {
            Some(self.pop_oldest()?)
        } else {
            None
        };

        Ok(Inserted { id, evicted })
    }

    /// Move an entry to the newest end
    ///
    /// No allocation happens and the handle stays valid.
    pub fn touch(&mut self, id: EntryId) -> Result<()> {
        if self.newest == Some(id) {
            // Already newest; the handle must still be live.
            self.entries.get(id)?;
            return Ok(());
        }

        self.unlink(id)?;

        let old_newest = self.newest;
        {
            let entry = self.entries.get_mut(id)?;
            entry.prev = old_newest;
            entry.next = None;
        }
        match old_newest {
            Some(newest) => self.entries.get_mut(newest)?.next = Some(id),
            None => self.oldest = Some(id),
        }
        self.newest = Some(id);

        Ok(())
    }

    /// Iterate from the oldest entry to the newest
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            entries: &self.entries,
            cursor: self.oldest,
            remaining: self.size,
        }
    }

    /// Drop every entry
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.size = 0;
        self.oldest = None;
        self.newest = None;
    }

    fn pop_oldest(&mut self) -> Result<Evicted<K, V>> {
        let id = self.oldest.ok_or(Error::StaleEntry)?;
        self.unlink(id)?;
        self.size -= 1;

        let entry = self.entries.release(id)?;
        Ok(Evicted {
            id,
            key: entry.key,
            value: entry.value,
        })
    }

    /// Detach an entry from its neighbours, fixing up both ends
    fn unlink(&mut self, id: EntryId) -> Result<()> {
        let (prev, next) = {
            let entry = self.entries.get_mut(id)?;
            let links = (entry.prev, entry.next);
            entry.prev = None;
            entry.next = None;
            links
        };

        match prev {
            Some(prev_id) => self.entries.get_mut(prev_id)?.next = next,
            None => self.oldest = next,
        }

        match next {
            Some(next_id) => self.entries.get_mut(next_id)?.prev = prev,
            None => self.newest = prev,
        }

        Ok(())
    }
}

/// Iterator over `(key, value)` pairs from oldest to newest
pub struct Iter<'a, K, V> {
    entries: &'a Arena<K, V>,
    cursor: Option<EntryId>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = self.entries.get(self.cursor?).ok()?;
        self.cursor = entry.next;
        self.remaining -= 1;
        Some((&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}
