//! Cache entries and the slot arena that owns them
//!
//! Every live entry sits in exactly one arena slot. The recency list and the
//! hash index refer to it through an [`EntryId`], never through a reference,
//! so eviction cannot leave a dangling link behind.

use crate::error::{Error, Result};

/// Stable handle to an arena slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(usize);

impl EntryId {
    /// Slot index behind this handle
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single cache slot
#[derive(Debug)]
pub struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    /// Neighbour towards the oldest end
    pub(crate) prev: Option<EntryId>,
    /// Neighbour towards the newest end
    pub(crate) next: Option<EntryId>,
}

impl<K, V> Entry<K, V> {
    pub(crate) fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            prev: None,
            next: None,
        }
    }

    /// Key stored in this entry
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Value stored in this entry
    pub fn value(&self) -> &V {
        &self.value
    }
}

/// Contiguous slot storage with a free list for reuse after eviction
#[derive(Debug)]
pub struct Arena<K, V> {
    slots: Vec<Option<Entry<K, V>>>,
    free_list: Vec<usize>,
}

impl<K, V> Arena<K, V> {
    /// Reserve room for `capacity` entries up front
    pub(crate) fn with_capacity(capacity: usize) -> Result<Self> {
        let mut slots = Vec::new();
        slots.try_reserve_exact(capacity)?;
        let mut free_list = Vec::new();
        free_list.try_reserve_exact(capacity)?;

        Ok(Self { slots, free_list })
    }

    /// Make sure the next `alloc` cannot fail
    pub(crate) fn reserve_one(&mut self) -> Result<()> {
        if self.free_list.is_empty() {
            self.slots.try_reserve(1)?;
        }
        // Releasing a slot pushes onto the free list; keep that infallible too.
        self.free_list.try_reserve(1)?;
        Ok(())
    }

    /// Place an entry in a free slot, growing the storage if none is free
    pub(crate) fn alloc(&mut self, entry: Entry<K, V>) -> Result<EntryId> {
        if let Some(idx) = self.free_list.pop() {
            self.slots[idx] = Some(entry);
            return Ok(EntryId(idx));
        }

        self.slots.try_reserve(1)?;
        let idx = self.slots.len();
        self.slots.push(Some(entry));
        Ok(EntryId(idx))
    }

    /// Take the entry out of its slot and mark the slot free
    pub(crate) fn release(&mut self, id: EntryId) -> Result<Entry<K, V>> {
        let entry = self
            .slots
            .get_mut(id.0)
            .and_then(Option::take)
            .ok_or(Error::StaleEntry)?;
        self.free_list.push(id.0);
        Ok(entry)
    }

    /// Borrow a live entry
    pub fn get(&self, id: EntryId) -> Result<&Entry<K, V>> {
        self.slots
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(Error::StaleEntry)
    }

    /// Mutably borrow a live entry
    pub(crate) fn get_mut(&mut self, id: EntryId) -> Result<&mut Entry<K, V>> {
        self.slots
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(Error::StaleEntry)
    }

    /// Number of live entries
    pub fn live(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }

    /// Drop every entry and forget all slots
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_and_get() {
        let mut arena = Arena::with_capacity(2).unwrap();
        let a = arena.alloc(Entry::new(1, "a")).unwrap();
        let b = arena.alloc(Entry::new(2, "b")).unwrap();

        assert_ne!(a, b);
        assert_eq!(arena.get(a).unwrap().value(), &"a");
        assert_eq!(arena.get(b).unwrap().key(), &2);
        assert_eq!(arena.live(), 2);
    }

    #[test]
    fn test_release_reuses_slot() {
        let mut arena = Arena::with_capacity(2).unwrap();
        let a = arena.alloc(Entry::new(1, 10)).unwrap();
        arena.alloc(Entry::new(2, 20)).unwrap();

        let released = arena.release(a).unwrap();
        assert_eq!(released.key, 1);
        assert_eq!(arena.live(), 1);
        assert_eq!(arena.get(a).unwrap_err(), Error::StaleEntry);

        let c = arena.alloc(Entry::new(3, 30)).unwrap();
        assert_eq!(c, a);
        assert_eq!(arena.get(c).unwrap().value, 30);
    }

    #[test]
    fn test_double_release_is_stale() {
        let mut arena = Arena::with_capacity(1).unwrap();
        let a = arena.alloc(Entry::new(1, 1)).unwrap();

        arena.release(a).unwrap();
        assert_eq!(arena.release(a).unwrap_err(), Error::StaleEntry);
        assert_eq!(arena.live(), 0);
    }

    #[test]
    fn test_oversized_arena_fails() {
        let result = Arena::<u64, u64>::with_capacity(usize::MAX);
        assert_eq!(result.unwrap_err(), Error::AllocationFailure);
    }
}
