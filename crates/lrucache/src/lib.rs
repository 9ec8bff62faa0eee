//! # lrucache
//!
//! Fixed-capacity key/value cache with least-recently-used eviction.
//!
//! ## Architecture
//! - **Arena**: every entry lives in one slot, addressed by a stable [`EntryId`]
//! - **IndexMap**: chained hash index from key to slot (O(1) average lookup)
//! - **RecencyList**: doubly-linked list over slots, oldest to newest (O(1) reorder and evict)
//! - **LruCache**: routes each `get`/`put` through both and keeps them in lockstep
//!
//! ```
//! use lrucache::LruCache;
//!
//! let mut cache = LruCache::new(2)?;
//! cache.put(1, 1)?;
//! cache.put(2, 2)?;
//! assert_eq!(cache.get(&1)?, Some(&1));
//!
//! // 2 is now least recently used
//! assert_eq!(cache.put(3, 3)?, Some((2, 2)));
//! assert_eq!(cache.get(&2)?, None);
//! # Ok::<(), lrucache::Error>(())
//! ```

#![warn(missing_docs)]

mod cache;
mod entry;
mod error;
mod hash;
mod list;
mod map;
mod stats;

pub use cache::LruCache;
pub use entry::{Arena, Entry, EntryId};
pub use error::{Error, Result};
pub use hash::{KnuthHasher, KnuthState, KNUTH_MULTIPLIER};
pub use list::{Evicted, Inserted, Iter, RecencyList};
pub use map::{bucket_count_for, IndexMap, LOAD_FACTOR};
pub use stats::CacheStats;
