//! Error types for lrucache

use std::collections::TryReserveError;
use std::fmt;

/// Result type alias for lrucache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache operations
///
/// Only `AllocationFailure` can reach a caller that uses the cache correctly.
/// The remaining variants report a broken agreement between the hash index
/// and the recency list, which is always a bug inside the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Storage for the cache, the bucket array or an entry could not be reserved
    AllocationFailure,

    /// A recency list was asked to hold zero entries
    InvalidCapacity,

    /// Key inserted into the index while already indexed
    DuplicateKey,

    /// Key expected in the index but absent
    KeyNotFound,

    /// Entry handle does not name a live slot
    StaleEntry,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::AllocationFailure => write!(f, "Allocation failure"),
            Error::InvalidCapacity => write!(f, "Invalid capacity: recency list must hold at least one entry"),
            Error::DuplicateKey => write!(f, "Duplicate key in index"),
            Error::KeyNotFound => write!(f, "Key not found in index"),
            Error::StaleEntry => write!(f, "Stale entry handle"),
        }
    }
}

impl std::error::Error for Error {}

impl From<TryReserveError> for Error {
    fn from(_: TryReserveError) -> Self {
        Error::AllocationFailure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserve_error_maps_to_allocation_failure() {
        let mut v: Vec<u64> = Vec::new();
        let err = v.try_reserve(usize::MAX).unwrap_err();
        assert_eq!(Error::from(err), Error::AllocationFailure);
    }

    #[test]
    fn test_display() {
        assert_eq!(Error::KeyNotFound.to_string(), "Key not found in index");
        assert_eq!(Error::DuplicateKey.to_string(), "Duplicate key in index");
    }
}
