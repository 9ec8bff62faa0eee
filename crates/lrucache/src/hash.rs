//! Knuth multiplicative hashing
//!
//! The hasher folds whatever the key writes into a 32-bit word and multiplies
//! it by the golden-ratio constant modulo 2^32. For a key that writes a single
//! 32-bit integer this is exactly `key * 2654435761 mod 2^32`, so bucket
//! placement is reproducible across runs and platforms.

use std::hash::{BuildHasher, BuildHasherDefault, Hash, Hasher};

/// Golden-ratio multiplier (floor(2^32 / phi))
pub const KNUTH_MULTIPLIER: u32 = 2_654_435_761;

/// Deterministic multiplicative hasher
#[derive(Debug, Default, Clone, Copy)]
pub struct KnuthHasher {
    state: u32,
}

impl KnuthHasher {
    #[inline]
    fn mix(&mut self, word: u32) {
        self.state = self.state.rotate_left(5) ^ word;
    }
}

impl Hasher for KnuthHasher {
    #[inline]
    fn finish(&self) -> u64 {
        u64::from(self.state.wrapping_mul(KNUTH_MULTIPLIER))
    }

    fn write(&mut self, bytes: &[u8]) {
        let mut chunks = bytes.chunks_exact(4);
        for chunk in &mut chunks {
            self.mix(u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
        }
        for &byte in chunks.remainder() {
            self.mix(u32::from(byte));
        }
    }

    #[inline]
    fn write_u8(&mut self, i: u8) {
        self.mix(u32::from(i));
    }

    #[inline]
    fn write_u16(&mut self, i: u16) {
        self.mix(u32::from(i));
    }

    #[inline]
    fn write_u32(&mut self, i: u32) {
        self.mix(i);
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.mix(i as u32);
        self.mix((i >> 32) as u32);
    }

    #[inline]
    fn write_usize(&mut self, i: usize) {
        self.write_u64(i as u64);
    }

    #[inline]
    fn write_i8(&mut self, i: i8) {
        self.write_u8(i as u8);
    }

    #[inline]
    fn write_i16(&mut self, i: i16) {
        self.write_u16(i as u16);
    }

    #[inline]
    fn write_i32(&mut self, i: i32) {
        self.mix(i as u32);
    }

    #[inline]
    fn write_i64(&mut self, i: i64) {
        self.write_u64(i as u64);
    }

    #[inline]
    fn write_isize(&mut self, i: isize) {
        self.write_u64(i as u64);
    }
}

/// Default hasher builder for the cache index
pub type KnuthState = BuildHasherDefault<KnuthHasher>;

/// Bucket a key falls into for a table of `bucket_count` buckets
#[inline]
pub(crate) fn bucket_of<K, S>(hash_builder: &S, key: &K, bucket_count: usize) -> usize
where
    K: Hash + ?Sized,
    S: BuildHasher,
{
    (hash_builder.hash_one(key) % bucket_count as u64) as usize
}
