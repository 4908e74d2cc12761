//! [FNV-1a] hashing, the default primary hash of [`HashTable`].
//!
//! Bucket placement has to be reproducible: the same customer id must land in
//! the same bucket on every run so reports can be compared between runs. The
//! std [`RandomState`] is seeded per process, so the table defaults to this
//! fixed-basis hash instead. FNV-1a is not collision resistant; tables that
//! hold untrusted keys should pass a seeded hasher to
//! [`HashTable::with_hasher`].
//!
//! [FNV-1a]: https://en.wikipedia.org/wiki/Fowler%E2%80%93Noll%E2%80%93Vo_hash_function
//! [`HashTable`]: crate::collections::hash_table::HashTable
//! [`HashTable::with_hasher`]: crate::collections::hash_table::HashTable::with_hasher
//! [`RandomState`]: std::hash::RandomState

use core::hash::{BuildHasher, Hasher};

/// 64-bit offset basis. Every hash starts from this state.
const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

/// 64-bit FNV prime.
const PRIME: u64 = 0x0000_0100_0000_01b3;

/// Streaming FNV-1a state: each byte is xor-ed in, then multiplied by the
/// FNV prime.
#[derive(Debug, Copy, Clone)]
pub struct FnvHasher(u64);

impl FnvHasher {
    /// Creates a hasher at the offset basis.
    #[inline]
    pub const fn new() -> Self {
        Self(OFFSET_BASIS)
    }
}

impl Default for FnvHasher {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Hasher for FnvHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.0
    }

    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.0 = bytes
            .iter()
            .fold(self.0, |h, b| (h ^ u64::from(*b)).wrapping_mul(PRIME));
    }
}

/// Hands out [`FnvHasher`]s. Carries no seed, so every instance hashes a key
/// to the same value.
///
/// # Examples
///
/// ```
/// use std::hash::BuildHasher;
///
/// use chainkv::collections::fnv::FnvBuildHasher;
///
/// let s = FnvBuildHasher::default();
/// assert_eq!(s.hash_one(42i64), FnvBuildHasher.hash_one(42i64));
/// ```
#[derive(Debug, Default, Copy, Clone)]
pub struct FnvBuildHasher;

impl BuildHasher for FnvBuildHasher {
    type Hasher = FnvHasher;

    #[inline]
    fn build_hasher(&self) -> FnvHasher {
        FnvHasher::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fnv(bytes: &[u8]) -> u64 {
        let mut hasher = FnvHasher::new();
        hasher.write(bytes);
        hasher.finish()
    }

    #[test]
    fn test_empty_input_is_offset_basis() {
        assert_eq!(fnv(b""), OFFSET_BASIS);
    }

    #[test]
    fn test_reference_vectors() {
        assert_eq!(fnv(b"a"), 0xaf63dc4c8601ec8c);
        assert_eq!(fnv(b"foobar"), 0x85944171f73967e8);
    }

    #[test]
    fn test_split_writes_match_single_write() {
        let mut hasher = FnvHasher::new();
        hasher.write(b"foo");
        hasher.write(b"bar");

        assert_eq!(hasher.finish(), fnv(b"foobar"));
    }

    #[test]
    fn test_build_hasher_is_deterministic() {
        let a = FnvBuildHasher;
        let b = FnvBuildHasher::default();

        for key in [0i64, 1, -1, 42, 999, i64::MAX] {
            assert_eq!(a.hash_one(key), b.hash_one(key));
        }
        assert_ne!(a.hash_one(1i64), a.hash_one(2i64));
    }
}
