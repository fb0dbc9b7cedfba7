//! The table's single, fixed hash function.
//!
//! Integers of 64 bits or fewer hash to themselves, so such an integer
//! key `k` lands in bucket `k mod N`. A `u128`/`i128` is written as two
//! words and does not follow that rule. Byte strings use FNV-1a. Every write after the first is
//! folded into the running state, so composite keys depend on all of
//! their fields. There is no random seed: the same key hashes the same
//! way in every table and every process.

use core::hash::{BuildHasher, BuildHasherDefault, Hash, Hasher};

const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

/// Builder used by every [`BucketTable`](crate::BucketTable).
pub type DefaultBuildHasher = BuildHasherDefault<TableHasher>;

/// Deterministic hasher: identity on the first integer of up to 64 bits,
/// FNV-1a on bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableHasher {
    hash: u64,
    written: bool,
}

impl TableHasher {
    #[inline]
    fn write_word(&mut self, n: u64) {
        if self.written {
            self.hash = (self.hash.rotate_left(5) ^ n).wrapping_mul(FNV_PRIME);
        } else {
            self.hash = n;
            self.written = true;
        }
    }
}

impl Hasher for TableHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        let mut h = if self.written {
            self.hash
        } else {
            FNV_OFFSET_BASIS
        };
        for &b in bytes {
            h ^= u64::from(b);
            h = h.wrapping_mul(FNV_PRIME);
        }
        self.hash = h;
        self.written = true;
    }

    #[inline]
    fn write_u8(&mut self, n: u8) {
        self.write_word(u64::from(n));
    }

    #[inline]
    fn write_u16(&mut self, n: u16) {
        self.write_word(u64::from(n));
    }

    #[inline]
    fn write_u32(&mut self, n: u32) {
        self.write_word(u64::from(n));
    }

    #[inline]
    fn write_u64(&mut self, n: u64) {
        self.write_word(n);
    }

    #[inline]
    fn write_u128(&mut self, n: u128) {
        self.write_word(n as u64);
        self.write_word((n >> 64) as u64);
    }

    #[inline]
    fn write_usize(&mut self, n: usize) {
        self.write_word(n as u64);
    }
}

/// Hash `key` with the table's default hasher.
#[inline]
pub(crate) fn hash_key<Q>(key: &Q) -> u64
where
    Q: ?Sized + Hash,
{
    DefaultBuildHasher::default().hash_one(key)
}
