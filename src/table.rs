//! BucketTable: a fixed array of tagged buckets.

use crate::bucket::{Bucket, Entry, Placement};
use crate::error::TableError;
use crate::hasher::hash_key;
use crate::iter::{IntoIter, Iter, IterMut};
use core::borrow::Borrow;
use core::convert::Infallible;
use core::fmt;
use core::hash::Hash;
use log::{debug, trace};

/// Bucket count used by [`BucketTable::new`].
pub const DEFAULT_BUCKETS: usize = 30;

/// Fixed-capacity hash table with insert-if-absent semantics.
///
/// The bucket array is allocated once and never resized. A key always
/// lives in bucket `hash(key) % bucket_count()`; keys sharing a bucket are
/// kept in insertion order.
///
/// Inserting a key that is already present is a no-op: the first value
/// written for a key wins until that key is removed.
#[derive(Clone)]
pub struct BucketTable<K, V> {
    buckets: Box<[Bucket<K, V>]>,
    len: usize,
}

impl<K, V> BucketTable<K, V> {
    /// Table with [`DEFAULT_BUCKETS`] buckets, all empty.
    pub fn new() -> Self {
        Self::allocate(Vec::with_capacity(DEFAULT_BUCKETS), DEFAULT_BUCKETS)
    }

    /// Table with `count` buckets. Fails when `count` is zero or the bucket
    /// array cannot be allocated.
    pub fn with_buckets(count: usize) -> Result<Self, TableError> {
        if count == 0 {
            return Err(TableError::ZeroBuckets);
        }
        let mut buckets = Vec::new();
        buckets.try_reserve_exact(count)?;
        Ok(Self::allocate(buckets, count))
    }

    /// Fill `buckets` (already holding room for `count`) with empty buckets.
    fn allocate(mut buckets: Vec<Bucket<K, V>>, count: usize) -> Self {
        buckets.resize_with(count, Bucket::default);
        debug!("bucket table allocated with {} buckets", count);
        Self {
            buckets: buckets.into_boxed_slice(),
            len: 0,
        }
    }

    /// Number of stored pairs.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Fixed number of buckets chosen at construction.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Drop every entry. The bucket array itself is kept.
    pub fn clear(&mut self) {
        for b in self.buckets.iter_mut() {
            *b = Bucket::Empty;
        }
        self.len = 0;
    }

    /// Pairs in bucket order, then insertion order within a bucket.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.buckets, self.len)
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(&mut self.buckets, self.len)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }
}

impl<K, V> BucketTable<K, V>
where
    K: Eq + Hash,
{
    /// Index of the bucket `q` maps to. Stable for the table's lifetime.
    pub fn bucket_index<Q>(&self, q: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash,
    {
        (hash_key(q) % self.buckets.len() as u64) as usize
    }

    /// Insert `key -> value` unless `key` is already present.
    ///
    /// Returns `true` when the pair was stored. When the key exists the
    /// table is unchanged and `value` is dropped. Allocation failure while
    /// growing a collision sequence aborts, as with `Vec::push`.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let stored = self.place(key, value, |entries, additional| {
            entries.reserve(additional);
            Ok::<(), Infallible>(())
        });
        match stored {
            Ok(stored) => stored,
            Err(never) => match never {},
        }
    }

    /// Like [`insert`](Self::insert), but reports allocation failure as
    /// [`TableError::Alloc`]. On error the table is unchanged.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<bool, TableError> {
        let stored = self.place(key, value, |entries, additional| {
            entries.try_reserve(additional)
        })?;
        Ok(stored)
    }

    fn place<E, G>(&mut self, key: K, value: V, grow: G) -> Result<bool, E>
    where
        G: FnMut(&mut Vec<Entry<K, V>>, usize) -> Result<(), E>,
    {
        let index = self.bucket_index(&key);
        let placement = self.buckets[index].insert_with(key, value, grow)?;
        match placement {
            Placement::Occupied => trace!("bucket {}: key already present, insert skipped", index),
            Placement::Promoted => trace!("bucket {}: single promoted to collision", index),
            Placement::Filled | Placement::Appended => {}
        }
        if placement.stored() {
            self.len += 1;
        }
        Ok(placement.stored())
    }

    /// Borrow the value stored for `q`.
    pub fn get<Q>(&self, q: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get_key_value(q).map(|(_, v)| v)
    }

    /// Copy of the value stored for `q`.
    pub fn get_cloned<Q>(&self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.get(q).cloned()
    }

    pub fn get_key_value<Q>(&self, q: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.bucket_index(q);
        self.buckets[index]
            .find(q)
            .map(|e| (&e.key, &e.value))
    }

    pub fn get_mut<Q>(&mut self, q: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.bucket_index(q);
        self.buckets[index].find_mut(q).map(|e| &mut e.value)
    }

    /// Same lookup path as [`get`](Self::get).
    pub fn contains_key<Q>(&self, q: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(q).is_some()
    }

    /// Remove `q` and return its value.
    pub fn remove<Q>(&mut self, q: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.remove_entry(q).map(|(_, v)| v)
    }

    pub fn remove_entry<Q>(&mut self, q: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.bucket_index(q);
        let bucket = &mut self.buckets[index];
        let was_collision = matches!(bucket, Bucket::Collision(_));
        let removed = bucket.remove(q)?;
        if was_collision && !matches!(bucket, Bucket::Collision(_)) {
            trace!("bucket {}: collision collapsed, {} entries left", index, bucket.len());
        }
        self.len -= 1;
        Some(removed.into_pair())
    }

    /// Remove `q` if present. Calling it again for the same key is a no-op.
    pub fn erase<Q>(&mut self, q: &Q)
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let _ = self.remove_entry(q);
    }

    #[cfg(test)]
    pub(crate) fn buckets(&self) -> &[Bucket<K, V>] {
        &self.buckets
    }
}

impl<K, V> Default for BucketTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for BucketTable<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Extend<(K, V)> for BucketTable<K, V>
where
    K: Eq + Hash,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for BucketTable<K, V>
where
    K: Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<'a, K, V> IntoIterator for &'a BucketTable<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut BucketTable<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V> IntoIterator for BucketTable<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.buckets, self.len)
    }
}
