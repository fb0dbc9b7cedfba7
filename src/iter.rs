//! Iterators over a `BucketTable`.
//!
//! All iterators walk buckets in ascending index order and, inside a
//! collision sequence, in insertion order. Empty buckets are skipped.
//! Each iterator borrows (or owns) the table, so the table cannot be
//! mutated while a walk is in progress.

use crate::bucket::{Bucket, Entries, Entry};
use core::iter::FusedIterator;

/// Position of the next entry to yield: bucket index plus offset inside it.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Cursor {
    bucket: usize,
    slot: usize,
}

impl Cursor {
    /// Cursor at the first stored entry of `buckets`, or past the end.
    pub(crate) fn first<K, V>(buckets: &[Bucket<K, V>]) -> Self {
        let mut c = Cursor::default();
        c.settle(buckets);
        c
    }

    /// Step past the current entry.
    pub(crate) fn advance<K, V>(&mut self, buckets: &[Bucket<K, V>]) {
        self.slot += 1;
        self.settle(buckets);
    }

    /// Skip forward until the cursor names an occupied slot or runs off
    /// the end of the bucket array.
    fn settle<K, V>(&mut self, buckets: &[Bucket<K, V>]) {
        while let Some(b) = buckets.get(self.bucket) {
            if self.slot < b.len() {
                return;
            }
            self.bucket += 1;
            self.slot = 0;
        }
    }

    pub(crate) fn entry<'a, K, V>(&self, buckets: &'a [Bucket<K, V>]) -> Option<&'a Entry<K, V>> {
        buckets.get(self.bucket)?.entries().get(self.slot)
    }
}

/// Iterator over `(&K, &V)` pairs.
pub struct Iter<'a, K, V> {
    buckets: &'a [Bucket<K, V>],
    cursor: Cursor,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    pub(crate) fn new(buckets: &'a [Bucket<K, V>], len: usize) -> Self {
        Self {
            buckets,
            cursor: Cursor::first(buckets),
            remaining: len,
        }
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets,
            cursor: self.cursor,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.cursor.entry(self.buckets)?;
        self.cursor.advance(self.buckets);
        self.remaining -= 1;
        Some((&entry.key, &entry.value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Iterator over `(&K, &mut V)` pairs.
pub struct IterMut<'a, K, V> {
    buckets: core::slice::IterMut<'a, Bucket<K, V>>,
    current: core::slice::IterMut<'a, Entry<K, V>>,
    remaining: usize,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(crate) fn new(buckets: &'a mut [Bucket<K, V>], len: usize) -> Self {
        Self {
            buckets: buckets.iter_mut(),
            current: Default::default(),
            remaining: len,
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(e) = self.current.next() {
                self.remaining -= 1;
                return Some((&e.key, &mut e.value));
            }
            self.current = self.buckets.next()?.entries_mut().iter_mut();
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// Owning iterator over `(K, V)` pairs.
pub struct IntoIter<K, V> {
    buckets: std::vec::IntoIter<Bucket<K, V>>,
    current: Entries<K, V>,
    remaining: usize,
}

impl<K, V> IntoIter<K, V> {
    pub(crate) fn new(buckets: Box<[Bucket<K, V>]>, len: usize) -> Self {
        Self {
            buckets: buckets.into_vec().into_iter(),
            current: Entries::default(),
            remaining: len,
        }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(e) = self.current.next() {
                self.remaining -= 1;
                return Some(e.into_pair());
            }
            self.current = self.buckets.next()?.into_entries();
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}
