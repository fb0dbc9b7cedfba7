//! Bucket: the tagged per-slot state and its transitions.
//!
//! Transitions:
//! - insert: `Empty -> Single`, `Single -> Collision` (promotion, existing
//!   entry first), `Collision -> Collision` (append).
//! - remove: `Single -> Empty`, `Collision -> Collision | Single | Empty`
//!   where a sequence that drops below two entries collapses.
//!
//! Invariants held after every public method returns:
//! - a `Collision` sequence has at least two entries;
//! - a key appears at most once per bucket.

use core::borrow::Borrow;
use core::mem;
#[cfg(test)]
use std::collections::TryReserveError;

#[derive(Debug, Clone)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
}

impl<K, V> Entry<K, V> {
    fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    pub(crate) fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

#[derive(Debug, Clone)]
pub(crate) enum Bucket<K, V> {
    Empty,
    Single(Entry<K, V>),
    Collision(Vec<Entry<K, V>>),
}

impl<K, V> Default for Bucket<K, V> {
    fn default() -> Self {
        Bucket::Empty
    }
}

/// Where an insert landed, or why it did not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Placement {
    /// An equal key was already present; nothing changed.
    Occupied,
    /// `Empty -> Single`.
    Filled,
    /// `Single -> Collision`.
    Promoted,
    /// Appended to an existing collision sequence.
    Appended,
}

impl Placement {
    pub(crate) fn stored(self) -> bool {
        !matches!(self, Placement::Occupied)
    }
}

impl<K, V> Bucket<K, V> {
    /// Number of entries held.
    pub(crate) fn len(&self) -> usize {
        match self {
            Bucket::Empty => 0,
            Bucket::Single(_) => 1,
            Bucket::Collision(entries) => entries.len(),
        }
    }

    /// Entries in enumeration order.
    pub(crate) fn entries(&self) -> &[Entry<K, V>] {
        match self {
            Bucket::Empty => &[],
            Bucket::Single(entry) => core::slice::from_ref(entry),
            Bucket::Collision(entries) => entries,
        }
    }

    pub(crate) fn entries_mut(&mut self) -> &mut [Entry<K, V>] {
        match self {
            Bucket::Empty => &mut [],
            Bucket::Single(entry) => core::slice::from_mut(entry),
            Bucket::Collision(entries) => entries,
        }
    }

    pub(crate) fn into_entries(self) -> Entries<K, V> {
        match self {
            Bucket::Empty => Entries::One(None.into_iter()),
            Bucket::Single(entry) => Entries::One(Some(entry).into_iter()),
            Bucket::Collision(entries) => Entries::Many(entries.into_iter()),
        }
    }

    pub(crate) fn find<Q>(&self, q: &Q) -> Option<&Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        match self {
            Bucket::Empty => None,
            Bucket::Single(entry) => (entry.key.borrow() == q).then_some(entry),
            Bucket::Collision(entries) => entries.iter().find(|e| e.key.borrow() == q),
        }
    }

    pub(crate) fn find_mut<Q>(&mut self, q: &Q) -> Option<&mut Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        match self {
            Bucket::Empty => None,
            Bucket::Single(entry) => (entry.key.borrow() == q).then_some(entry),
            Bucket::Collision(entries) => entries.iter_mut().find(|e| e.key.borrow() == q),
        }
    }

    /// Insert-if-absent. `grow` reserves room in a collision sequence; if
    /// it fails the bucket is left as it was.
    pub(crate) fn insert_with<E, G>(&mut self, key: K, value: V, mut grow: G) -> Result<Placement, E>
    where
        K: Eq,
        G: FnMut(&mut Vec<Entry<K, V>>, usize) -> Result<(), E>,
    {
        if self.find(&key).is_some() {
            return Ok(Placement::Occupied);
        }
        let entry = Entry::new(key, value);
        let (next, placement) = match mem::take(self) {
            Bucket::Empty => (Bucket::Single(entry), Placement::Filled),
            Bucket::Single(existing) => {
                let mut entries = Vec::new();
                if let Err(e) = grow(&mut entries, 2) {
                    *self = Bucket::Single(existing);
                    return Err(e);
                }
                entries.push(existing);
                entries.push(entry);
                (Bucket::Collision(entries), Placement::Promoted)
            }
            Bucket::Collision(mut entries) => {
                if let Err(e) = grow(&mut entries, 1) {
                    *self = Bucket::Collision(entries);
                    return Err(e);
                }
                entries.push(entry);
                (Bucket::Collision(entries), Placement::Appended)
            }
        };
        *self = next;
        Ok(placement)
    }

    #[cfg(test)]
    pub(crate) fn try_insert(&mut self, key: K, value: V) -> Result<Placement, TryReserveError>
    where
        K: Eq,
    {
        self.insert_with(key, value, |entries, n| entries.try_reserve(n))
    }

    /// Removes the entry whose key equals `q`, collapsing a collision
    /// sequence that falls below two entries.
    pub(crate) fn remove<Q>(&mut self, q: &Q) -> Option<Entry<K, V>>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        match self {
            Bucket::Empty => None,
            Bucket::Single(entry) => {
                if entry.key.borrow() == q {
                    self.take_single()
                } else {
                    None
                }
            }
            Bucket::Collision(entries) => {
                let pos = entries.iter().position(|e| e.key.borrow() == q)?;
                let removed = entries.remove(pos);
                self.collapse();
                Some(removed)
            }
        }
    }

    fn take_single(&mut self) -> Option<Entry<K, V>> {
        match mem::take(self) {
            Bucket::Single(entry) => Some(entry),
            other => {
                *self = other;
                None
            }
        }
    }

    fn collapse(&mut self) {
        if let Bucket::Collision(entries) = self {
            if entries.len() < 2 {
                *self = entries.pop().map_or(Bucket::Empty, Bucket::Single);
            }
        }
    }
}

/// Owning iterator over one bucket's entries.
pub(crate) enum Entries<K, V> {
    One(core::option::IntoIter<Entry<K, V>>),
    Many(std::vec::IntoIter<Entry<K, V>>),
}

impl<K, V> Default for Entries<K, V> {
    fn default() -> Self {
        Entries::One(None.into_iter())
    }
}

impl<K, V> Iterator for Entries<K, V> {
    type Item = Entry<K, V>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Entries::One(it) => it.next(),
            Entries::Many(it) => it.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Entries::One(it) => it.size_hint(),
            Entries::Many(it) => it.size_hint(),
        }
    }
}
