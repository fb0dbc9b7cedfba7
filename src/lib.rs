//! bucket-table: a fixed-capacity hash table whose buckets are tagged
//! `Empty`, `Single`, or `Collision`.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: the smallest hash table whose every state transition is an
//!   exhaustive `match`, with no nullable pointers or side flags.
//! - Layers:
//!   - `Bucket<K, V>`: tagged per-slot state plus its transitions
//!     (promotion on a second key, collapse on removal).
//!   - `BucketTable<K, V>`: owns a boxed slice of buckets allocated once
//!     at construction, maps keys to bucket indices, tracks `len`.
//!   - `Iter`/`IterMut`/`IntoIter`: walk buckets in index order; the
//!     shared iterator is an explicit `(bucket, slot)` cursor.
//!
//! Constraints
//! - Fixed bucket count (default 30, at least 1); no resizing or rehashing
//!   regardless of how full a bucket gets.
//! - Insert-if-absent: inserting an existing key is a no-op and the
//!   original value is kept.
//! - One built-in hash (`TableHasher`): integers up to 64 bits hash to
//!   themselves, bytes use FNV-1a. No hasher type parameter.
//!
//! Bucket invariants
//! - `Single` holds exactly one entry; a second distinct key promotes it
//!   to `Collision` with the existing entry first.
//! - `Collision` holds two or more entries in insertion order. A removal
//!   that leaves one entry collapses it to `Single`; none, to `Empty`.
//! - A key appears at most once per bucket, and only in bucket
//!   `hash(key) % bucket_count`.
//!
//! Ownership and threading
//! - Tree-shaped ownership: table owns buckets, buckets own entries.
//!   Dropping the table, clearing it, or removing an entry drops the
//!   stored values immediately.
//! - No interior mutability, no locks. Shared (`&self`) operations may run
//!   in parallel when `K` and `V` are `Sync`; any `&mut self` operation is
//!   exclusive. Iterators borrow the table, so the table cannot change
//!   during a walk.
//!
//! Failure model
//! - Lookups report absence with `None`; nothing else can fail except
//!   allocation. `insert`/`new` abort on allocation failure like `Vec`;
//!   `try_insert`/`with_buckets` return `TableError` and leave the table
//!   unchanged.
//!
//! Logging
//! - Uses the `log` facade: `debug!` on construction, `trace!` on bucket
//!   promotion, collapse, and skipped duplicate inserts. No logger is
//!   installed by this crate.

mod bucket;
mod error;
mod hasher;
mod iter;
mod table;
mod table_proptest;

// Public surface
pub use error::TableError;
pub use hasher::{DefaultBuildHasher, TableHasher};
pub use iter::{IntoIter, Iter, IterMut};
pub use table::{BucketTable, DEFAULT_BUCKETS};
