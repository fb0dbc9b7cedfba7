//! Error type for fallible construction and insertion.

use std::collections::TryReserveError;

/// Failures surfaced by the fallible entry points of
/// [`BucketTable`](crate::BucketTable).
///
/// Lookups never fail; a missing key is reported as `None`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum TableError {
    /// A table needs at least one bucket.
    #[error("bucket count must be at least 1")]
    ZeroBuckets,

    /// The allocator could not provide room for the bucket array or for a
    /// growing collision sequence.
    #[error("failed to allocate table storage")]
    Alloc(#[from] TryReserveError),
}
