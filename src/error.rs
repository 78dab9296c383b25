//! Errors raised when constructing collections

use thiserror::Error;

/// An error constructing a collection
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// A chained map was asked for zero buckets
    #[error("a chained map needs at least one bucket")]
    NoBuckets,
}
