//! ## Introduction
//!
//! This crate implements a small set of fundamental in-memory collections and algorithms: a
//! priority queue backed by a binary heap, an associative map backed by a hash table with chained
//! buckets, and a family of comparison sorts.
//!
//! ## Benefits
//!
//! - The crate is small and `#![no_std]`, needing only `alloc`.
//! - Ordering is supplied as a plain priority function, `priority(a, b)` returning true when `a`
//!   belongs above (or before) `b`. Elements that implement `Ord` get ready-made min and max
//!   orders, but any consistent order can be used, for example over floats or a single field.
//! - The map keeps a fixed number of buckets chosen at construction. It never rehashes, so
//!   iteration order only changes when keys are inserted or removed. The trade-off is that lookups
//!   degrade towards O(n) if the bucket count is too small for the number of keys.
//! - Containers own their storage outright. Nothing is shared, nothing is locked, and no
//!   container is safe to mutate from several threads without external synchronisation.
//!
//! ## Contents
//!
//! <center>
//!
//! | Type          | Stores        | Ordered / Located By | Iterator            |
//! |:--------------|:--------------|:---------------------|---------------------|
//! | `Heap`        | Element       | Priority function    | `core::slice::Iter` |
//! | `ChainedMap`  | Key/Value     | Hash                 | `MapIterator`       |
//! | `StringMap`   | String/Value  | Hash                 | `StringMapIterator` |
//!
//! </center>
//!
//! The `sort` module provides bubble sort, merge sort and heap sort, both in place and as sorted
//! copies, with the `SliceSort` extension trait exposing them as methods on slices.
//!
//! The crate exposes an additional module `util` with the index arithmetic for array-backed binary
//! heaps, and a check for heap order. It is provided to support development of additional heap
//! based types.

#![no_std]
#![warn(missing_docs)]

mod error;
mod heap;
mod map;
pub mod sort;
pub mod util;

pub use error::*;
pub use heap::*;
pub use map::*;
pub use sort::{SliceSort, Strategy};
