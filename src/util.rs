//! Utility functions to support array-backed binary heaps
//!
//! A binary heap stored in a slice keeps its root at index `0`, and the children of the element at
//! index `i` at `2i + 1` and `2i + 2`. The helpers below do that index arithmetic, returning `None`
//! rather than an out-of-bounds index so that callers never need to index speculatively.

#![warn(missing_docs)]

//-----------------------------------------------------------------------------------------------//

/// Get the parent index of an element
///
/// The root has no parent, so `None` is returned for index `0`.
#[inline]
pub fn parent(index: usize) -> Option<usize> {
    if index == 0 {
        None
    } else {
        Some((index - 1) / 2)
    }
}

/// Get the left child index of an element, if it lies within the first `count` elements
#[inline]
pub fn left(index: usize, count: usize) -> Option<usize> {
    let lhs = index * 2 + 1;
    if lhs < count {
        Some(lhs)
    } else {
        None
    }
}

/// Get the right child index of an element, if it lies within the first `count` elements
#[inline]
pub fn right(index: usize, count: usize) -> Option<usize> {
    let rhs = index * 2 + 2;
    if rhs < count {
        Some(rhs)
    } else {
        None
    }
}

/// Check whether a slice is in heap order
///
/// `priority(a, b)` is true when `a` belongs above `b`. The slice is in heap order when no child
/// has priority over its parent, which allows equal elements to sit on either side of an edge.
pub fn is_heap_by<T, F>(slice: &[T], priority: F) -> bool
where
    F: Fn(&T, &T) -> bool,
{
    (1..slice.len()).all(|child| match parent(child) {
        Some(parent) => !priority(&slice[child], &slice[parent]),
        None => true,
    })
}

//-----------------------------------------------------------------------------------------------//

#[test]
// Index arithmetic at the edges of a seven element heap
fn test_util_0() {
    debug_assert_eq!(parent(0), None);
    debug_assert_eq!(parent(1), Some(0));
    debug_assert_eq!(parent(2), Some(0));
    debug_assert_eq!(parent(6), Some(2));

    debug_assert_eq!(left(0, 7), Some(1));
    debug_assert_eq!(right(0, 7), Some(2));
    debug_assert_eq!(left(2, 7), Some(5));
    debug_assert_eq!(right(2, 7), Some(6));
    debug_assert_eq!(left(3, 7), None);
    debug_assert_eq!(right(2, 6), None);
    debug_assert_eq!(left(0, 0), None);
}

#[test]
// Heap order detection
fn test_util_1() {
    let less = |a: &i32, b: &i32| a < b;

    debug_assert!(is_heap_by(&[] as &[i32], less));
    debug_assert!(is_heap_by(&[4], less));
    debug_assert!(is_heap_by(&[1, 2, 3, 4, 5], less));
    debug_assert!(is_heap_by(&[1, 1, 1, 1], less));
    debug_assert!(!is_heap_by(&[2, 1], less));
    debug_assert!(!is_heap_by(&[1, 2, 3, 4, 0], less));
}
