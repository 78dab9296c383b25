//! Comparison sorts over slices
//!
//! Each sort is provided in two forms: one that orders elements ascending using `Ord`, and a `_by`
//! form taking a priority function. `is_priority(a, b)` is true when `a` belongs before `b`, so
//! `|a, b| a > b` sorts descending. None of the sorts promise stability.
#![warn(missing_docs)]

extern crate alloc;

use alloc::vec::Vec;
use core::iter::Peekable;
use tracing::trace;

use crate::util;

//-----------------------------------------------------------------------------------------------//

/// The algorithm used by `sort` and `sorted`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Repeated passes swapping adjacent elements, O(n²)
    Bubble,
    /// Recursive merge of sorted halves, merging in place by rotation
    Merge,
    /// Heapify then repeatedly move the root to the end, O(n log n) in place
    #[default]
    Heap,
}

/// Sort a slice ascending using a given strategy
pub fn sort<T: Ord>(slice: &mut [T], strategy: Strategy) {
    sort_by(slice, strategy, |a: &T, b: &T| a < b);
}

/// Sort a slice by a priority function using a given strategy
pub fn sort_by<T, F>(slice: &mut [T], strategy: Strategy, is_priority: F)
where
    F: Fn(&T, &T) -> bool,
{
    trace!(?strategy, count = slice.len(), "sorting");

    match strategy {
        Strategy::Bubble => bubble_sort_by(slice, is_priority),
        Strategy::Merge => merge_sort_by(slice, is_priority),
        Strategy::Heap => heap_sort_by(slice, is_priority),
    }
}

/// Return an ascending copy of a slice, sorted using a given strategy
pub fn sorted<T: Ord + Clone>(slice: &[T], strategy: Strategy) -> Vec<T> {
    sorted_by(slice, strategy, |a: &T, b: &T| a < b)
}

/// Return a copy of a slice ordered by a priority function, sorted using a given strategy
pub fn sorted_by<T: Clone, F>(slice: &[T], strategy: Strategy, is_priority: F) -> Vec<T>
where
    F: Fn(&T, &T) -> bool,
{
    match strategy {
        Strategy::Merge => merge_sorted_by(slice, is_priority),
        _ => {
            let mut sorted = slice.to_vec();
            sort_by(&mut sorted, strategy, is_priority);
            sorted
        }
    }
}

//-----------------------------------------------------------------------------------------------//

/// Bubble sort a slice ascending
pub fn bubble_sort<T: Ord>(slice: &mut [T]) {
    bubble_sort_by(slice, |a: &T, b: &T| a < b);
}

/// Bubble sort a slice by a priority function
///
/// Passes stop as soon as one completes without a swap, so sorted input takes a single pass.
pub fn bubble_sort_by<T, F>(slice: &mut [T], is_priority: F)
where
    F: Fn(&T, &T) -> bool,
{
    // After each pass the last element of the range is in its final place
    let mut end = slice.len();
    while end > 1 {
        let mut swapped = false;
        for index in 1..end {
            if is_priority(&slice[index], &slice[index - 1]) {
                slice.swap(index - 1, index);
                swapped = true;
            }
        }
        if !swapped {
            break;
        }
        end -= 1;
    }
}

//-----------------------------------------------------------------------------------------------//

/// Merge sort a slice ascending, in place
pub fn merge_sort<T: Ord>(slice: &mut [T]) {
    merge_sort_by(slice, |a: &T, b: &T| a < b);
}

/// Merge sort a slice by a priority function, in place
///
/// Sorted halves are merged by rotating each element of the right half into position, so no
/// buffer is allocated at the cost of O(n²) moves in the worst case.
pub fn merge_sort_by<T, F>(slice: &mut [T], is_priority: F)
where
    F: Fn(&T, &T) -> bool,
{
    merge_sort_in_place(slice, &is_priority);
}

fn merge_sort_in_place<T, F>(slice: &mut [T], is_priority: &F)
where
    F: Fn(&T, &T) -> bool,
{
    if slice.len() < 2 {
        return;
    }

    let mid = slice.len() / 2;
    merge_sort_in_place(&mut slice[..mid], is_priority);
    merge_sort_in_place(&mut slice[mid..], is_priority);
    merge_in_place(slice, mid, is_priority);
}

// Merge the sorted runs `slice[..mid]` and `slice[mid..]`
fn merge_in_place<T, F>(slice: &mut [T], mut mid: usize, is_priority: &F)
where
    F: Fn(&T, &T) -> bool,
{
    // Already in order
    if !is_priority(&slice[mid], &slice[mid - 1]) {
        return;
    }

    let mut lo = 0;
    while lo < mid && mid < slice.len() {
        if is_priority(&slice[mid], &slice[lo]) {
            slice[lo..=mid].rotate_right(1);
            mid += 1;
        }
        lo += 1;
    }
}

/// Return an ascending copy of a slice, merge sorted out of place
pub fn merge_sorted<T: Ord + Clone>(slice: &[T]) -> Vec<T> {
    merge_sorted_by(slice, |a: &T, b: &T| a < b)
}

/// Return a copy of a slice ordered by a priority function, merge sorted out of place
///
/// The input is left untouched. Elements are cloned once and then moved between buffers.
pub fn merge_sorted_by<T: Clone, F>(slice: &[T], is_priority: F) -> Vec<T>
where
    F: Fn(&T, &T) -> bool,
{
    merge_sorted_out_of_place(slice, &is_priority)
}

fn merge_sorted_out_of_place<T: Clone, F>(slice: &[T], is_priority: &F) -> Vec<T>
where
    F: Fn(&T, &T) -> bool,
{
    if slice.len() < 2 {
        return slice.to_vec();
    }

    let (lhs, rhs) = slice.split_at(slice.len() / 2);
    let lhs = merge_sorted_out_of_place(lhs, is_priority);
    let rhs = merge_sorted_out_of_place(rhs, is_priority);

    let mut merged = Vec::with_capacity(lhs.len() + rhs.len());
    let mut lhs = lhs.into_iter().peekable();
    let mut rhs = rhs.into_iter().peekable();
    while let Some(next) = next_merged(&mut lhs, &mut rhs, is_priority) {
        merged.push(next);
    }
    merged
}

// Take whichever head of two sorted runs belongs first
fn next_merged<T, I, F>(lhs: &mut Peekable<I>, rhs: &mut Peekable<I>, is_priority: &F) -> Option<T>
where
    I: Iterator<Item = T>,
    F: Fn(&T, &T) -> bool,
{
    let take_rhs = match (lhs.peek(), rhs.peek()) {
        (Some(l), Some(r)) => is_priority(r, l),
        (Some(_), None) => false,
        (None, _) => true,
    };

    if take_rhs {
        rhs.next()
    } else {
        lhs.next()
    }
}

//-----------------------------------------------------------------------------------------------//

/// Heap sort a slice ascending, in place
pub fn heap_sort<T: Ord>(slice: &mut [T]) {
    heap_sort_by(slice, |a: &T, b: &T| a < b);
}

/// Heap sort a slice by a priority function, in place
///
/// The slice is first arranged into a heap whose root is the element that belongs last. The root
/// is then repeatedly swapped to the end of the heap, which shrinks by one each time.
pub fn heap_sort_by<T, F>(slice: &mut [T], is_priority: F)
where
    F: Fn(&T, &T) -> bool,
{
    let count = slice.len();
    if count < 2 {
        return;
    }

    // Heapify, from the last parent up to the root
    for index in (0..count / 2).rev() {
        sift_down(slice, index, count, &is_priority);
    }

    for end in (1..count).rev() {
        slice.swap(0, end);
        sift_down(slice, 0, end, &is_priority);
    }
}

// Move an element down the first `count` elements of a slice until neither child belongs after it
fn sift_down<T, F>(slice: &mut [T], mut index: usize, count: usize, is_priority: &F)
where
    F: Fn(&T, &T) -> bool,
{
    while let Some(lhs) = util::left(index, count) {
        let mut last = if is_priority(&slice[index], &slice[lhs]) {
            lhs
        } else {
            index
        };

        if let Some(rhs) = util::right(index, count) {
            if is_priority(&slice[last], &slice[rhs]) {
                last = rhs;
            }
        }

        if last == index {
            break;
        }
        slice.swap(index, last);
        index = last;
    }
}

/// Return an ascending copy of a slice, heap sorted
pub fn heap_sorted<T: Ord + Clone>(slice: &[T]) -> Vec<T> {
    heap_sorted_by(slice, |a: &T, b: &T| a < b)
}

/// Return a copy of a slice ordered by a priority function, heap sorted
pub fn heap_sorted_by<T: Clone, F>(slice: &[T], is_priority: F) -> Vec<T>
where
    F: Fn(&T, &T) -> bool,
{
    let mut sorted = slice.to_vec();
    heap_sort_by(&mut sorted, is_priority);
    sorted
}

//-----------------------------------------------------------------------------------------------//

/// Extension methods exposing the sorts on slices
///
/// ```
/// use copse::SliceSort;
///
/// let mut values = [3, 1, 2];
/// values.heap_sort();
/// assert_eq!(values, [1, 2, 3]);
/// assert_eq!(values.merge_sorted_by(|a, b| a > b), [3, 2, 1]);
/// ```
pub trait SliceSort<T> {
    /// Sort ascending using a given strategy
    fn sort_using(&mut self, strategy: Strategy)
    where
        T: Ord;

    /// Bubble sort ascending
    fn bubble_sort(&mut self)
    where
        T: Ord;

    /// Merge sort ascending, in place
    fn merge_sort(&mut self)
    where
        T: Ord;

    /// Merge sort by a priority function, in place
    fn merge_sort_by<F: Fn(&T, &T) -> bool>(&mut self, is_priority: F);

    /// Heap sort ascending, in place
    fn heap_sort(&mut self)
    where
        T: Ord;

    /// Heap sort by a priority function, in place
    fn heap_sort_by<F: Fn(&T, &T) -> bool>(&mut self, is_priority: F);

    /// Return an ascending merge sorted copy
    fn merge_sorted(&self) -> Vec<T>
    where
        T: Ord + Clone;

    /// Return a merge sorted copy, ordered by a priority function
    fn merge_sorted_by<F: Fn(&T, &T) -> bool>(&self, is_priority: F) -> Vec<T>
    where
        T: Clone;

    /// Return an ascending heap sorted copy
    fn heap_sorted(&self) -> Vec<T>
    where
        T: Ord + Clone;
}

impl<T> SliceSort<T> for [T] {
    fn sort_using(&mut self, strategy: Strategy)
    where
        T: Ord,
    {
        sort(self, strategy);
    }

    fn bubble_sort(&mut self)
    where
        T: Ord,
    {
        bubble_sort(self);
    }

    fn merge_sort(&mut self)
    where
        T: Ord,
    {
        merge_sort(self);
    }

    fn merge_sort_by<F: Fn(&T, &T) -> bool>(&mut self, is_priority: F) {
        merge_sort_by(self, is_priority);
    }

    fn heap_sort(&mut self)
    where
        T: Ord,
    {
        heap_sort(self);
    }

    fn heap_sort_by<F: Fn(&T, &T) -> bool>(&mut self, is_priority: F) {
        heap_sort_by(self, is_priority);
    }

    fn merge_sorted(&self) -> Vec<T>
    where
        T: Ord + Clone,
    {
        merge_sorted(self)
    }

    fn merge_sorted_by<F: Fn(&T, &T) -> bool>(&self, is_priority: F) -> Vec<T>
    where
        T: Clone,
    {
        merge_sorted_by(self, is_priority)
    }

    fn heap_sorted(&self) -> Vec<T>
    where
        T: Ord + Clone,
    {
        heap_sorted(self)
    }
}

//-----------------------------------------------------------------------------------------------//

#[cfg(test)]
const STRATEGIES: [Strategy; 3] = [Strategy::Bubble, Strategy::Merge, Strategy::Heap];

#[test]
// Each strategy sorts a shuffled array
fn test_sort_0() {
    use rand::prelude::*;

    let mut rng = SmallRng::seed_from_u64(1234567890);

    for strategy in STRATEGIES {
        let mut array = [0, 1, 2, 3, 4, 5, 6, 7, 8];
        array.shuffle(&mut rng);
        sort(&mut array, strategy);
        debug_assert_eq!(array, [0, 1, 2, 3, 4, 5, 6, 7, 8]);

        let mut array = [0, 1, 2, 3, 4, 5, 6, 7, 8];
        array.shuffle(&mut rng);
        debug_assert_eq!(sorted(&array, strategy), [0, 1, 2, 3, 4, 5, 6, 7, 8]);
    }
}

#[test]
// Empty, single and already sorted input are left alone
fn test_sort_1() {
    for strategy in STRATEGIES {
        let mut empty: [i32; 0] = [];
        sort(&mut empty, strategy);
        debug_assert!(empty.is_empty());

        let mut single = [42];
        sort(&mut single, strategy);
        debug_assert_eq!(single, [42]);

        let mut ordered = [-3, -1, 0, 0, 2, 9];
        sort(&mut ordered, strategy);
        debug_assert_eq!(ordered, [-3, -1, 0, 0, 2, 9]);
    }

    debug_assert!(merge_sorted::<u8>(&[]).is_empty());
    debug_assert_eq!(heap_sorted(&[7]), [7]);
}

#[test]
// A custom priority sorts descending, and duplicates survive
fn test_sort_2() {
    let descending = |a: &i32, b: &i32| a > b;

    for strategy in STRATEGIES {
        let mut array = [1, 3, 6, 2, -1, 7, -1, 4, 2];
        sort_by(&mut array, strategy, descending);
        debug_assert_eq!(array, [7, 6, 4, 3, 2, 2, 1, -1, -1]);
    }

    let input = [1, 3, 6, 2, -1, 7, -1, 4, 2];
    debug_assert_eq!(merge_sorted_by(&input, descending), [7, 6, 4, 3, 2, 2, 1, -1, -1]);
    debug_assert_eq!(heap_sorted_by(&input, descending), [7, 6, 4, 3, 2, 2, 1, -1, -1]);
    debug_assert_eq!(input, [1, 3, 6, 2, -1, 7, -1, 4, 2]);
}

#[test]
// Sorting records by a single field
fn test_sort_3() {
    use alloc::{string::String, vec};

    let by_len = |a: &String, b: &String| a.len() < b.len();
    let words = vec![
        String::from("heap"),
        String::from("a"),
        String::from("bubble"),
        String::from("to"),
    ];

    for strategy in STRATEGIES {
        let lengths: Vec<usize> = sorted_by(&words, strategy, by_len)
            .iter()
            .map(String::len)
            .collect();
        debug_assert_eq!(lengths, [1, 2, 4, 6]);
    }
}

#[test]
// The extension trait
fn test_sort_4() {
    let mut array = [5, 1, 4, 2, 3];
    array.merge_sort();
    debug_assert_eq!(array, [1, 2, 3, 4, 5]);

    array.heap_sort_by(|a, b| a > b);
    debug_assert_eq!(array, [5, 4, 3, 2, 1]);

    array.bubble_sort();
    debug_assert_eq!(array, [1, 2, 3, 4, 5]);

    array.merge_sort_by(|a, b| a > b);
    debug_assert_eq!(array, [5, 4, 3, 2, 1]);

    debug_assert_eq!(array.heap_sorted(), [1, 2, 3, 4, 5]);
    debug_assert_eq!(array.merge_sorted(), [1, 2, 3, 4, 5]);

    array.sort_using(Strategy::default());
    debug_assert_eq!(array, [1, 2, 3, 4, 5]);
}

#[test]
// A stress test comparing each strategy with the standard library sort
fn test_sort_5() {
    use rand::prelude::*;

    let mut rng = SmallRng::seed_from_u64(9876543210);

    for count in [2, 3, 10, 100, 1000] {
        let input: Vec<i64> = (0..count).map(|_| rng.random_range(-50..50)).collect();

        let mut expected = input.clone();
        expected.sort_unstable();

        for strategy in STRATEGIES {
            let mut array = input.clone();
            sort(&mut array, strategy);
            debug_assert_eq!(array, expected);
        }

        debug_assert_eq!(merge_sorted(&input), expected);
        debug_assert_eq!(heap_sorted(&input), expected);

        // Heapify alone leaves the root as the element that belongs last
        let mut heap = input.clone();
        let len = heap.len();
        for index in (0..len / 2).rev() {
            sift_down(&mut heap, index, len, &|a: &i64, b: &i64| a < b);
        }
        debug_assert!(util::is_heap_by(&heap, |a: &i64, b: &i64| a > b));
    }
}
