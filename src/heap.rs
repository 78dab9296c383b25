//! Implementation of a priority queue, backed by a binary heap
#![warn(missing_docs)]

extern crate alloc;

use alloc::vec::Vec;
use core::fmt::Debug;

use crate::util;

//-----------------------------------------------------------------------------------------------//

/// A priority queue implemented as a binary heap over a growable array.
///
/// The order of the heap is decided by a priority function fixed at construction: `priority(a, b)`
/// is true when `a` belongs above `b`. The element with top priority is always at the root, where
/// `peek` and `pop` find it. The default priority is "less than", which gives a min-heap.
///
/// No ordering is guaranteed between elements of equal priority.
#[derive(Clone)]
pub struct Heap<T, F = fn(&T, &T) -> bool>
where
    F: Fn(&T, &T) -> bool,
{
    storage: Vec<T>,
    priority: F,
}

fn less<T: Ord>(a: &T, b: &T) -> bool {
    a < b
}

fn greater<T: Ord>(a: &T, b: &T) -> bool {
    a > b
}

impl<T> Heap<T>
where
    T: Ord,
{
    /// Construct an empty min-heap
    pub fn new() -> Heap<T> {
        Heap {
            storage: Vec::new(),
            priority: less::<T> as fn(&T, &T) -> bool,
        }
    }

    /// Construct a heap where the __minimum__ value is kept at the top
    ///
    /// The initial values are pushed one at a time, taking O(n log n) time.
    pub fn min_heap<I: IntoIterator<Item = T>>(initial: I) -> Heap<T> {
        Heap::with_priority(initial, less::<T> as fn(&T, &T) -> bool)
    }

    /// Construct a heap where the __maximum__ value is kept at the top
    ///
    /// The initial values are pushed one at a time, taking O(n log n) time.
    pub fn max_heap<I: IntoIterator<Item = T>>(initial: I) -> Heap<T> {
        Heap::with_priority(initial, greater::<T> as fn(&T, &T) -> bool)
    }
}

impl<T, F> Heap<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    /// Construct a heap ordered by a custom priority function
    ///
    /// `priority(a, b)` should return true when `a` belongs above `b`, and must describe a
    /// consistent total order for the heap to be meaningful.
    pub fn with_priority<I: IntoIterator<Item = T>>(initial: I, priority: F) -> Heap<T, F> {
        let mut heap = Heap {
            storage: Vec::new(),
            priority,
        };
        heap.push_all(initial);
        heap
    }

    /// Construct an empty heap, pre-allocating a given capacity
    pub fn with_capacity(capacity: usize, priority: F) -> Heap<T, F> {
        Heap {
            storage: Vec::with_capacity(capacity),
            priority,
        }
    }

    /// Get the number of elements in the `Heap`
    #[inline]
    pub fn count(&self) -> usize {
        self.storage.len()
    }

    /// Check if there are any elements in the `Heap`
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Get the element at the top of the heap without removing it
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.storage.first()
    }

    /// Remove all elements from the `Heap`
    pub fn clear(&mut self) {
        self.storage.truncate(0);
    }

    /// Push an element onto the heap in O(log n) time
    pub fn push(&mut self, element: T) {
        self.storage.push(element);
        self.sift_up(self.storage.len() - 1);
    }

    /// Push every element of an iterator onto the heap
    pub fn push_all<I: IntoIterator<Item = T>>(&mut self, elements: I) {
        let elements = elements.into_iter();
        self.storage.reserve(elements.size_hint().0);
        for element in elements {
            self.push(element);
        }
    }

    /// Pop the element at the top of the heap in O(log n) time
    ///
    /// If the heap is empty then `None` is returned.
    pub fn pop(&mut self) -> Option<T> {
        if self.storage.len() < 2 {
            return self.storage.pop();
        }

        let last = self.storage.len() - 1;
        self.storage.swap(0, last);
        let top = self.storage.pop();
        self.sift_down(0);
        top
    }

    /// Iterate over the elements in storage order
    ///
    /// Only the first element is guaranteed to be in its final position; the rest are in heap
    /// order, not priority order.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.storage.iter()
    }

    /// Consume the heap, returning its storage in heap order
    pub fn into_vec(self) -> Vec<T> {
        self.storage
    }

    /// Consume the heap, returning its elements in the order they would be popped
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.storage.len());
        while let Some(element) = self.pop() {
            sorted.push(element);
        }
        sorted
    }

    // Move an element up while it has priority over its parent
    fn sift_up(&mut self, mut index: usize) {
        while let Some(parent) = util::parent(index) {
            if !(self.priority)(&self.storage[index], &self.storage[parent]) {
                break;
            }
            self.storage.swap(index, parent);
            index = parent;
        }
    }

    // Move an element down while one of its children has priority over it, swapping with the
    // child of higher priority
    fn sift_down(&mut self, mut index: usize) {
        let count = self.storage.len();
        while let Some(lhs) = util::left(index, count) {
            let mut top = if (self.priority)(&self.storage[index], &self.storage[lhs]) {
                index
            } else {
                lhs
            };

            if let Some(rhs) = util::right(index, count) {
                if !(self.priority)(&self.storage[top], &self.storage[rhs]) {
                    top = rhs;
                }
            }

            if top == index {
                break;
            }
            self.storage.swap(index, top);
            index = top;
        }
    }

    // Debug tests
    #[cfg(test)]
    fn check(&self) {
        debug_assert!(util::is_heap_by(&self.storage, &self.priority));
    }
}

impl<T> Default for Heap<T>
where
    T: Ord,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, F> Debug for Heap<T, F>
where
    T: Debug,
    F: Fn(&T, &T) -> bool,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.storage.iter()).finish()
    }
}

impl<T, F> Extend<T> for Heap<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.push_all(iter);
    }
}

impl<T> FromIterator<T> for Heap<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Heap::min_heap(iter)
    }
}

impl<'a, T, F> IntoIterator for &'a Heap<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

//-----------------------------------------------------------------------------------------------//

#[test]
// Popping a min-heap yields ascending order
fn test_heap_0() {
    use alloc::vec;

    let heap = Heap::min_heap([1, 3, 6, 2, -1, 7, -1, 4, 2]);
    heap.check();

    debug_assert_eq!(heap.into_sorted_vec(), vec![-1, -1, 1, 2, 2, 3, 4, 6, 7]);
}

#[test]
// Popping a max-heap yields descending order
fn test_heap_1() {
    let mut heap = Heap::max_heap([1, 3, 6, 2, -1, 7, -1, 4, 2]);
    heap.check();

    let mut ordered = Vec::new();
    while let Some(next) = heap.pop() {
        heap.check();
        ordered.push(next);
    }

    debug_assert_eq!(ordered, [7, 6, 4, 3, 2, 2, 1, -1, -1]);
}

#[test]
// Push and peek agree
fn test_heap_2() {
    let mut heap = Heap::new();
    heap.push_all([1, 2, 3]);
    heap.push(0);

    debug_assert_eq!(heap.peek(), Some(&0));
    debug_assert_eq!(heap.count(), 4);
    debug_assert_eq!(heap.pop(), Some(0));
    debug_assert_eq!(heap.peek(), Some(&1));
    debug_assert_eq!(heap.count(), 3);
}

#[test]
// An empty heap returns nothing
fn test_heap_3() {
    let mut heap: Heap<i32> = Heap::default();

    debug_assert!(heap.is_empty());
    debug_assert_eq!(heap.peek(), None);
    debug_assert_eq!(heap.pop(), None);

    heap.push(5);
    debug_assert_eq!(heap.pop(), Some(5));
    debug_assert_eq!(heap.pop(), None);
    debug_assert!(heap.is_empty());
}

#[test]
// A custom priority over tuples and floats
fn test_heap_4() {
    let mut heap = Heap::with_priority(
        [(2, 'b'), (1, 'z'), (3, 'a'), (1, 'a')],
        |a: &(i32, char), b: &(i32, char)| a > b,
    );
    heap.check();

    debug_assert_eq!(heap.pop(), Some((3, 'a')));
    debug_assert_eq!(heap.pop(), Some((2, 'b')));
    debug_assert_eq!(heap.pop(), Some((1, 'z')));
    debug_assert_eq!(heap.pop(), Some((1, 'a')));
    debug_assert_eq!(heap.pop(), None);

    let mut heap = Heap::with_capacity(4, |a: &f64, b: &f64| a < b);
    heap.extend([2.5, -0.5, 9.0, 0.0]);
    debug_assert_eq!(heap.pop(), Some(-0.5));
    debug_assert_eq!(heap.pop(), Some(0.0));
    debug_assert_eq!(heap.count(), 2);
}

#[test]
// Collecting into a heap, iterating and clearing
fn test_heap_5() {
    let mut heap: Heap<u8> = [9, 4, 7, 1].into_iter().collect();
    heap.check();

    debug_assert_eq!(heap.peek(), Some(&1));
    debug_assert_eq!(heap.iter().count(), 4);
    debug_assert_eq!((&heap).into_iter().map(|&x| x as u32).sum::<u32>(), 21);

    let storage = heap.clone().into_vec();
    debug_assert_eq!(storage.len(), 4);
    debug_assert!(util::is_heap_by(&storage, |a: &u8, b: &u8| a < b));

    heap.clear();
    debug_assert!(heap.is_empty());
    debug_assert_eq!(heap.peek(), None);
}

#[test]
// A stress test with interleaved pushes and pops, checking heap order after every step
fn test_heap_6() {
    use alloc::collections::BinaryHeap;
    use core::cmp::Reverse;
    use rand::prelude::*;

    const COUNT: usize = 10000;

    let mut rng = SmallRng::seed_from_u64(1234567890);

    let mut heap = Heap::new();
    let mut reference = BinaryHeap::new();

    for step in 0..COUNT {
        // A narrow range forces many tied priorities
        let value = rng.random_range(0..50u32);
        heap.push(value);
        reference.push(Reverse(value));
        heap.check();

        if step % 3 == 0 {
            debug_assert_eq!(heap.pop(), reference.pop().map(|Reverse(x)| x));
            heap.check();
        }
    }

    debug_assert_eq!(heap.count(), reference.len());

    let expected: Vec<u32> = reference
        .into_sorted_vec()
        .into_iter()
        .rev()
        .map(|Reverse(x)| x)
        .collect();
    debug_assert_eq!(heap.into_sorted_vec(), expected);
}
