//! Implementation of maps, backed by a hash table with chained buckets
#![warn(missing_docs)]

extern crate alloc;

use alloc::vec::{self, Vec};
use compact_str::CompactString;
use core::{
    borrow::Borrow,
    fmt::Debug,
    hash::{BuildHasher, Hash, Hasher},
    iter::FusedIterator,
    mem,
};
use foldhash::fast::FixedState;
use hashbrown::DefaultHashBuilder;
use tracing::{debug, trace};

use crate::error::Error;

/// The number of buckets used by `ChainedMap::new`
pub const DEFAULT_BUCKET_COUNT: usize = 100;

// A bucket is either absent or holds a non-empty chain of key/value pairs
type Chain<K, V> = Vec<(K, V)>;

//-----------------------------------------------------------------------------------------------//

/// A map between unique keys and values, implemented as a hash table with chained buckets.
///
/// The number of buckets is fixed at construction and never grows. Each key is hashed to a bucket
/// and stored in that bucket's chain, which is scanned linearly on lookup. Lookups therefore take
/// amortised constant time for a well distributed hash and adequate bucket count, degrading
/// towards O(n) as the chains lengthen.
///
/// The map is not synchronised. Callers sharing a map between threads must provide their own
/// locking.
#[derive(Clone)]
pub struct ChainedMap<K, V, S = DefaultHashBuilder> {
    buckets: Vec<Option<Chain<K, V>>>,
    hasher: S,
}

impl<K, V> ChainedMap<K, V> {
    /// Constructor, using `DEFAULT_BUCKET_COUNT` buckets
    pub fn new() -> ChainedMap<K, V> {
        Self::with_buckets(DEFAULT_BUCKET_COUNT)
    }

    /// Constructor
    ///
    /// # Panics
    ///
    /// Panics if `bucket_count` is zero. Use `try_with_buckets` to handle this case as an error.
    pub fn with_buckets(bucket_count: usize) -> ChainedMap<K, V> {
        Self::with_buckets_and_hasher(bucket_count, DefaultHashBuilder::default())
    }

    /// Constructor, failing if `bucket_count` is zero
    pub fn try_with_buckets(bucket_count: usize) -> Result<ChainedMap<K, V>, Error> {
        Self::try_with_buckets_and_hasher(bucket_count, DefaultHashBuilder::default())
    }
}

impl<K, V, S> ChainedMap<K, V, S> {
    /// Constructor, using a custom hasher
    ///
    /// # Panics
    ///
    /// Panics if `bucket_count` is zero.
    pub fn with_buckets_and_hasher(bucket_count: usize, hasher: S) -> ChainedMap<K, V, S> {
        match Self::try_with_buckets_and_hasher(bucket_count, hasher) {
            Ok(map) => map,
            Err(error) => panic!("{error}"),
        }
    }

    /// Constructor, using a custom hasher and failing if `bucket_count` is zero
    pub fn try_with_buckets_and_hasher(
        bucket_count: usize,
        hasher: S,
    ) -> Result<ChainedMap<K, V, S>, Error> {
        if bucket_count == 0 {
            return Err(Error::NoBuckets);
        }

        debug!(bucket_count, "allocating chained map");

        let mut buckets = Vec::with_capacity(bucket_count);
        buckets.resize_with(bucket_count, || None);
        Ok(ChainedMap { buckets, hasher })
    }

    /// Get the fixed number of buckets in the `ChainedMap`
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Get the number of key/value pairs in the `ChainedMap`
    ///
    /// The count is not cached: this sums the length of every chain, taking time proportional to
    /// the number of buckets.
    pub fn count(&self) -> usize {
        self.buckets.iter().flatten().map(Vec::len).sum()
    }

    /// Check if there are any key/value pairs in the `ChainedMap`
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Option::is_none)
    }

    /// Remove all key/value pairs from the `ChainedMap`, keeping the bucket count
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            *bucket = None;
        }
    }

    /// Get the hasher used to place keys in buckets
    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Iterate over the key/value pairs in the `ChainedMap`
    ///
    /// Pairs are produced bucket by bucket, and in insertion order within each bucket. This is not
    /// the global insertion order.
    pub fn iter(&self) -> MapIterator<'_, K, V> {
        MapIterator {
            buckets: &self.buckets,
            bucket: 0,
            position: 0,
        }
    }

    /// Iterate over the keys in the `ChainedMap`
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Iterate over the values in the `ChainedMap`
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, value)| value)
    }

    // Debug tests
    #[cfg(test)]
    fn check(&self)
    where
        K: Eq,
    {
        for chain in self.buckets.iter().flatten() {
            debug_assert!(!chain.is_empty());
            for (i, (key, _)) in chain.iter().enumerate() {
                debug_assert!(chain[i + 1..].iter().all(|(other, _)| other != key));
            }
        }
    }
}

impl<K, V, S> ChainedMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Get a value by key.
    ///
    /// If the key is not in the map then `None` is returned.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let chain = self.buckets[self.bucket_index(key)].as_ref()?;
        chain
            .iter()
            .find(|(k, _)| k.borrow() == key)
            .map(|(_, value)| value)
    }

    /// Get a mutable reference by key.
    ///
    /// If the key is not in the map then `None` is returned - this function will not create a key
    /// if it does not exist. In this case use `insert` instead.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        let chain = self.buckets[index].as_mut()?;
        chain
            .iter_mut()
            .find(|(k, _)| k.borrow() == key)
            .map(|(_, value)| value)
    }

    /// Check whether the map holds a value for a key
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Insert a value by key.
    ///
    /// If the key already has a value, it is replaced in place and the previous value returned.
    /// Otherwise the pair is appended to the key's chain and `None` is returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let index = self.bucket_index(&key);
        let chain = self.buckets[index].get_or_insert_with(Vec::new);

        if let Some(position) = chain.iter().position(|(k, _)| *k == key) {
            return Some(mem::replace(&mut chain[position].1, value));
        }

        chain.push((key, value));
        None
    }

    /// Insert or remove a value by key.
    ///
    /// `Some(value)` behaves like `insert` and `None` behaves like `remove`. Either way the value
    /// previously held for the key is returned.
    pub fn set(&mut self, key: K, value: Option<V>) -> Option<V> {
        match value {
            Some(value) => self.insert(key, value),
            None => self.remove(&key),
        }
    }

    /// Remove a value by key.
    ///
    /// If the key does not exist then `None` is returned. Removing the last pair in a chain
    /// returns the bucket to being absent.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let index = self.bucket_index(key);
        let chain = self.buckets[index].as_mut()?;
        let position = chain.iter().position(|(k, _)| k.borrow() == key)?;

        if chain.len() > 1 {
            return Some(chain.remove(position).1);
        }

        trace!(bucket = index, "collapsing emptied chain");
        let (_, value) = self.buckets[index].take()?.pop()?;
        Some(value)
    }

    // Map a key to its bucket
    fn bucket_index<Q>(&self, key: &Q) -> usize
    where
        Q: Hash + ?Sized,
    {
        (self.hasher.hash_one(key) % self.buckets.len() as u64) as usize
    }
}

impl<K, V> Default for ChainedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> Debug for ChainedMap<K, V, S>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> PartialEq for ChainedMap<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.count() == other.count()
            && self
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K, V, S> Eq for ChainedMap<K, V, S>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> Hash for ChainedMap<K, V, S>
where
    K: Hash + Eq,
    V: Hash,
    S: BuildHasher,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Pairs are digested with a fixed seed and summed, so equal maps hash equally whatever
        // their bucket count or insertion order
        let digest = FixedState::default();
        let combined = self
            .iter()
            .fold(0u64, |sum, pair| sum.wrapping_add(digest.hash_one(pair)));

        state.write_usize(self.count());
        state.write_u64(combined);
    }
}

impl<'a, K, V, S> IntoIterator for &'a ChainedMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = MapIterator<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> IntoIterator for ChainedMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = MapIntoIterator<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        MapIntoIterator {
            buckets: self.buckets.into_iter(),
            chain: None,
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ChainedMap<K, V>
where
    K: Hash + Eq,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K, V, S> Extend<(K, V)> for ChainedMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

//-----------------------------------------------------------------------------------------------//

/// Iterator over a `ChainedMap`
///
/// The iterator is a cursor over (bucket, position in chain). Mutating the map while an iterator
/// is outstanding is prevented by the borrow checker.
pub struct MapIterator<'a, K, V> {
    buckets: &'a [Option<Chain<K, V>>],
    bucket: usize,
    position: usize,
}

impl<'a, K, V> Iterator for MapIterator<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        let buckets = self.buckets;

        while let Some(bucket) = buckets.get(self.bucket) {
            let position = self.position;
            if let Some((key, value)) = bucket.as_ref().and_then(|chain| chain.get(position)) {
                self.position += 1;
                return Some((key, value));
            }

            // Skip to the next bucket, whether this one was absent or exhausted
            self.bucket += 1;
            self.position = 0;
        }

        None
    }
}

impl<K, V> FusedIterator for MapIterator<'_, K, V> {}

/// Owning iterator over a `ChainedMap`, in the same order as `MapIterator`
pub struct MapIntoIterator<K, V> {
    buckets: vec::IntoIter<Option<Chain<K, V>>>,
    chain: Option<vec::IntoIter<(K, V)>>,
}

impl<K, V> Iterator for MapIntoIterator<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        loop {
            if let Some(key_value) = self.chain.as_mut().and_then(Iterator::next) {
                return Some(key_value);
            }
            self.chain = Some(self.buckets.next()?.unwrap_or_default().into_iter());
        }
    }
}

impl<K, V> FusedIterator for MapIntoIterator<K, V> {}

//-----------------------------------------------------------------------------------------------//

/// A map between strings and values, implemented as a hash table with chained buckets.
///
/// This is a specialised version of `ChainedMap` that stores keys as a `CompactString`, so short
/// keys are kept inline without a separate allocation.
#[derive(Clone)]
pub struct StringMap<V, S = DefaultHashBuilder>
where
    S: BuildHasher,
{
    map: ChainedMap<CompactString, V, S>,
}

impl<V> StringMap<V> {
    /// Constructor, using `DEFAULT_BUCKET_COUNT` buckets
    pub fn new() -> StringMap<V> {
        StringMap {
            map: ChainedMap::new(),
        }
    }

    /// Constructor
    ///
    /// # Panics
    ///
    /// Panics if `bucket_count` is zero.
    pub fn with_buckets(bucket_count: usize) -> StringMap<V> {
        StringMap {
            map: ChainedMap::with_buckets(bucket_count),
        }
    }

    /// Constructor, failing if `bucket_count` is zero
    pub fn try_with_buckets(bucket_count: usize) -> Result<StringMap<V>, Error> {
        Ok(StringMap {
            map: ChainedMap::try_with_buckets(bucket_count)?,
        })
    }
}

impl<V, S> StringMap<V, S>
where
    S: BuildHasher,
{
    /// Constructor, using a custom hasher
    ///
    /// # Panics
    ///
    /// Panics if `bucket_count` is zero.
    pub fn with_buckets_and_hasher(bucket_count: usize, hasher: S) -> StringMap<V, S> {
        StringMap {
            map: ChainedMap::with_buckets_and_hasher(bucket_count, hasher),
        }
    }

    /// Constructor, using a custom hasher and failing if `bucket_count` is zero
    pub fn try_with_buckets_and_hasher(
        bucket_count: usize,
        hasher: S,
    ) -> Result<StringMap<V, S>, Error> {
        Ok(StringMap {
            map: ChainedMap::try_with_buckets_and_hasher(bucket_count, hasher)?,
        })
    }

    /// Get the hasher used to place strings in buckets
    pub fn hasher(&self) -> &S {
        self.map.hasher()
    }

    /// Get the fixed number of buckets in the `StringMap`
    #[inline]
    pub fn bucket_count(&self) -> usize {
        self.map.bucket_count()
    }

    /// Get the number of string/value pairs in the `StringMap`
    pub fn count(&self) -> usize {
        self.map.count()
    }

    /// Check if there are any string/value pairs in the `StringMap`
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Remove all string/value pairs from the `StringMap`
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Get a value by string.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.map.get(key)
    }

    /// Get a mutable reference by string.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.map.get_mut(key)
    }

    /// Check whether the map holds a value for a string
    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Insert a value by string, returning the value it replaced.
    ///
    /// The string is only copied into the map when it is not already present.
    pub fn insert(&mut self, key: &str, value: V) -> Option<V> {
        if let Some(existing) = self.map.get_mut(key) {
            return Some(mem::replace(existing, value));
        }
        self.map.insert(CompactString::new(key), value)
    }

    /// Insert or remove a value by string.
    pub fn set(&mut self, key: &str, value: Option<V>) -> Option<V> {
        match value {
            Some(value) => self.insert(key, value),
            None => self.remove(key),
        }
    }

    /// Remove a value by string.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.map.remove(key)
    }

    /// Iterate over the string/value pairs in the `StringMap`
    pub fn iter(&self) -> StringMapIterator<'_, V> {
        StringMapIterator {
            inner: self.map.iter(),
        }
    }

    /// Iterate over the strings in the `StringMap`
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Iterate over the values in the `StringMap`
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.map.values()
    }
}

impl<V> Default for StringMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, S> Debug for StringMap<V, S>
where
    V: Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V, S> PartialEq for StringMap<V, S>
where
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<V, S> Eq for StringMap<V, S>
where
    V: Eq,
    S: BuildHasher,
{
}

impl<V, S> Hash for StringMap<V, S>
where
    V: Hash,
    S: BuildHasher,
{
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.map.hash(state);
    }
}

impl<'a, V, S> IntoIterator for &'a StringMap<V, S>
where
    S: BuildHasher,
{
    type Item = (&'a str, &'a V);
    type IntoIter = StringMapIterator<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V, S> IntoIterator for StringMap<V, S>
where
    S: BuildHasher,
{
    type Item = (CompactString, V);
    type IntoIter = StringMapIntoIterator<V>;

    fn into_iter(self) -> Self::IntoIter {
        StringMapIntoIterator {
            inner: self.map.into_iter(),
        }
    }
}

impl<'a, V> FromIterator<(&'a str, V)> for StringMap<V> {
    fn from_iter<I: IntoIterator<Item = (&'a str, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<'a, V, S> Extend<(&'a str, V)> for StringMap<V, S>
where
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (&'a str, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

//-----------------------------------------------------------------------------------------------//

/// Iterator over a `StringMap`
pub struct StringMapIterator<'a, V> {
    inner: MapIterator<'a, CompactString, V>,
}

impl<'a, V> Iterator for StringMapIterator<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<(&'a str, &'a V)> {
        self.inner.next().map(|(key, value)| (key.as_str(), value))
    }
}

impl<V> FusedIterator for StringMapIterator<'_, V> {}

/// Owning iterator over a `StringMap`, in the same order as `StringMapIterator`
pub struct StringMapIntoIterator<V> {
    inner: MapIntoIterator<CompactString, V>,
}

impl<V> Iterator for StringMapIntoIterator<V> {
    type Item = (CompactString, V);

    fn next(&mut self) -> Option<(CompactString, V)> {
        self.inner.next()
    }
}

impl<V> FusedIterator for StringMapIntoIterator<V> {}

//-----------------------------------------------------------------------------------------------//

#[test]
// A very simple test of inserting into a map
fn test_map_0() {
    use alloc::string::{String, ToString};

    let mut map: ChainedMap<String, i32> = ChainedMap::new();
    debug_assert_eq!(map.count(), 0);
    debug_assert!(map.is_empty());

    debug_assert_eq!(map.insert("one".to_string(), 1), None);
    debug_assert_eq!(map.get("one"), Some(&1));
    debug_assert_eq!(map.get("two"), None);
    debug_assert_eq!(map.count(), 1);
    debug_assert!(!map.is_empty());

    debug_assert_eq!(map.insert("one".to_string(), 2), Some(1));
    debug_assert_eq!(map.count(), 1);
    debug_assert_eq!(map.get("one"), Some(&2));
    map.check();
}

#[test]
// Setting and removing values
fn test_map_1() {
    use alloc::string::{String, ToString};

    let mut map: ChainedMap<String, i32> = ChainedMap::new();

    debug_assert_eq!(map.set("one".to_string(), Some(1)), None);
    debug_assert_eq!(map.get("one"), Some(&1));
    debug_assert_eq!(map.set("one".to_string(), None), Some(1));
    debug_assert_eq!(map.count(), 0);
    debug_assert!(map.is_empty());

    map.insert("one".to_string(), 1);
    debug_assert_eq!(map.remove("one"), Some(1));
    debug_assert_eq!(map.remove("one"), None);
    debug_assert_eq!(map.count(), 0);
    debug_assert!(map.is_empty());

    if let Some(value) = map.get_mut("one") {
        *value = 3;
    }
    debug_assert!(!map.contains_key("one"));

    map.insert("one".to_string(), 1);
    if let Some(value) = map.get_mut("one") {
        *value = 3;
    }
    debug_assert_eq!(map.get("one"), Some(&3));
}

#[test]
// Keys sharing a single bucket
fn test_map_2() {
    let mut map = ChainedMap::with_buckets(1);
    map.insert("one", 1);
    map.insert("two", 2);
    map.insert("three", 3);
    map.check();

    debug_assert_eq!(map.get(&"one"), Some(&1));
    debug_assert_eq!(map.remove(&"one"), Some(1));
    debug_assert_eq!(map.count(), 2);
    debug_assert_eq!(map.get(&"two"), Some(&2));

    // The remaining chain keeps its order
    let keys: Vec<&str> = map.keys().copied().collect();
    debug_assert_eq!(keys, ["two", "three"]);

    debug_assert_eq!(map.remove(&"three"), Some(3));
    debug_assert_eq!(map.remove(&"two"), Some(2));
    debug_assert!(map.is_empty());
    debug_assert_eq!(map.iter().next(), None);
    map.check();
}

#[test]
// Zero buckets is refused
fn test_map_3() {
    debug_assert_eq!(
        ChainedMap::<u32, u32>::try_with_buckets(0).err(),
        Some(Error::NoBuckets)
    );
    debug_assert_eq!(
        ChainedMap::<u32, u32>::try_with_buckets(7).map(|map| map.bucket_count()),
        Ok(7)
    );
    debug_assert!(StringMap::<u32>::try_with_buckets(0).is_err());
}

#[test]
#[should_panic(expected = "at least one bucket")]
// Zero buckets is a programmer error
fn test_map_3a() {
    let _ = ChainedMap::<u32, u32>::with_buckets(0);
}

#[test]
// Iteration visits every pair once, across sparse buckets
fn test_map_4() {
    use alloc::collections::BTreeSet;

    for bucket_count in [1, 2, 7, 100, 1000] {
        let mut map = ChainedMap::with_buckets(bucket_count);
        for key in 0..50u32 {
            map.insert(key, key * 10);
        }

        let mut seen = BTreeSet::new();
        for (key, value) in &map {
            debug_assert_eq!(*value, key * 10);
            debug_assert!(seen.insert(*key));
        }
        debug_assert_eq!(seen.len(), 50);
        debug_assert_eq!(map.values().count(), 50);

        // The owning iterator walks in the same order
        let borrowed: Vec<(u32, u32)> = map.iter().map(|(k, v)| (*k, *v)).collect();
        let owned: Vec<(u32, u32)> = map.into_iter().collect();
        debug_assert_eq!(borrowed, owned);
    }
}

#[test]
// Equality ignores bucket layout
fn test_map_5() {
    let mut a = ChainedMap::with_buckets(3);
    let mut b = ChainedMap::with_buckets(11);

    for key in 0..20 {
        a.insert(key, key);
    }
    for key in (0..20).rev() {
        b.insert(key, key);
    }
    debug_assert_eq!(a, b);

    // Equal maps hash equally, whatever their bucket layout
    let digest = FixedState::default();
    debug_assert_eq!(digest.hash_one(&a), digest.hash_one(&b));

    b.insert(5, 6);
    debug_assert_ne!(a, b);
    debug_assert_ne!(digest.hash_one(&a), digest.hash_one(&b));

    b.insert(5, 5);
    b.insert(20, 20);
    debug_assert_ne!(a, b);

    let c: ChainedMap<i32, i32> = (0..20).map(|key| (key, key)).collect();
    debug_assert_eq!(a, c);

    a.clear();
    debug_assert!(a.is_empty());
    debug_assert_eq!(a.bucket_count(), 3);
}

#[test]
// A string map
fn test_map_6() {
    use alloc::{format, string::String};

    let mut map = StringMap::with_buckets(1);
    debug_assert_eq!(map.insert("one", 1), None);
    debug_assert_eq!(map.insert("two", 2), None);
    debug_assert_eq!(map.insert("two", 22), Some(2));

    debug_assert_eq!(map.get("one"), Some(&1));
    debug_assert_eq!(map.get("two"), Some(&22));
    debug_assert_eq!(map.count(), 2);

    debug_assert_eq!(map.set("one", None), Some(1));
    debug_assert_eq!(map.count(), 1);
    debug_assert_eq!(map.get("two"), Some(&22));
    debug_assert!(!map.contains_key("one"));

    let pairs: Vec<(&str, &i32)> = map.iter().collect();
    debug_assert_eq!(pairs, [("two", &22)]);

    let map: StringMap<usize> = ["alpha", "beta", "gamma"]
        .into_iter()
        .map(|key| (key, key.len()))
        .collect();
    debug_assert_eq!(map.get("gamma"), Some(&5));
    debug_assert_eq!(format!("{:?}", StringMap::<u8>::new()), String::from("{}"));
}

#[test]
// A string map's keys, values, extension and owning iteration
fn test_map_6a() {
    use alloc::{collections::BTreeSet, string::String};

    let mut map = StringMap::with_buckets_and_hasher(3, DefaultHashBuilder::default());
    map.extend([("red", 1), ("green", 2)]);
    map.extend([("blue", 3), ("red", 4)]);
    debug_assert_eq!(map.count(), 3);
    debug_assert_eq!(map.get("red"), Some(&4));

    let keys: BTreeSet<&str> = map.keys().collect();
    debug_assert_eq!(keys, BTreeSet::from(["blue", "green", "red"]));
    debug_assert_eq!(map.values().sum::<i32>(), 9);

    // Equal string maps hash equally, whatever their bucket layout
    let other: StringMap<i32> = [("blue", 3), ("green", 2), ("red", 4)].into_iter().collect();
    debug_assert_eq!(map, other);
    let digest = FixedState::default();
    debug_assert_eq!(digest.hash_one(&map), digest.hash_one(&other));

    // The same strings come back out by value, in borrowed iteration order
    let borrowed: Vec<String> = map.keys().map(String::from).collect();
    let owned: Vec<String> = map
        .clone()
        .into_iter()
        .map(|(key, _)| String::from(key.as_str()))
        .collect();
    debug_assert_eq!(borrowed, owned);

    let _ = map.hasher();
    debug_assert_eq!(map.into_iter().map(|(_, value)| value).sum::<i32>(), 9);
}

#[test]
// Random inserts, sets and removes on few buckets, checked against a BTreeMap after every step
fn test_map_6b() {
    use alloc::collections::BTreeMap;
    use rand::prelude::*;

    let mut rng = SmallRng::seed_from_u64(2468013579);

    for bucket_count in [1, 2, 3, 17] {
        let mut map = ChainedMap::with_buckets(bucket_count);
        let mut reference = BTreeMap::new();

        for _ in 0..2000 {
            let key = rng.random_range(0..40u32);
            let value = rng.random_range(0..1000u32);

            match rng.random_range(0..3) {
                0 => debug_assert_eq!(map.insert(key, value), reference.insert(key, value)),
                1 => debug_assert_eq!(map.remove(&key), reference.remove(&key)),
                _ => {
                    let value = if rng.random_bool(0.5) { Some(value) } else { None };
                    let expected = match value {
                        Some(value) => reference.insert(key, value),
                        None => reference.remove(&key),
                    };
                    debug_assert_eq!(map.set(key, value), expected);
                }
            }

            map.check();
            debug_assert_eq!(map.count(), reference.len());
            debug_assert_eq!(map.is_empty(), reference.is_empty());
            debug_assert_eq!(map.get(&key), reference.get(&key));
        }

        let mut pairs: Vec<(u32, u32)> = map.iter().map(|(k, v)| (*k, *v)).collect();
        pairs.sort_unstable();
        let expected: Vec<(u32, u32)> = reference.into_iter().collect();
        debug_assert_eq!(pairs, expected);
    }
}

#[test]
// A stress test with inserting and getting
fn test_map_7() {
    use alloc::string::ToString;
    use rand::prelude::*;

    const COUNT: usize = 100000;

    let mut rng = SmallRng::seed_from_u64(1234567890);

    let mut map = ChainedMap::with_buckets(4096);
    for _ in 0..COUNT {
        let key = rng.random_range(0..usize::MAX);
        let value = key.to_string();
        map.insert(key, value);
    }

    debug_assert_eq!(map.count(), COUNT);

    let mut rng = SmallRng::seed_from_u64(1234567890);

    for _ in 0..COUNT {
        let key = rng.random_range(0..usize::MAX);
        let value = key.to_string();
        debug_assert_eq!(map.get(&key), Some(&value));
    }

    debug_assert_eq!(map.iter().count(), COUNT);
}

#[test]
// A stress test with inserting and removing
fn test_map_8() {
    use alloc::string::ToString;
    use rand::prelude::*;

    const COUNT: usize = 100000;

    let mut rng = SmallRng::seed_from_u64(5678901234);

    let mut map = ChainedMap::with_buckets(1024);
    for _ in 0..COUNT {
        let key = rng.random_range(0..usize::MAX);
        let value = key.to_string();
        map.insert(key, value);
    }

    debug_assert_eq!(map.count(), COUNT);

    let mut rng = SmallRng::seed_from_u64(5678901234);

    for _ in 0..COUNT {
        let key = rng.random_range(0..usize::MAX);
        debug_assert_eq!(map.remove(&key), Some(key.to_string()));
    }

    debug_assert_eq!(map.count(), 0);
    debug_assert!(map.is_empty());
    map.check();
}
