//! [Hash Table] implementation with separate chaining and prime capacities.
//!
//! Every bucket is a short, ordered chain of key/value pairs. A key's bucket
//! is derived with a double-hashing step on top of the table's hasher, and the
//! bucket array grows to the next prime past twice its size whenever the load
//! factor exceeds [`MAX_LOAD_FACTOR`].
//!
//! [Hash Table]: https://en.wikipedia.org/wiki/Hash_table

use std::fmt;

use core::hash::{BuildHasher, Hash};
use core::iter::{self, FusedIterator};
use core::mem;
use core::ops::Index;
use core::slice;

use log::{debug, info};

use crate::algorithms::linear_search::linear_search_key;
use crate::algorithms::primes::{next_prime, prime_at_least};
use crate::collections::fnv::FnvBuildHasher;

/// Number of buckets a table starts with when no capacity is given.
pub const DEFAULT_CAPACITY: usize = 11;

/// Ratio of entries to buckets above which the table expands.
pub const MAX_LOAD_FACTOR: f64 = 0.7;

/// [Hash Table] implementation with separate chaining and prime capacities.
///
/// [Hash Table]: https://en.wikipedia.org/wiki/Hash_table
#[derive(Clone)]
pub struct HashTable<K, V, H = FnvBuildHasher> {
    /// Bucket array. Its length is the table capacity and is always prime.
    buckets: Vec<Vec<(K, V)>>,
    /// Number of entries across all buckets.
    entries: usize,
    /// Number of times the bucket array has been grown. Never reset.
    expansions: usize,
    /// Number of inserts that landed in an already occupied bucket.
    collisions: usize,
    /// Builds the hasher for per-key hashing.
    build_hasher: H,
}

/// Point-in-time statistics of a [`HashTable`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TableStats {
    /// Number of entries stored.
    pub len: usize,
    /// Number of buckets.
    pub capacity: usize,
    /// `len / capacity`.
    pub load_factor: f64,
    /// Number of times the table has grown.
    pub expansions: usize,
    /// Number of inserts that chained onto an occupied bucket.
    pub collisions: usize,
    /// Length of the longest bucket chain.
    pub longest_chain: usize,
}

/// A printable summary of a [`HashTable`] and its contents, created by
/// [`HashTable::report`].
///
/// Each detail line is `Bucket <index>: <label>: <key>, <value>`, with the key
/// taken from the stored entry.
pub struct Report<'a, K, V, H> {
    table: &'a HashTable<K, V, H>,
    key_label: &'a str,
}

/// Label printed before each key in a [`Report`] unless overridden.
pub const DEFAULT_KEY_LABEL: &str = "Key";

/// An iterator over the entries of a `HashTable<K, V>` tagged with the index
/// of the bucket holding them.
///
/// Entries are yielded in bucket order, then in chain order.
#[derive(Debug, Clone)]
pub struct Entries<'a, K, V> {
    buckets: iter::Enumerate<slice::Iter<'a, Vec<(K, V)>>>,
    chain: Option<(usize, slice::Iter<'a, (K, V)>)>,
    remaining: usize,
}

/// An iterator that references a `HashTable<K, V>`.
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    inner: Entries<'a, K, V>,
}

impl<K: Eq + Hash, V> HashTable<K, V, FnvBuildHasher> {
    /// Creates an empty `HashTable<K, V>` with [`DEFAULT_CAPACITY`] buckets.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainkv::prelude::*;
    ///
    /// let table: HashTable<u64, &str> = HashTable::new();
    /// assert_eq!(table.capacity(), 11);
    /// ```
    #[inline]
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates an empty `HashTable` with at least `capacity` buckets.
    ///
    /// The bucket count is rounded up to the nearest prime, and is never
    /// less than 2.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainkv::prelude::*;
    ///
    /// let table: HashTable<u64, &str> = HashTable::with_capacity(20);
    /// assert_eq!(table.capacity(), 23);
    /// ```
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, FnvBuildHasher)
    }
}

impl<K, V, H> HashTable<K, V, H> {
    /// Creates an empty `HashTable` with [`DEFAULT_CAPACITY`] buckets which
    /// will use the given hash builder to hash keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainkv::prelude::*;
    /// use std::hash::RandomState;
    ///
    /// let s = RandomState::new();
    /// let mut table = HashTable::with_hasher(s);
    /// table.insert(1, 2);
    /// ```
    #[inline]
    pub fn with_hasher(build_hasher: H) -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, build_hasher)
    }

    /// Creates an empty `HashTable` with at least `capacity` buckets, using
    /// `build_hasher` to hash the keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainkv::prelude::*;
    /// use std::hash::RandomState;
    ///
    /// let s = RandomState::new();
    /// let mut table = HashTable::with_capacity_and_hasher(0, s);
    /// assert_eq!(table.capacity(), 2);
    /// table.insert(1, 2);
    /// ```
    pub fn with_capacity_and_hasher(capacity: usize, build_hasher: H) -> Self {
        // The double-hashing step reduces modulo `capacity - 1`.
        let capacity = prime_at_least(capacity.max(2));

        Self {
            buckets: empty_buckets(capacity),
            entries: 0,
            expansions: 0,
            collisions: 0,
            build_hasher,
        }
    }

    /// Returns the number of buckets in the table. Always prime.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the number of elements in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries
    }

    /// Returns `true` if the table contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Returns the number of times the table has grown.
    #[inline]
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// Returns the number of inserts that were chained onto an occupied
    /// bucket.
    #[inline]
    pub fn collisions(&self) -> usize {
        self.collisions
    }

    /// Returns the ratio of stored elements to buckets.
    #[inline]
    pub fn load_factor(&self) -> f64 {
        self.entries as f64 / self.capacity() as f64
    }

    /// Returns a snapshot of the table's statistics.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainkv::prelude::*;
    ///
    /// let mut table = HashTable::new();
    /// table.insert(1, "a");
    ///
    /// let stats = table.stats();
    /// assert_eq!(stats.len, 1);
    /// assert_eq!(stats.capacity, 11);
    /// assert_eq!(stats.longest_chain, 1);
    /// ```
    pub fn stats(&self) -> TableStats {
        TableStats {
            len: self.entries,
            capacity: self.capacity(),
            load_factor: self.load_factor(),
            expansions: self.expansions,
            collisions: self.collisions,
            longest_chain: self.buckets.iter().map(Vec::len).max().unwrap_or(0),
        }
    }

    /// Returns an iterator referencing the hash table, in bucket order.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainkv::prelude::*;
    ///
    /// let table: HashTable<i32, &str> = HashTable::new();
    ///
    /// let mut iter = table.iter();
    ///
    /// assert_eq!(iter.next(), None);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.entries(),
        }
    }

    /// Returns an iterator over `(bucket_index, key, value)` triples, in
    /// bucket order and then chain order.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainkv::prelude::*;
    ///
    /// let mut table = HashTable::new();
    /// table.insert(7, "seven");
    ///
    /// let (index, key, value) = table.entries().next().unwrap();
    /// assert_eq!(index, table.bucket_index_for(&7, table.capacity()));
    /// assert_eq!((key, value), (&7, &"seven"));
    /// ```
    #[inline]
    pub fn entries(&self) -> Entries<'_, K, V> {
        Entries {
            buckets: self.buckets.iter().enumerate(),
            chain: None,
            remaining: self.entries,
        }
    }

    /// Returns a [`Report`] which renders the table statistics followed by
    /// every stored entry tagged with its bucket index.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainkv::prelude::*;
    ///
    /// let mut table = HashTable::new();
    /// table.insert(1, "a");
    ///
    /// let report = table.report().to_string();
    /// assert!(report.starts_with("HashTable Report\nTotal records: 1\n"));
    /// assert!(report.contains("Load Factor: 0.09\n"));
    /// assert!(report.contains(": Key: 1, a\n"));
    /// ```
    #[inline]
    pub fn report(&self) -> Report<'_, K, V, H> {
        Report {
            table: self,
            key_label: DEFAULT_KEY_LABEL,
        }
    }

    /// Clears the table, removing all key-value pairs. Keeps the bucket array
    /// and the expansion count.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainkv::prelude::*;
    ///
    /// let mut table = HashTable::new();
    /// table.insert(1, "a");
    /// table.clear();
    /// assert!(table.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.buckets.iter_mut().for_each(Vec::clear);
        self.entries = 0;
    }
}

impl<K: Eq + Hash, V, H: BuildHasher> HashTable<K, V, H> {
    /// Returns the bucket `key` maps to in a table of `capacity` buckets.
    ///
    /// The primary hash comes from the table's hasher; a secondary step of
    /// `1 + primary % (capacity - 1)` is added before reducing modulo
    /// `capacity`.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is less than 2.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainkv::prelude::*;
    ///
    /// let table: HashTable<u64, ()> = HashTable::new();
    ///
    /// let index = table.bucket_index_for(&42, 23);
    /// assert!(index < 23);
    /// assert_eq!(index, table.bucket_index_for(&42, 23));
    /// ```
    pub fn bucket_index_for(&self, key: &K, capacity: usize) -> usize {
        assert!(
            capacity >= 2,
            "bucket index requested for capacity {capacity}, need at least 2"
        );

        let capacity = capacity as u64;
        let primary = self.build_hasher.hash_one(key);
        let secondary = 1 + primary % (capacity - 1);

        // Reduce both terms first so the sum cannot overflow.
        ((primary % capacity + secondary % capacity) % capacity) as usize
    }

    /// Inserts a key-value pair into the table.
    ///
    /// If the table did not have this key present, [`None`] is returned.
    ///
    /// If the table did have this key present, the value is updated in place,
    /// and the old value is returned, but the key is not updated.
    ///
    /// # Time Complexity
    ///
    /// Takes amortized *O*(1) time. If the insert pushes the load factor past
    /// [`MAX_LOAD_FACTOR`], *O*(*len*) time is taken to rehash every entry
    /// into a bucket array of the next prime past twice the capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainkv::prelude::*;
    ///
    /// let mut table = HashTable::new();
    /// assert_eq!(table.insert(37, "a"), None);
    /// assert_eq!(table.is_empty(), false);
    ///
    /// table.insert(37, "b");
    /// assert_eq!(table.insert(37, "c"), Some("b"));
    /// assert_eq!(table.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let index = self.bucket_index(&key);
        let bucket = &mut self.buckets[index];

        if let Some(pos) = linear_search_key(bucket.as_slice(), &key) {
            return Some(mem::replace(&mut bucket[pos].1, value));
        }

        if !bucket.is_empty() {
            self.collisions += 1;
            debug!(
                "collision in bucket {index} ({} chained), resolving by chaining",
                bucket.len()
            );
        }

        bucket.push((key, value));
        self.entries += 1;

        if self.over_max_load() {
            self.resize();
        }

        None
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Time Complexity
    ///
    /// Takes average *O*(1) time. Worst case is *O*(*n*) for a bucket chain
    /// of length *n*.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainkv::prelude::*;
    ///
    /// let mut table = HashTable::new();
    /// table.insert(1, "a");
    /// assert_eq!(table.get(&1), Some(&"a"));
    /// assert_eq!(table.get(&2), None);
    /// ```
    #[inline]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.get_key_value(key).map(|(_, v)| v)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// Changes made through the reference are seen by later lookups and
    /// reports without re-inserting.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainkv::prelude::*;
    ///
    /// let mut table = HashTable::new();
    /// table.insert(1, "a");
    /// if let Some(x) = table.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(table[&1], "b");
    /// ```
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.bucket_index(key);
        let bucket = &mut self.buckets[index];
        let pos = linear_search_key(bucket.as_slice(), key)?;

        Some(&mut bucket[pos].1)
    }

    /// Returns the key-value pair corresponding to the supplied key.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainkv::prelude::*;
    ///
    /// let mut table = HashTable::new();
    /// table.insert(1, "a");
    /// assert_eq!(table.get_key_value(&1), Some((&1, &"a")));
    /// assert_eq!(table.get_key_value(&2), None);
    /// ```
    pub fn get_key_value(&self, key: &K) -> Option<(&K, &V)> {
        let bucket = &self.buckets[self.bucket_index(key)];
        let (k, v) = &bucket[linear_search_key(bucket, key)?];

        Some((k, v))
    }

    /// Returns `true` if the table contains a value for the specified key.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainkv::prelude::*;
    ///
    /// let mut table = HashTable::new();
    /// table.insert(1, "a");
    /// assert_eq!(table.contains_key(&1), true);
    /// assert_eq!(table.contains_key(&2), false);
    /// ```
    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Removes a key from the table, returning the value at the key if the key
    /// was previously in the table.
    ///
    /// The remaining entries of the bucket keep their relative order. The
    /// table never shrinks.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainkv::prelude::*;
    ///
    /// let mut table = HashTable::new();
    /// table.insert(1, "a");
    /// assert_eq!(table.remove(&1), Some("a"));
    /// assert_eq!(table.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let index = self.bucket_index(key);
        let bucket = &mut self.buckets[index];
        let pos = linear_search_key(bucket.as_slice(), key)?;

        let (_, value) = bucket.remove(pos);
        self.entries -= 1;

        Some(value)
    }

    /// Returns the bucket `key` maps to at the current capacity.
    #[inline]
    fn bucket_index(&self, key: &K) -> usize {
        self.bucket_index_for(key, self.capacity())
    }

    /// Returns `true` once `len / capacity` exceeds [`MAX_LOAD_FACTOR`].
    #[inline]
    fn over_max_load(&self) -> bool {
        self.entries as f64 > self.capacity() as f64 * MAX_LOAD_FACTOR
    }

    /// Grows the bucket array to the smallest prime greater than twice the
    /// current capacity and rehashes every entry into it.
    ///
    /// Old buckets are drained in index order, so each new chain keeps the
    /// relative order its entries had in the old traversal.
    fn resize(&mut self) {
        self.expansions += 1;

        let old_capacity = self.capacity();
        let new_capacity = next_prime(old_capacity * 2);
        let mut buckets = empty_buckets(new_capacity);

        for (key, value) in mem::take(&mut self.buckets).into_iter().flatten() {
            let index = self.bucket_index_for(&key, new_capacity);
            buckets[index].push((key, value));
        }

        self.buckets = buckets;

        info!(
            "expanded table from {old_capacity} to {new_capacity} buckets ({} entries, expansion #{})",
            self.entries, self.expansions
        );
    }
}

fn empty_buckets<K, V>(capacity: usize) -> Vec<Vec<(K, V)>> {
    iter::repeat_with(Vec::new).take(capacity).collect()
}

impl<K, V, H: Default> Default for HashTable<K, V, H> {
    fn default() -> Self {
        Self::with_hasher(H::default())
    }
}

impl<K, V, H> fmt::Debug for HashTable<K, V, H>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, H> Extend<(K, V)> for HashTable<K, V, H>
where
    K: Eq + Hash,
    H: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V, H> FromIterator<(K, V)> for HashTable<K, V, H>
where
    K: Eq + Hash,
    H: BuildHasher + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = Self::default();
        table.extend(iter);
        table
    }
}

impl<'a, K, V, H> IntoIterator for &'a HashTable<K, V, H> {
    type IntoIter = Iter<'a, K, V>;
    type Item = (&'a K, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V> Iterator for Entries<'a, K, V> {
    type Item = (usize, &'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((index, chain)) = &mut self.chain {
                if let Some((k, v)) = chain.next() {
                    self.remaining -= 1;
                    return Some((*index, k, v));
                }
            }

            // Current chain exhausted, move on to the next bucket.
            let (index, bucket) = self.buckets.next()?;
            self.chain = Some((index, bucket.iter()));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Entries<'_, K, V> {}

impl<K, V> FusedIterator for Entries<'_, K, V> {}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, k, v)| (k, v))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V, H> Index<&K> for HashTable<K, V, H>
where
    K: Eq + Hash,
    H: BuildHasher,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the `HashTable`.
    #[inline]
    fn index(&self, key: &K) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl fmt::Display for TableStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "records={} capacity={} load={:.2} expansions={} collisions={} longest_chain={}",
            self.len,
            self.capacity,
            self.load_factor,
            self.expansions,
            self.collisions,
            self.longest_chain
        )
    }
}

impl<'a, K, V, H> Report<'a, K, V, H> {
    /// Replaces the label printed before each key.
    ///
    /// # Examples
    ///
    /// ```
    /// use chainkv::prelude::*;
    ///
    /// let mut table = HashTable::new();
    /// table.insert(7, "seven");
    ///
    /// let report = table.report().with_key_label("ID").to_string();
    /// assert!(report.contains(": ID: 7, seven\n"));
    /// ```
    #[inline]
    pub fn with_key_label(mut self, key_label: &'a str) -> Self {
        self.key_label = key_label;
        self
    }
}

impl<K: fmt::Display, V: fmt::Display, H> fmt::Display for Report<'_, K, V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.table;

        writeln!(f, "HashTable Report")?;
        writeln!(f, "Total records: {}", table.len())?;
        writeln!(f, "Table Capacity: {}", table.capacity())?;
        writeln!(f, "Load Factor: {:.2}", table.load_factor())?;
        writeln!(f, "Total Expansions: {}", table.expansions())?;
        writeln!(f, "Records Detail:")?;

        for (index, key, value) in table.entries() {
            writeln!(f, "   Bucket {index}: {}: {key}, {value}", self.key_label)?;
        }

        writeln!(f, "End of Report")
    }
}

impl<K, V, H> fmt::Debug for Report<'_, K, V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Report")
            .field("key_label", &self.key_label)
            .field("stats", &self.table.stats())
            .finish_non_exhaustive()
    }
}
