//! Bounded map with least-recently-used eviction.
//!
//! `LruMap` keeps its entries in recency order and holds at most
//! [`capacity`](LruMap::capacity) of them. Writing an existing key or reading
//! one with [`get`](LruMap::get) rolls that entry up to the newest position;
//! inserting a new key into a full map first evicts the oldest entry.
//!
//! ## Architecture
//!
//! ```text
//!   LruMap<K, V>
//!   ┌──────────────────────────────────────────────────────────────┐
//!   │ capacity: Capacity                                           │
//!   │ entries:  OrderedMap<K, V>                                   │
//!   │                                                              │
//!   │   front (least recently used)          back (most recent)    │
//!   │     [k0, v0] ◄──► [k1, v1] ◄──► ... ◄──► [kn, vn]            │
//!   │        ▲                                     ▲               │
//!   │        └─ evicted by insert when full        └─ insert / get │
//!   └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Insert
//!
//! ```text
//!   insert(k, v)
//!     ├─ k present  → replace value, roll k up to the back
//!     └─ k absent
//!          ├─ len >= capacity → evict front (no-op on empty map)
//!          └─ len <  capacity → append (k, v) at the back
//!                      else  → drop (k, v)   [zero capacity only]
//! ```
//!
//! ## Operations
//!
//! | Operation    | Promotes | Complexity |
//! |--------------|----------|------------|
//! | `insert`     | yes      | O(1)       |
//! | `get`        | yes      | O(1)       |
//! | `get_mut`    | yes      | O(1)       |
//! | `peek`       | no       | O(1)       |
//! | `contains`   | no       | O(1)       |
//! | `remove`     | n/a      | O(1)       |
//! | `pop_lru`    | n/a      | O(1)       |
//! | `iter`       | no       | O(n)       |
//!
//! ## Capacity
//!
//! Any numeric capacity is accepted (see [`Capacity`]). Zero, negative and
//! NaN capacities never fail; such a map simply absorbs every insert and
//! stays empty. [`LruMap::try_new`] is the strict alternative.
//!
//! ## Key equality
//!
//! Keys are compared by value through `Hash + Eq`. To key by identity, use a
//! key type whose `Eq`/`Hash` are defined on an address or handle.
//!
//! ## Thread Safety
//!
//! `LruMap` is a plain single-threaded container: it is `Send`/`Sync` when
//! `K` and `V` are, and shared mutation needs an external lock around the
//! whole map.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;

use crate::capacity::Capacity;
use crate::ds::ordered_map::{Iter, OrderedMap};
use crate::error::{ConfigError, InvariantError};

#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::LruMapMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::LruMapMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    CoreMetricsRecorder, LruMapMetricsRecorder, MetricsReset, MetricsSnapshotProvider,
};

/// A bounded, recency-ordered map.
///
/// # Example
///
/// ```
/// use lrumap::policy::lru_map::LruMap;
///
/// let mut map = LruMap::new(2);
/// map.insert("a", 1).insert("b", 2);
///
/// // Reading "a" makes "b" the least recently used entry
/// assert_eq!(map.get("a"), Some(&1));
///
/// map.insert("c", 3);
/// assert!(!map.contains("b"));
///
/// let order: Vec<_> = map.keys().copied().collect();
/// assert_eq!(order, vec!["a", "c"]);
/// ```
#[derive(Clone)]
pub struct LruMap<K, V> {
    entries: OrderedMap<K, V>,
    capacity: Capacity,
    #[cfg(feature = "metrics")]
    metrics: LruMapMetrics,
}

impl<K, V> LruMap<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty map bounded by `capacity`.
    ///
    /// Never fails. Capacities that do not describe a positive count
    /// produce a map that stays empty.
    ///
    /// # Example
    ///
    /// ```
    /// use lrumap::policy::lru_map::LruMap;
    ///
    /// let map: LruMap<u64, String> = LruMap::new(100);
    /// assert_eq!(map.capacity().get(), 100);
    /// assert!(map.is_empty());
    ///
    /// let mut sink: LruMap<u64, String> = LruMap::new(-1);
    /// sink.insert(1, "dropped".to_string());
    /// assert!(sink.is_empty());
    /// ```
    pub fn new(capacity: impl Into<Capacity>) -> Self {
        let capacity = capacity.into();
        Self {
            entries: OrderedMap::with_capacity(capacity.prealloc_hint()),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: LruMapMetrics::default(),
        }
    }

    /// Creates a map and inserts `entries` in iteration order.
    ///
    /// Each pair goes through [`insert`](Self::insert), so later pairs can
    /// evict earlier ones and a repeated key is rolled up rather than
    /// duplicated.
    ///
    /// # Example
    ///
    /// ```
    /// use lrumap::policy::lru_map::LruMap;
    ///
    /// let map = LruMap::with_entries(2, [(0, 1), (1, 2), (2, 3), (3, 4)]);
    /// let entries: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
    /// assert_eq!(entries, vec![(2, 3), (3, 4)]);
    /// ```
    pub fn with_entries<I>(capacity: impl Into<Capacity>, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = Self::new(capacity);
        map.extend(entries);
        map
    }

    /// Creates an empty map, rejecting a capacity that could never hold an
    /// entry.
    ///
    /// # Example
    ///
    /// ```
    /// use lrumap::policy::lru_map::LruMap;
    ///
    /// assert!(LruMap::<u8, u8>::try_new(4).is_ok());
    /// assert!(LruMap::<u8, u8>::try_new(f64::NAN).is_err());
    /// ```
    pub fn try_new(capacity: impl Into<Capacity>) -> Result<Self, ConfigError> {
        let capacity = capacity.into();
        if capacity.is_zero() {
            return Err(ConfigError::new(
                "capacity must be a positive entry count",
            ));
        }
        Ok(Self::new(capacity))
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry bound.
    #[inline]
    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    /// Returns `true` if `key` is present. Does not update recency.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Returns the value for `key` without updating recency.
    #[inline]
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key)
    }

    /// Inserts `(key, value)` and returns the map for chaining.
    ///
    /// An existing key keeps a single entry: its value is replaced and it
    /// moves to the most-recently-used position. A new key evicts the
    /// least-recently-used entry first when the map is full. With a zero
    /// capacity the pair is dropped.
    ///
    /// # Example
    ///
    /// ```
    /// use lrumap::policy::lru_map::LruMap;
    ///
    /// let mut map = LruMap::new(2);
    /// map.insert("", "").insert("a", "a").insert("b", "b").insert("a", "new");
    ///
    /// let entries: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
    /// assert_eq!(entries, vec![("b", "b"), ("a", "new")]);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> &mut Self {
        #[cfg(feature = "metrics")]
        self.metrics.record_insert_call();

        if let Some(slot) = self.entries.get_and_move_to_back(&key) {
            *slot = value;
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_update();
            return self;
        }

        if self.capacity.is_reached_by(self.entries.len()) {
            self.evict_lru();
        }

        if self.capacity.admits(self.entries.len()) {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_new();
            self.entries.push_back(key, value);
        } else {
            #[cfg(feature = "metrics")]
            self.metrics.record_insert_dropped();
            log::trace!(
                "lru map dropped insert: capacity {} admits no entries",
                self.capacity
            );
        }

        self
    }

    /// Returns the value for `key` and rolls the entry up to the
    /// most-recently-used position.
    ///
    /// A missing key returns `None` and leaves the order untouched.
    ///
    /// # Example
    ///
    /// ```
    /// use lrumap::policy::lru_map::LruMap;
    ///
    /// let mut map = LruMap::with_entries(5, [("", ""), ("a", "a")]);
    ///
    /// assert_eq!(map.get("b"), None);
    /// assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec!["", "a"]);
    ///
    /// assert_eq!(map.get(""), Some(&""));
    /// assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec!["a", ""]);
    /// ```
    #[inline]
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_mut(key).map(|value| &*value)
    }

    /// Like [`get`](Self::get), but returns a mutable reference.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let value = self.entries.get_and_move_to_back(key);

        #[cfg(feature = "metrics")]
        {
            if value.is_some() {
                self.metrics.record_get_hit();
            } else {
                self.metrics.record_get_miss();
            }
        }

        value
    }

    /// Removes `key`, returning its value. Other entries keep their order.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        #[cfg(feature = "metrics")]
        self.metrics.record_remove_call();

        let removed = self.entries.remove(key);

        #[cfg(feature = "metrics")]
        {
            if removed.is_some() {
                self.metrics.record_remove_found();
            }
        }

        removed
    }

    /// Returns the least-recently-used entry without removing it.
    #[inline]
    pub fn peek_lru(&self) -> Option<(&K, &V)> {
        self.entries.front()
    }

    /// Returns the most-recently-used entry.
    #[inline]
    pub fn peek_mru(&self) -> Option<(&K, &V)> {
        self.entries.back()
    }

    /// Removes and returns the least-recently-used entry.
    ///
    /// # Example
    ///
    /// ```
    /// use lrumap::policy::lru_map::LruMap;
    ///
    /// let mut map = LruMap::new(10);
    /// map.insert(1, "one").insert(2, "two");
    /// map.get(&1);
    ///
    /// assert_eq!(map.pop_lru(), Some((2, "two")));
    /// ```
    pub fn pop_lru(&mut self) -> Option<(K, V)> {
        #[cfg(feature = "metrics")]
        self.metrics.record_pop_lru_call();

        let popped = self.entries.pop_front();

        #[cfg(feature = "metrics")]
        {
            if popped.is_some() {
                self.metrics.record_pop_lru_found();
            }
        }

        popped
    }

    /// Removes every entry. The capacity is unchanged.
    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        self.entries.clear();
    }

    /// Iterates entries from least to most recently used without promoting
    /// any of them.
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        self.entries.iter()
    }

    /// Iterates keys from least to most recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.entries.keys()
    }

    /// Iterates values from least to most recently used.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.entries.values()
    }

    /// Verifies the size bound, key uniqueness, and index/list agreement.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.entries.check_invariants()?;

        if self.entries.len() > self.capacity.get() {
            return Err(InvariantError::new(format!(
                "map holds {} entries but capacity is {}",
                self.entries.len(),
                self.capacity
            )));
        }
        Ok(())
    }

    fn evict_lru(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_evict_call();

        if self.entries.pop_front().is_some() {
            #[cfg(feature = "metrics")]
            self.metrics.record_evicted_entry();
            log::trace!(
                "lru map evicted least recently used entry (capacity {})",
                self.capacity
            );
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruMap<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Copies the current counters plus the map's length and capacity.
    ///
    /// ```
    /// use lrumap::policy::lru_map::LruMap;
    ///
    /// let mut map = LruMap::new(1);
    /// map.insert("a", 1).insert("b", 2);
    /// map.get(&"a");
    ///
    /// let snap = map.metrics_snapshot();
    /// assert_eq!(snap.evicted_entries, 1);
    /// assert_eq!(snap.get_misses, 1);
    /// assert_eq!(snap.map_len, 1);
    /// ```
    pub fn metrics_snapshot(&self) -> LruMapMetricsSnapshot {
        LruMapMetricsSnapshot {
            get_calls: self.metrics.get_calls,
            get_hits: self.metrics.get_hits,
            get_misses: self.metrics.get_misses,
            insert_calls: self.metrics.insert_calls,
            insert_updates: self.metrics.insert_updates,
            insert_new: self.metrics.insert_new,
            insert_dropped: self.metrics.insert_dropped,
            evict_calls: self.metrics.evict_calls,
            evicted_entries: self.metrics.evicted_entries,
            pop_lru_calls: self.metrics.pop_lru_calls,
            pop_lru_found: self.metrics.pop_lru_found,
            remove_calls: self.metrics.remove_calls,
            remove_found: self.metrics.remove_found,
            clear_calls: self.metrics.clear_calls,
            map_len: self.entries.len(),
            capacity: self.capacity.get(),
        }
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<LruMapMetricsSnapshot> for LruMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> LruMapMetricsSnapshot {
        self.metrics_snapshot()
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsReset for LruMap<K, V> {
    fn reset_metrics(&mut self) {
        self.metrics.reset_metrics();
    }
}

impl<K, V> Default for LruMap<K, V>
where
    K: Eq + Hash + Clone,
{
    /// An unbounded map.
    fn default() -> Self {
        Self::new(Capacity::UNBOUNDED)
    }
}

impl<K, V> Extend<(K, V)> for LruMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K, V> IntoIterator for &'a LruMap<K, V>
where
    K: Eq + Hash + Clone,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> fmt::Debug for LruMap<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruMap")
            .field("capacity", &self.capacity)
            .field("entries", &self.entries)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries<K: Clone + Eq + Hash, V: Clone>(map: &LruMap<K, V>) -> Vec<(K, V)> {
        map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    #[test]
    fn test_basic_operations() {
        let mut map = LruMap::new(3);

        assert!(map.is_empty());
        assert_eq!(map.capacity(), Capacity::new(3));

        map.insert(1, "one").insert(2, "two").insert(3, "three");

        assert_eq!(map.len(), 3);
        assert_eq!(map.get(&1), Some(&"one"));
        assert_eq!(map.get(&2), Some(&"two"));
        assert_eq!(map.get(&3), Some(&"three"));
    }

    #[test]
    fn test_eviction_removes_oldest() {
        let mut map = LruMap::new(2);

        map.insert(1, "one").insert(2, "two");

        // Access 1 to make it MRU
        map.get(&1);

        // Insert 3, should evict 2 (LRU)
        map.insert(3, "three");

        assert!(map.contains(&1));
        assert!(!map.contains(&2));
        assert!(map.contains(&3));
        assert_eq!(entries(&map), vec![(1, "one"), (3, "three")]);
    }

    #[test]
    fn test_update_rolls_up_without_growing() {
        let mut map = LruMap::new(3);
        map.insert('a', 1).insert('b', 2).insert('c', 3);

        map.insert('a', 10);

        assert_eq!(map.len(), 3);
        assert_eq!(entries(&map), vec![('b', 2), ('c', 3), ('a', 10)]);
    }

    #[test]
    fn test_update_on_full_map_does_not_evict() {
        let mut map = LruMap::new(2);
        map.insert("x", 1).insert("y", 2);

        map.insert("x", 3);

        assert_eq!(entries(&map), vec![("y", 2), ("x", 3)]);
    }

    #[test]
    fn test_get_missing_key_keeps_order() {
        let mut map = LruMap::new(3);
        map.insert(1, 'a').insert(2, 'b');

        assert_eq!(map.get(&9), None);
        assert_eq!(entries(&map), vec![(1, 'a'), (2, 'b')]);
    }

    #[test]
    fn test_get_mut_rolls_up_and_edits() {
        let mut map = LruMap::new(3);
        map.insert(1, 10).insert(2, 20);

        if let Some(v) = map.get_mut(&1) {
            *v += 1;
        }

        assert_eq!(entries(&map), vec![(2, 20), (1, 11)]);
    }

    #[test]
    fn test_peek_and_contains_do_not_promote() {
        let mut map = LruMap::new(3);
        map.insert(1, "one").insert(2, "two").insert(3, "three");

        assert_eq!(map.peek(&1), Some(&"one"));
        assert!(map.contains(&1));

        // 1 is still LRU because peek doesn't update
        map.insert(4, "four");
        assert!(!map.contains(&1));
    }

    #[test]
    fn test_remove_keeps_remaining_order() {
        let mut map = LruMap::new(4);
        map.insert(1, ()).insert(2, ()).insert(3, ());

        assert_eq!(map.remove(&2), Some(()));
        assert_eq!(map.remove(&2), None);
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_pop_and_peek_lru() {
        let mut map = LruMap::new(10);
        map.insert(1, "one").insert(2, "two").insert(3, "three");

        assert_eq!(map.peek_lru(), Some((&1, &"one")));
        assert_eq!(map.peek_mru(), Some((&3, &"three")));
        assert_eq!(map.pop_lru(), Some((1, "one")));
        assert_eq!(map.pop_lru(), Some((2, "two")));
        assert_eq!(map.pop_lru(), Some((3, "three")));
        assert_eq!(map.pop_lru(), None);
        assert_eq!(map.peek_lru(), None);
    }

    #[test]
    fn test_zero_capacity_absorbs_inserts() {
        let mut map: LruMap<i32, &str> = LruMap::new(0);

        map.insert(1, "one").insert(2, "two").insert(1, "uno");

        assert!(map.is_empty());
        assert_eq!(map.get(&1), None);
        map.check_invariants().unwrap();
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut map = LruMap::new(2);
        map.insert(1, "one").insert(2, "two");

        map.clear();

        assert!(map.is_empty());
        assert_eq!(map.capacity().get(), 2);
        map.insert(3, "three").insert(4, "four").insert(5, "five");
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![4, 5]);
    }

    #[test]
    fn test_churn_reuses_arena_slots() {
        let mut map = LruMap::new(1);
        for i in 0..(1u32 << 20) {
            map.insert(i, i);
        }
        assert_eq!(map.len(), 1);
        assert_eq!(map.entries.slot_count(), 1);
        assert_eq!(entries(&map), vec![((1 << 20) - 1, (1 << 20) - 1)]);
    }

    #[test]
    fn test_try_new_rejects_zero_capacity() {
        assert!(LruMap::<u8, u8>::try_new(3).is_ok());

        let err = LruMap::<u8, u8>::try_new(0).unwrap_err();
        assert!(err.message().contains("capacity"));
        assert!(LruMap::<u8, u8>::try_new(-5i64).is_err());
    }

    #[test]
    fn test_default_is_unbounded() {
        let mut map: LruMap<u32, u32> = LruMap::default();
        map.extend((0..10_000).map(|i| (i, i)));
        assert_eq!(map.len(), 10_000);
        assert!(map.capacity().is_unbounded());
    }

    #[test]
    fn test_check_invariants_reports_overfull_map() {
        let mut map = LruMap::new(2);
        map.insert(1, 1).insert(2, 2);
        map.check_invariants().unwrap();

        // Bypass `insert` to break the size bound.
        map.entries.push_back(3, 3);
        let err = map.check_invariants().unwrap_err();
        assert!(err.message().contains("capacity"));
    }

    #[test]
    fn test_debug_shows_recency_order() {
        let mut map = LruMap::new(3);
        map.insert("b", 2).insert("a", 1);
        map.get("b");
        assert_eq!(
            format!("{:?}", map),
            r#"LruMap { capacity: Capacity(3), entries: {"a": 1, "b": 2} }"#
        );
    }

    #[test]
    fn test_clone_is_independent() {
        let mut map = LruMap::new(2);
        map.insert(1, 1).insert(2, 2);
        let snapshot = map.clone();

        map.get(&1);
        map.insert(3, 3);

        assert_eq!(entries(&snapshot), vec![(1, 1), (2, 2)]);
        assert_eq!(entries(&map), vec![(1, 1), (3, 3)]);
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn test_metrics_track_hits_evictions_and_drops() {
        let mut map = LruMap::new(1);
        map.insert(1, 'a').insert(1, 'b').insert(2, 'c');
        map.get(&2);
        map.get(&1);

        let snap = map.metrics_snapshot();
        assert_eq!(snap.insert_calls, 3);
        assert_eq!(snap.insert_updates, 1);
        assert_eq!(snap.insert_new, 2);
        assert_eq!(snap.evicted_entries, 1);
        assert_eq!(snap.get_hits, 1);
        assert_eq!(snap.get_misses, 1);
        assert_eq!(snap.map_len, 1);
        assert_eq!(snap.capacity, 1);

        let mut sink: LruMap<u8, u8> = LruMap::new(0);
        sink.insert(1, 1);
        assert_eq!(sink.metrics_snapshot().insert_dropped, 1);

        map.reset_metrics();
        assert_eq!(map.snapshot().insert_calls, 0);
    }
}
