//! Insertion-ordered hash map.
//!
//! `OrderedMap` pairs an `FxHashMap<K, SlotId>` index with an
//! [`IntrusiveList`] of `(K, V)` entries. The list order is the order in which
//! keys were last appended: the front is the entry appended longest ago, the
//! back is the most recent one.
//!
//! ```text
//!   index: FxHashMap<K, SlotId>          order: IntrusiveList<(K, V)>
//!   ┌─────┬────────┐
//!   │ "a" │ id_1   │──────────────►  head ─► [("a", 1)] ◄──► [("b", 2)] ◄── tail
//!   │ "b" │ id_2   │──────────────────────────────────────────────┘
//!   └─────┴────────┘
//! ```
//!
//! Every operation except iteration and `clear` is O(1). The map does not
//! bound its size; [`LruMap`](crate::policy::lru_map::LruMap) layers the
//! eviction policy on top.

use std::borrow::Borrow;
use std::fmt;
use std::hash::Hash;
use std::iter::FusedIterator;

use rustc_hash::FxHashMap;

use crate::ds::intrusive_list::{IntrusiveList, IntrusiveListIter};
use crate::ds::slot_arena::SlotId;
use crate::error::InvariantError;

/// Hash map that remembers the order in which keys were appended.
///
/// # Example
///
/// ```
/// use lrumap::ds::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.push_back("a", 1);
/// map.push_back("b", 2);
/// map.push_back("a", 10); // update moves "a" to the back
///
/// let order: Vec<_> = map.iter().map(|(k, v)| (*k, *v)).collect();
/// assert_eq!(order, vec![("b", 2), ("a", 10)]);
/// ```
#[derive(Clone)]
pub struct OrderedMap<K, V> {
    index: FxHashMap<K, SlotId>,
    order: IntrusiveList<(K, V)>,
}

impl<K, V> OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty map.
    pub fn new() -> Self {
        Self {
            index: FxHashMap::default(),
            order: IntrusiveList::new(),
        }
    }

    /// Creates an empty map with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            order: IntrusiveList::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Returns the value for `key` without changing its position.
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = *self.index.get(key)?;
        self.order.get(id).map(|(_, value)| value)
    }

    /// Returns a mutable reference to the value for `key` without changing
    /// its position.
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = *self.index.get(key)?;
        self.order.get_mut(id).map(|(_, value)| value)
    }

    /// Returns the entry appended longest ago.
    #[inline]
    pub fn front(&self) -> Option<(&K, &V)> {
        self.order.front().map(|(key, value)| (key, value))
    }

    /// Returns the most recently appended entry.
    #[inline]
    pub fn back(&self) -> Option<(&K, &V)> {
        self.order.back().map(|(key, value)| (key, value))
    }

    /// Appends `(key, value)` at the back.
    ///
    /// If `key` is already present its value is replaced, the entry moves to
    /// the back, and the previous value is returned. Other entries keep their
    /// relative order either way.
    pub fn push_back(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&id) = self.index.get(&key) {
            self.order.move_to_back(id);
            return self
                .order
                .get_mut(id)
                .map(|(_, slot)| std::mem::replace(slot, value));
        }

        let id = self.order.push_back((key.clone(), value));
        self.index.insert(key, id);
        None
    }

    /// Moves an existing entry to the back. Returns `false` if `key` is absent.
    #[inline]
    pub fn move_to_back<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match self.index.get(key) {
            Some(&id) => self.order.move_to_back(id),
            None => false,
        }
    }

    /// Moves `key` to the back and returns its value.
    #[inline]
    pub fn get_and_move_to_back<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = *self.index.get(key)?;
        self.order.move_to_back(id);
        self.order.get_mut(id).map(|(_, value)| value)
    }

    /// Removes `key`, returning its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes `key`, returning the stored key and value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.index.remove(key)?;
        self.order.remove(id)
    }

    /// Removes and returns the entry appended longest ago.
    pub fn pop_front(&mut self) -> Option<(K, V)> {
        let (key, value) = self.order.pop_front()?;
        self.index.remove(&key);
        Some((key, value))
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.index.clear();
        self.order.clear();
    }

    /// Iterates entries from the front (oldest) to the back (newest).
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.order.iter(),
            remaining: self.order.len(),
        }
    }

    /// Iterates keys from oldest to newest.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Iterates values from oldest to newest.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, value)| value)
    }

    /// Arena slots allocated by the backing list, occupied or free.
    pub fn slot_count(&self) -> usize {
        self.order.slot_count()
    }

    /// Checks that the index and the list describe the same set of entries.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        self.order.check_links()?;

        if self.index.len() != self.order.len() {
            return Err(InvariantError::new(format!(
                "index holds {} keys but order list holds {} entries",
                self.index.len(),
                self.order.len()
            )));
        }

        for id in self.order.iter_ids() {
            let Some((key, _)) = self.order.get(id) else {
                return Err(InvariantError::new("order list yielded a free slot"));
            };
            match self.index.get(key) {
                Some(&indexed) if indexed == id => {},
                Some(_) => {
                    return Err(InvariantError::new(
                        "key appears more than once in the order list",
                    ));
                },
                None => {
                    return Err(InvariantError::new("listed entry missing from index"));
                },
            }
        }
        Ok(())
    }
}

impl<K, V> Default for OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for OrderedMap<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedMap<K, V>
where
    K: Eq + Hash + Clone,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over `(&K, &V)` pairs from oldest to newest.
pub struct Iter<'a, K, V> {
    inner: IntrusiveListIter<'a, (K, V)>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let (key, value) = self.inner.next()?;
        self.remaining -= 1;
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            remaining: self.remaining,
        }
    }
}
