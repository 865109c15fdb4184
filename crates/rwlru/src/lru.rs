//! LRU (Least Recently Used) engine
//!
//! The store maps each key to its value and to the index of the key's node
//! in the recency list. Both structures are always updated together, so the
//! key sets are identical and never grow past the capacity.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use ahash::RandomState;

use crate::recency::RecencyList;

/// Owned snapshot of the cached keys
///
/// Hashed with `ahash`; the hasher is re-exported as [`crate::RandomState`].
pub type KeySet<K> = HashSet<K, RandomState>;

/// Owned snapshot of the cached entries
///
/// Hashed with `ahash`; the hasher is re-exported as [`crate::RandomState`].
pub type ValueMap<K, V> = HashMap<K, V, RandomState>;

/// Store entry: the value plus its position in the recency list
struct Slot<V> {
    value: V,
    node: usize,
}

/// What a `set` did to the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Insertion {
    /// Existing key, value overwritten
    Updated,
    /// New key, room was available
    Inserted,
    /// New key, least recently used entry evicted to make room
    Evicted,
}

/// Single-threaded LRU cache with fixed capacity
pub(crate) struct LruCore<K, V> {
    map: HashMap<K, Slot<V>, RandomState>,
    order: RecencyList<K>,
    capacity: usize,
}

impl<K, V> LruCore<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a new LRU cache with the given capacity
    pub(crate) fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0, "Capacity must be greater than 0");

        Self {
            map: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
            order: RecencyList::with_capacity(capacity),
            capacity,
        }
    }

    /// Get a value and promote its key to most recently used
    pub(crate) fn get(&mut self, key: &K) -> Option<&V> {
        let slot = self.map.get(key)?;
        self.order.move_to_front(slot.node);
        Some(&slot.value)
    }

    /// Get a value without touching the recency order
    pub(crate) fn peek(&self, key: &K) -> Option<&V> {
        self.map.get(key).map(|slot| &slot.value)
    }

    /// Insert or overwrite a key, evicting the tail when a new key overflows
    pub(crate) fn set(&mut self, key: K, value: V) -> Insertion {
        if let Some(slot) = self.map.get_mut(&key) {
            slot.value = value;
            self.order.move_to_front(slot.node);
            return Insertion::Updated;
        }

        let evicted = if self.map.len() >= self.capacity {
            self.evict().is_some()
        } else {
            false
        };

        let node = self.order.push_front(key.clone());
        self.map.insert(key, Slot { value, node });
        debug_assert_eq!(self.map.len(), self.order.len());

        if evicted {
            Insertion::Evicted
        } else {
            Insertion::Inserted
        }
    }

    pub(crate) fn contains_key(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub(crate) fn keys(&self) -> KeySet<K> {
        let mut keys = HashSet::with_capacity_and_hasher(self.map.len(), RandomState::new());
        keys.extend(self.map.keys().cloned());
        keys
    }

    pub(crate) fn values(&self) -> ValueMap<K, V>
    where
        V: Clone,
    {
        let mut values = HashMap::with_capacity_and_hasher(self.map.len(), RandomState::new());
        values.extend(
            self.map
                .iter()
                .map(|(key, slot)| (key.clone(), slot.value.clone())),
        );
        values
    }

    /// Keys from most to least recently used
    pub(crate) fn keys_by_recency(&self) -> Vec<K> {
        self.order.iter().cloned().collect()
    }

    /// Drop the least recently used entry from both the list and the store
    fn evict(&mut self) -> Option<(K, V)> {
        let key = self.order.pop_back()?;
        let slot = self.map.remove(&key)?;
        Some((key, slot.value))
    }

    #[cfg(test)]
    fn assert_consistent(&self) {
        assert_eq!(self.map.len(), self.order.len());
        assert!(self.map.len() <= self.capacity);
        for key in self.order.iter() {
            assert!(self.map.contains_key(key));
        }
        if let Some(tail) = self.order.back() {
            assert!(self.map.contains_key(tail));
        }
    }
}
