//! Key Index Module
//!
//! O(1) key -> entry handle lookup, kept in lock-step with the recency list.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use ahash::RandomState;

use super::list::EntryId;

// == Index ==
/// Maps keys to handles of entries owned by the [`OrderList`](super::OrderList).
///
/// Holds no ordering information and never owns an entry.
#[derive(Debug)]
pub struct Index<K> {
    map: HashMap<K, EntryId, RandomState>,
}

impl<K: Hash + Eq> Index<K> {
    // == Constructor ==
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<EntryId>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(key).copied()
    }

    /// Points `key` at `id`, returning the previous handle if any.
    pub fn set(&mut self, key: K, id: EntryId) -> Option<EntryId> {
        self.map.insert(key, id)
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<EntryId>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.remove(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }
}
