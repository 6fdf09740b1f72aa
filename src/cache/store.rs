//! Cache Store Module
//!
//! Main cache engine combining the key index with the recency list, LRU
//! eviction and lazy TTL expiration.

use std::borrow::Borrow;
use std::hash::Hash;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::cache::{CacheStats, Clock, Entry, EntryId, Index, OrderList, SystemClock};
use crate::error::{CacheError, Result};

/// Upper bound on slots reserved at construction; capacity is a ceiling,
/// storage grows on demand beyond this.
const MAX_PREALLOCATED: usize = 1024;

// == Cache Store ==
/// Single-threaded cache engine. Wrap it in [`Cache`](super::Cache) to share
/// it between threads.
///
/// Expiry is pull-based: nothing runs in the background. Expired entries are
/// dropped when read, when a sweep from the LRU end reaches them, or by
/// [`purge_expired`](Self::purge_expired).
#[derive(Debug)]
pub struct CacheStore<K, V, C = SystemClock> {
    /// Key -> entry handle
    index: Index<K>,
    /// Entries ordered most to least recently used
    list: OrderList<K, V>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of live entries
    capacity: usize,
    clock: C,
}

impl<K, V> CacheStore<K, V, SystemClock>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates an empty store holding at most `capacity` entries.
    ///
    /// # Errors
    /// `InvalidCapacity` if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_clock(capacity, SystemClock)
    }
}

impl<K, V, C> CacheStore<K, V, C>
where
    K: Hash + Eq + Clone,
    C: Clock,
{
    /// Creates an empty store that reads time from `clock`.
    pub fn with_clock(capacity: usize, clock: C) -> Result<Self> {
        validate_capacity(capacity)?;
        let reserved = capacity.min(MAX_PREALLOCATED);
        Ok(Self {
            index: Index::with_capacity(reserved),
            list: OrderList::with_capacity(reserved),
            stats: CacheStats::new(),
            capacity,
            clock,
        })
    }

    // == Get ==
    /// Retrieves a value by key and marks it most recently used.
    ///
    /// Returns None for absent and expired keys alike. An expired entry is
    /// removed on the way out.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(id) = self.index.get(key) else {
            self.stats.record_miss();
            return None;
        };

        let now = self.clock.now();
        if self.list.get(id).is_some_and(|entry| entry.is_expired(now)) {
            self.expire(id);
            self.stats.record_miss();
            return None;
        }

        self.list.promote(id);
        self.stats.record_hit();
        self.list.get(id).map(|entry| &entry.value)
    }

    // == Peek ==
    /// Reads a live value without touching recency or statistics.
    pub fn peek<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let now = self.clock.now();
        self.index
            .get(key)
            .and_then(|id| self.list.get(id))
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| &entry.value)
    }

    /// Returns true if `key` maps to a live entry. Does not promote.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.peek(key).is_some()
    }

    // == Put ==
    /// Stores `value` under `key`, expiring `ttl` from now.
    ///
    /// An existing key keeps its slot: value and deadline are replaced and
    /// the entry becomes most recently used. A zero `ttl` stores an entry
    /// that is already expired. After the write, expired entries at the LRU
    /// end are swept, then LRU entries are evicted until the store fits its
    /// capacity.
    pub fn put(&mut self, key: K, value: V, ttl: Duration) {
        let now = self.clock.now();

        match self.index.get(&key) {
            Some(id) => {
                if let Some(entry) = self.list.get_mut(id) {
                    entry.refresh(value, now, ttl);
                }
                self.list.promote(id);
            }
            None => {
                let id = self.list.insert(Entry::new(key.clone(), value, now, ttl));
                self.index.set(key, id);
            }
        }

        self.sweep_expired(now);
        self.evict_to_capacity();
    }

    // == Remove ==
    /// Removes `key`, returning its value if it was live.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let id = self.index.remove(key)?;
        let entry = self.list.remove(id)?;
        if entry.is_expired(self.clock.now()) {
            self.stats.record_expiration();
            return None;
        }
        Some(entry.value)
    }

    // == Resize ==
    /// Changes the capacity, evicting synchronously when shrinking.
    ///
    /// # Errors
    /// `InvalidCapacity` if `new_capacity` is zero; the store is untouched.
    pub fn resize(&mut self, new_capacity: usize) -> Result<()> {
        validate_capacity(new_capacity)?;

        let old_capacity = self.capacity;
        self.capacity = new_capacity;
        let now = self.clock.now();
        self.sweep_expired(now);
        self.evict_to_capacity();

        debug!(
            old_capacity,
            new_capacity,
            entries = self.list.len(),
            "Cache resized"
        );
        Ok(())
    }

    // == Purge Expired ==
    /// Removes every expired entry, not just those at the LRU end.
    ///
    /// Returns the number of entries removed. O(n) in the number of entries.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now();
        let expired: Vec<EntryId> = self
            .list
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(id, _)| id)
            .collect();

        let count = expired.len();
        for id in expired {
            self.expire(id);
        }

        if count > 0 {
            debug!(count, "Purged expired entries");
        }
        count
    }

    // == Clear ==
    /// Drops every entry. Statistics counters are kept.
    pub fn clear(&mut self) {
        self.index.clear();
        self.list.clear();
    }

    // == Keys ==
    /// Snapshot of stored keys from most to least recently used.
    ///
    /// May include expired entries nobody has touched yet.
    pub fn keys(&self) -> Vec<K> {
        self.list
            .iter()
            .map(|(_, entry)| entry.key.clone())
            .collect()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.total_entries = self.list.len();
        stats.capacity = self.capacity;
        stats
    }

    /// Number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Expired-Entry Sweep ==
    /// Drops expired entries from the LRU end, stopping at the first live one.
    ///
    /// Expired entries closer to the MRU end survive until `get` or a later
    /// sweep reaches them.
    fn sweep_expired(&mut self, now: Instant) {
        let mut swept = 0usize;
        while let Some(id) = self.list.least_recent() {
            match self.list.get(id) {
                Some(entry) if entry.is_expired(now) => {
                    self.expire(id);
                    swept += 1;
                }
                _ => break,
            }
        }
        if swept > 0 {
            debug!(swept, "Swept expired entries from LRU end");
        }
    }

    // == Capacity Eviction ==
    fn evict_to_capacity(&mut self) {
        let mut evicted = 0usize;
        while self.list.len() > self.capacity {
            let Some(id) = self.list.least_recent() else {
                break;
            };
            if let Some(entry) = self.list.remove(id) {
                self.index.remove(&entry.key);
                self.stats.record_eviction();
                evicted += 1;
            }
        }
        if evicted > 0 {
            debug!(
                evicted,
                capacity = self.capacity,
                "Evicted least recently used entries"
            );
        }
    }

    fn expire(&mut self, id: EntryId) {
        if let Some(entry) = self.list.remove(id) {
            self.index.remove(&entry.key);
            self.stats.record_expiration();
            trace!("Entry expired");
        }
    }

    /// Verifies list links, index lock-step and the capacity bound.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) -> std::result::Result<(), String> {
        self.list.check_links()?;
        if self.index.len() != self.list.len() {
            return Err(format!(
                "index holds {} keys, list holds {} entries",
                self.index.len(),
                self.list.len()
            ));
        }
        for (id, entry) in self.list.iter() {
            if self.index.get(&entry.key) != Some(id) {
                return Err("index does not point at a linked entry".to_string());
            }
        }
        if self.list.len() > self.capacity {
            return Err(format!(
                "{} entries exceed capacity {}",
                self.list.len(),
                self.capacity
            ));
        }
        Ok(())
    }
}

fn validate_capacity(capacity: usize) -> Result<()> {
    if capacity == 0 {
        return Err(CacheError::InvalidCapacity(0));
    }
    Ok(())
}
