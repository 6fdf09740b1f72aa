//! Shared Cache Module
//!
//! Thread-safe handle serializing every operation on a [`CacheStore`].

use std::borrow::Borrow;
use std::hash::Hash;
use std::time::Duration;

use parking_lot::Mutex;

use crate::cache::{CacheStats, CacheStore, Clock, SystemClock};
use crate::error::Result;

// == Cache ==
/// LRU cache with lazy TTL expiration, safe to share across threads.
///
/// A single lock covers the whole body of every call, so operations never
/// interleave. Values are handed out as clones.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use ttl_lru::Cache;
///
/// let cache = Cache::new(2).unwrap();
/// cache.put("a", 1, Duration::from_secs(60));
/// cache.put("b", 2, Duration::from_secs(60));
/// assert_eq!(cache.get(&"a"), Some(1));
///
/// cache.put("c", 3, Duration::from_secs(60));
/// assert_eq!(cache.get(&"b"), None);
/// ```
#[derive(Debug)]
pub struct Cache<K, V, C = SystemClock> {
    inner: Mutex<CacheStore<K, V, C>>,
}

impl<K, V> Cache<K, V, SystemClock>
where
    K: Hash + Eq + Clone,
{
    // == Constructor ==
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// # Errors
    /// `InvalidCapacity` if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        CacheStore::new(capacity).map(Self::from_store)
    }
}

impl<K, V, C> Cache<K, V, C>
where
    K: Hash + Eq + Clone,
    C: Clock,
{
    /// Creates an empty cache that reads time from `clock`.
    pub fn with_clock(capacity: usize, clock: C) -> Result<Self> {
        CacheStore::with_clock(capacity, clock).map(Self::from_store)
    }

    /// Wraps an existing store.
    pub fn from_store(store: CacheStore<K, V, C>) -> Self {
        Self {
            inner: Mutex::new(store),
        }
    }

    // == Get ==
    /// Returns a clone of the live value for `key`, promoting it to most
    /// recently used. Absent and expired keys both return None.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    // == Peek ==
    /// Like [`get`](Self::get) without promotion or statistics.
    pub fn peek<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        self.inner.lock().peek(key).cloned()
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().contains(key)
    }

    // == Put ==
    /// Stores `value` under `key` for `ttl`. See [`CacheStore::put`].
    pub fn put(&self, key: K, value: V, ttl: Duration) {
        self.inner.lock().put(key, value, ttl);
    }

    // == Remove ==
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().remove(key)
    }

    // == Resize ==
    /// Changes the capacity. Zero is rejected and leaves the cache untouched.
    pub fn resize(&self, new_capacity: usize) -> Result<()> {
        self.inner.lock().resize(new_capacity)
    }

    pub fn purge_expired(&self) -> usize {
        self.inner.lock().purge_expired()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    pub fn keys(&self) -> Vec<K> {
        self.inner.lock().keys()
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Runs `f` with the lock held, for callers needing several steps to be
    /// atomic.
    pub fn with_store<R>(&self, f: impl FnOnce(&mut CacheStore<K, V, C>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
