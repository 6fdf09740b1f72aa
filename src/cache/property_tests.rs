//! Property-Based Tests for Cache Module
//!
//! Uses proptest with a manual clock so TTL behaviour is deterministic.

use proptest::prelude::*;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use crate::cache::{CacheStore, ManualClock};

// == Test Configuration ==
const LONG_TTL: Duration = Duration::from_secs(3600);

fn new_store(capacity: usize) -> (CacheStore<u8, u32, ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let store = CacheStore::with_clock(capacity, clock.clone()).unwrap();
    (store, clock)
}

// == Strategies ==
#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: u8, value: u32 },
    Get { key: u8 },
    Remove { key: u8 },
    Resize { capacity: usize },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => (0u8..24, any::<u32>()).prop_map(|(key, value)| CacheOp::Put { key, value }),
        3 => (0u8..24).prop_map(|key| CacheOp::Get { key }),
        1 => (0u8..24).prop_map(|key| CacheOp::Remove { key }),
        1 => (1usize..12).prop_map(|capacity| CacheOp::Resize { capacity }),
    ]
}

#[derive(Debug, Clone)]
enum TimedOp {
    Put { key: u8, value: u32, ttl_ms: u64 },
    Get { key: u8 },
    Resize { capacity: usize },
    Advance { ms: u64 },
}

fn timed_op_strategy() -> impl Strategy<Value = TimedOp> {
    prop_oneof![
        4 => (0u8..16, any::<u32>(), 0u64..2000)
            .prop_map(|(key, value, ttl_ms)| TimedOp::Put { key, value, ttl_ms }),
        4 => (0u8..16).prop_map(|key| TimedOp::Get { key }),
        1 => (1usize..10).prop_map(|capacity| TimedOp::Resize { capacity }),
        2 => (0u64..1500).prop_map(|ms| TimedOp::Advance { ms }),
    ]
}

// == Reference Model ==
/// Plain LRU list, front = most recently used.
struct LruModel {
    order: VecDeque<(u8, u32)>,
    capacity: usize,
}

impl LruModel {
    fn new(capacity: usize) -> Self {
        Self {
            order: VecDeque::new(),
            capacity,
        }
    }

    fn take(&mut self, key: u8) -> Option<(u8, u32)> {
        let pos = self.order.iter().position(|(k, _)| *k == key)?;
        self.order.remove(pos)
    }

    fn get(&mut self, key: u8) -> Option<u32> {
        let item = self.take(key)?;
        self.order.push_front(item);
        Some(item.1)
    }

    fn put(&mut self, key: u8, value: u32) {
        self.take(key);
        self.order.push_front((key, value));
        self.order.truncate(self.capacity);
    }

    fn resize(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.order.truncate(capacity);
    }

    fn keys(&self) -> Vec<u8> {
        self.order.iter().map(|(k, _)| *k).collect()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Without expiry the store must behave exactly like a textbook LRU list.
    #[test]
    fn prop_matches_lru_model(
        capacity in 1usize..10,
        ops in prop::collection::vec(cache_op_strategy(), 1..200)
    ) {
        let (mut store, _) = new_store(capacity);
        let mut model = LruModel::new(capacity);

        for op in ops {
            match op {
                CacheOp::Put { key, value } => {
                    store.put(key, value, LONG_TTL);
                    model.put(key, value);
                }
                CacheOp::Get { key } => {
                    prop_assert_eq!(store.get(&key).copied(), model.get(key));
                }
                CacheOp::Remove { key } => {
                    prop_assert_eq!(store.remove(&key), model.take(key).map(|(_, v)| v));
                }
                CacheOp::Resize { capacity } => {
                    store.resize(capacity).unwrap();
                    model.resize(capacity);
                }
            }
            prop_assert_eq!(store.keys(), model.keys());
            prop_assert!(store.check_invariants().is_ok(), "{:?}", store.check_invariants());
        }
    }

    // Occupancy never exceeds capacity and the index/list pair stays consistent
    // whatever mix of puts, reads, resizes and clock movement happens.
    #[test]
    fn prop_capacity_and_structure_hold_with_expiry(
        capacity in 1usize..8,
        ops in prop::collection::vec(timed_op_strategy(), 1..200)
    ) {
        let (mut store, clock) = new_store(capacity);

        for op in ops {
            match op {
                TimedOp::Put { key, value, ttl_ms } => {
                    store.put(key, value, Duration::from_millis(ttl_ms));
                }
                TimedOp::Get { key } => {
                    let _ = store.get(&key);
                }
                TimedOp::Resize { capacity } => {
                    store.resize(capacity).unwrap();
                }
                TimedOp::Advance { ms } => clock.advance(Duration::from_millis(ms)),
            }
            prop_assert!(store.len() <= store.capacity());
            prop_assert!(store.check_invariants().is_ok(), "{:?}", store.check_invariants());
        }
    }

    // A hit always returns the latest value written and only before its
    // deadline.
    #[test]
    fn prop_expired_values_never_returned(
        ops in prop::collection::vec(timed_op_strategy(), 1..200)
    ) {
        let (mut store, clock) = new_store(8);
        let mut written: HashMap<u8, (u32, Duration)> = HashMap::new();

        for op in ops {
            match op {
                TimedOp::Put { key, value, ttl_ms } => {
                    store.put(key, value, Duration::from_millis(ttl_ms));
                    written.insert(key, (value, clock.elapsed() + Duration::from_millis(ttl_ms)));
                }
                TimedOp::Get { key } => {
                    if let Some(value) = store.get(&key).copied() {
                        let (expected, deadline) = written[&key];
                        prop_assert_eq!(value, expected);
                        prop_assert!(clock.elapsed() < deadline, "expired value returned");
                    }
                }
                TimedOp::Resize { capacity } => {
                    store.resize(capacity).unwrap();
                }
                TimedOp::Advance { ms } => clock.advance(Duration::from_millis(ms)),
            }
        }
    }

    #[test]
    fn prop_roundtrip_within_ttl(
        key in any::<u8>(),
        value in any::<u32>(),
        ttl_ms in 1u64..10_000,
    ) {
        let (mut store, clock) = new_store(4);
        store.put(key, value, Duration::from_millis(ttl_ms));
        clock.advance(Duration::from_millis(ttl_ms - 1));
        prop_assert_eq!(store.get(&key), Some(&value));
    }

    // Rewriting a key makes it most recent, so filling the rest of the cache
    // evicts everything else first.
    #[test]
    fn prop_update_promotes(capacity in 2usize..10, pick in any::<prop::sample::Index>()) {
        let (mut store, _) = new_store(capacity);
        for key in 0..capacity as u8 {
            store.put(key, 0, LONG_TTL);
        }
        let touched = pick.index(capacity) as u8;
        store.put(touched, 99, LONG_TTL);

        for key in 100..100 + (capacity as u8 - 1) {
            store.put(key, 1, LONG_TTL);
        }
        prop_assert_eq!(store.get(&touched), Some(&99));
        prop_assert_eq!(store.len(), capacity);
    }
}
