//! Cache Module
//!
//! Fixed-capacity key/value cache with LRU eviction and lazy TTL expiration.
//!
//! - [`Entry`]: key, value and expiry deadline
//! - [`OrderList`]: arena-backed recency list between head/tail sentinels
//! - [`Index`]: key -> [`EntryId`] lookup mirrored against the list
//! - [`CacheStore`]: the engine (get/put/resize, sweep, eviction)
//! - [`Cache`]: the store behind a single lock

mod clock;
mod entry;
mod index;
mod list;
mod shared;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{deadline, ttl_from_secs, Entry};
pub use index::Index;
pub use list::{EntryId, Iter, OrderList};
pub use shared::Cache;
pub use stats::CacheStats;
pub use store::CacheStore;
