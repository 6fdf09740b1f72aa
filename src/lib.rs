//! ttl_lru - A thread-safe LRU cache with lazy TTL expiration
//!
//! The [`cache`] module is the embeddable core; [`api`] exposes it over HTTP.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{Cache, CacheStats, CacheStore, Clock, ManualClock, SystemClock};
pub use config::Config;
pub use error::{CacheError, Result};
