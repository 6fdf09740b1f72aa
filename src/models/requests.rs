//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies.

use std::time::Duration;

use serde::Deserialize;

use crate::cache::ttl_from_secs;
use crate::error::{CacheError, Result};

/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB

/// Request body for the SET operation (PUT /set)
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: The value to store
/// - `ttl`: Optional TTL in seconds (uses the server default if not specified)
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cache key
    pub key: String,
    /// The value to store
    pub value: String,
    /// Optional TTL in seconds; signed so negative input reaches validation
    #[serde(default)]
    pub ttl: Option<i64>,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.key.is_empty() {
            return Some("Key cannot be empty".to_string());
        }
        if self.key.len() > MAX_KEY_LENGTH {
            return Some(format!(
                "Key exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            ));
        }
        if self.value.len() > MAX_VALUE_SIZE {
            return Some(format!(
                "Value exceeds maximum size of {} bytes",
                MAX_VALUE_SIZE
            ));
        }
        None
    }

    /// Resolves the TTL to apply, falling back to `default`.
    ///
    /// # Errors
    /// `InvalidTtl` for a negative `ttl`.
    pub fn ttl_or(&self, default: Duration) -> Result<Duration> {
        self.ttl.map_or(Ok(default), ttl_from_secs)
    }
}

/// Request body for PUT /resize
#[derive(Debug, Clone, Deserialize)]
pub struct ResizeRequest {
    /// New capacity; must be positive
    pub capacity: i64,
}

impl ResizeRequest {
    /// Converts the requested capacity into a `usize`.
    ///
    /// # Errors
    /// `InvalidCapacity` for zero or negative values.
    pub fn capacity(&self) -> Result<usize> {
        usize::try_from(self.capacity)
            .ok()
            .filter(|&capacity| capacity > 0)
            .ok_or(CacheError::InvalidCapacity(self.capacity))
    }
}
