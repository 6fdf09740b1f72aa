//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

use crate::error::{CacheError, Result};

// == Cache Entry ==
/// A single cache record: key, value and expiry deadline.
///
/// Ordering links live on the arena node that owns the entry, see
/// [`OrderList`](super::OrderList).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K, V> {
    /// The key this entry is indexed under
    pub key: K,
    /// The stored value
    pub value: V,
    /// Absolute expiry deadline, None = deadline overflowed, never expires
    pub expires_at: Option<Instant>,
}

impl<K, V> Entry<K, V> {
    // == Constructor ==
    /// Creates an entry that expires `ttl` after `now`.
    pub fn new(key: K, value: V, now: Instant, ttl: Duration) -> Self {
        Self {
            key,
            value,
            expires_at: deadline(now, ttl),
        }
    }

    // == Refresh ==
    /// Replaces the value and restarts the TTL from `now`.
    pub fn refresh(&mut self, value: V, now: Instant, ttl: Duration) {
        self.value = value;
        self.expires_at = deadline(now, ttl);
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// Boundary condition: an entry is expired once `now >= expires_at`, so
    /// a zero TTL is expired as soon as it is stored.
    pub fn is_expired(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires) => now >= expires,
            None => false,
        }
    }
}

// == Utility Functions ==
/// Computes `now + ttl`, saturating to "never" when the instant overflows.
pub fn deadline(now: Instant, ttl: Duration) -> Option<Instant> {
    now.checked_add(ttl)
}

/// Converts a signed TTL in seconds into a `Duration`.
///
/// Negative values are a usage fault; zero is valid and means the entry
/// expires immediately.
pub fn ttl_from_secs(secs: i64) -> Result<Duration> {
    u64::try_from(secs)
        .map(Duration::from_secs)
        .map_err(|_| CacheError::InvalidTtl(secs))
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_not_expired_before_deadline() {
        let now = Instant::now();
        let entry = Entry::new("k", 1, now, Duration::from_secs(5));

        assert!(!entry.is_expired(now));
        assert!(!entry.is_expired(now + Duration::from_millis(4999)));
        assert!(entry.is_expired(now + Duration::from_secs(6)));
    }

    #[test]
    fn test_expiration_boundary_condition() {
        let now = Instant::now();
        let entry = Entry::new("k", 1, now, Duration::from_secs(1));

        assert!(
            entry.is_expired(now + Duration::from_secs(1)),
            "Entry should be expired at boundary"
        );
    }

    #[test]
    fn test_zero_ttl_expires_immediately() {
        let now = Instant::now();
        let entry = Entry::new("k", 1, now, Duration::ZERO);
        assert!(entry.is_expired(now));
    }

    #[test]
    fn test_overflowing_ttl_saturates_to_never() {
        let now = Instant::now();
        let entry = Entry::new("k", 1, now, Duration::MAX);

        assert!(entry.expires_at.is_none());
        assert!(!entry.is_expired(now + Duration::from_secs(1_000_000)));
    }

    #[test]
    fn test_refresh_updates_value_and_deadline() {
        let now = Instant::now();
        let mut entry = Entry::new("k", 1, now, Duration::from_secs(1));

        let later = now + Duration::from_secs(2);
        assert!(entry.is_expired(later));

        entry.refresh(2, later, Duration::from_secs(5));
        assert_eq!(entry.value, 2);
        assert!(!entry.is_expired(later));
        assert_eq!(entry.expires_at, Some(later + Duration::from_secs(5)));
    }

    #[test]
    fn test_ttl_from_secs() {
        assert_eq!(ttl_from_secs(0), Ok(Duration::ZERO));
        assert_eq!(ttl_from_secs(60), Ok(Duration::from_secs(60)));
        assert_eq!(ttl_from_secs(-1), Err(CacheError::InvalidTtl(-1)));
    }
}
