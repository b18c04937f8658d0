//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::{Duration, Instant};

// == Cache Entry ==
/// A single cache entry: the stored value plus its expiry metadata.
///
/// The cache never inspects or transforms the value; it only tracks when
/// the entry was inserted and when it stops being valid.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored value
    pub(crate) value: V,
    /// Creation time
    pub(crate) inserted_at: Instant,
    /// Absolute expiration instant
    pub(crate) expires_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructors ==
    /// Creates a new cache entry expiring `ttl` from now.
    ///
    /// A `ttl` the platform clock cannot represent (e.g. `Duration::MAX`
    /// as a "cache practically forever" stand-in) saturates to a deadline
    /// roughly 30 years out.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `ttl` - How long the entry stays valid
    pub fn new(value: V, ttl: Duration) -> Self {
        let now = Instant::now();
        // `now + ttl` panics on overflow; cap unrepresentable deadlines
        // about 30 years out
        let expires_at = now
            .checked_add(ttl)
            .unwrap_or_else(|| now + Duration::from_secs(86400 * 365 * 30));
        Self {
            value,
            inserted_at: now,
            expires_at,
        }
    }

    /// Creates a new cache entry with an explicit expiration instant.
    ///
    /// Useful when the expiry boundary must be controlled exactly, e.g. in
    /// tests that pin behavior at the expiration instant itself.
    pub fn with_expiration(value: V, expires_at: Instant) -> Self {
        Self {
            value,
            inserted_at: Instant::now(),
            expires_at,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// Boundary condition: an entry is expired only when the current time is
    /// strictly past the expiration instant. At the exact expiration instant
    /// the entry is still valid.
    ///
    /// # Returns
    /// - `true` if the current time > expiration instant
    /// - `false` otherwise
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Checks expiry against a caller-supplied instant.
    ///
    /// Lets a sweep over many entries share a single clock sample, and lets
    /// tests exercise the boundary with a controlled clock.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now > self.expires_at
    }

    // == Time To Live ==
    /// Returns the remaining TTL, saturating to zero once expired.
    ///
    /// This method is useful for debugging and statistics purposes.
    pub fn remaining_ttl(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }

    // == Accessors ==
    /// Returns a reference to the stored value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Returns the instant the entry was inserted.
    pub fn inserted_at(&self) -> Instant {
        self.inserted_at
    }

    /// Returns the absolute expiration instant.
    pub fn expires_at(&self) -> Instant {
        self.expires_at
    }
}
