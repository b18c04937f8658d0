//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with TTL expiration.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

use crate::cache::{CacheEntry, CacheStats};

// == TTL Cache ==
/// In-memory key-value cache where every entry expires after a TTL.
///
/// Expired entries are treated as absent: a lookup that finds one removes
/// it on the spot (lazy eviction). Entries that are never looked up again
/// stay in the map until [`cleanup_expired`](TtlCache::cleanup_expired)
/// runs, so [`len`](TtlCache::len) may count entries that are already dead.
///
/// There is no capacity bound and no eviction policy beyond TTL; between
/// sweeps the cache grows with its key space.
///
/// The cache itself is not thread-safe. A multi-threaded host must wrap it
/// in explicit mutual exclusion; [`SharedCache`](crate::SharedCache) is
/// that wrapper.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// Fallback TTL for entries stored without an explicit TTL
    default_ttl: Duration,
    /// Performance statistics
    stats: CacheStats,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
{
    // == Constructor ==
    /// Creates an empty cache with the given default TTL.
    ///
    /// The default TTL applies to every [`set`](TtlCache::set); any
    /// duration is accepted. Zero makes entries expire as soon as any
    /// time has passed, and a TTL past what the clock can represent
    /// saturates to a deadline roughly 30 years out.
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            default_ttl,
            stats: CacheStats::new(),
        }
    }

    // == Set ==
    /// Stores a key-value pair with the default TTL.
    ///
    /// If the key already exists, both the value and the expiration are
    /// replaced; the entry's lifetime restarts from now.
    pub fn set(&mut self, key: K, value: V) {
        self.set_with_ttl(key, value, self.default_ttl);
    }

    /// Stores a key-value pair with an explicit TTL.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl` - How long the entry stays valid, overriding the default
    pub fn set_with_ttl(&mut self, key: K, value: V, ttl: Duration) {
        self.entries.insert(key, CacheEntry::new(value, ttl));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns the value if the key is present and not expired. An expired
    /// entry is removed as a side effect and reported as a miss, exactly
    /// as if the key had never been stored.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            // Lazy eviction: reading a dead entry deletes it
            self.entries.remove(key);
            self.stats.record_expiration();
            self.stats.record_miss();
            self.stats.set_total_entries(self.entries.len());
            return None;
        }

        self.stats.record_hit();
        self.entries.get(key).map(|entry| &entry.value)
    }

    // == Contains Key ==
    /// Checks whether a live entry exists for the key.
    ///
    /// Applies the same expiry check and lazy eviction as
    /// [`get`](TtlCache::get), but as a presence check it does not count
    /// toward hits or misses.
    pub fn contains_key<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(),
            None => return false,
        };

        if expired {
            self.entries.remove(key);
            self.stats.record_expiration();
            self.stats.set_total_entries(self.entries.len());
            return false;
        }

        true
    }

    // == Delete ==
    /// Removes an entry by key.
    ///
    /// Returns `true` if a mapping was present, whether or not it had
    /// already expired; deleting an absent key is a no-op returning
    /// `false`.
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }

    // == Clear ==
    /// Removes all entries, live and expired alike.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats.set_total_entries(0);
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// The whole sweep compares against a single clock sample, so entries
    /// expiring mid-sweep are left for the next run. Returns the number of
    /// entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));

        let removed = before - self.entries.len();
        self.stats.record_expirations(removed as u64);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Length ==
    /// Returns the raw number of entries in the cache.
    ///
    /// This is the map's size, which may include expired entries that no
    /// lookup or sweep has removed yet. Use
    /// [`live_len`](TtlCache::live_len) for the count of entries that are
    /// actually still valid.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the number of entries that have not expired.
    ///
    /// Counts against a single clock sample and removes nothing.
    pub fn live_len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .values()
            .filter(|entry| !entry.is_expired_at(now))
            .count()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Default TTL ==
    /// Returns the TTL applied by [`set`](TtlCache::set).
    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }
}
