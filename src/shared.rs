//! Shared Cache Handle
//!
//! Thread-safe async wrapper around the single-threaded cache core.

use std::borrow::Borrow;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;

use crate::cache::{CacheStats, TtlCache};
use crate::config::CacheConfig;

// == Shared Cache ==
/// Cloneable handle to a [`TtlCache`] shared across tasks.
///
/// The cache core assumes exclusive access, so concurrent hosts must
/// serialize every operation; this handle wraps the core in
/// `Arc<RwLock<_>>` and is the intended way to share one cache between
/// tasks. Clones are cheap and all point at the same mapping.
///
/// Lookups acquire the write lock: reading an expired entry removes it
/// and updates statistics, so even [`get`](SharedCache::get) mutates.
pub struct SharedCache<K, V> {
    /// Thread-safe cache core
    inner: Arc<RwLock<TtlCache<K, V>>>,
}

impl<K, V> Clone for SharedCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> SharedCache<K, V>
where
    K: Eq + Hash,
{
    // == Constructors ==
    /// Creates a new shared cache with the given default TTL.
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(TtlCache::new(default_ttl))),
        }
    }

    /// Creates a new shared cache from configuration.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.default_ttl)
    }

    // == Core Operations ==
    /// Stores a key-value pair with the default TTL.
    pub async fn set(&self, key: K, value: V) {
        let mut cache = self.inner.write().await;
        cache.set(key, value);
    }

    /// Stores a key-value pair with an explicit TTL.
    pub async fn set_with_ttl(&self, key: K, value: V, ttl: Duration) {
        let mut cache = self.inner.write().await;
        cache.set_with_ttl(key, value, ttl);
    }

    /// Retrieves a clone of the value for the key, if present and live.
    pub async fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: Clone,
    {
        // Write lock: the lookup may delete an expired entry
        let mut cache = self.inner.write().await;
        cache.get(key).cloned()
    }

    /// Checks whether a live entry exists for the key.
    pub async fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut cache = self.inner.write().await;
        cache.contains_key(key)
    }

    /// Removes the entry for the key, returning whether one was present.
    pub async fn delete<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut cache = self.inner.write().await;
        cache.delete(key)
    }

    /// Removes all entries.
    pub async fn clear(&self) {
        let mut cache = self.inner.write().await;
        cache.clear();
    }

    /// Removes all expired entries, returning the removed count.
    pub async fn cleanup_expired(&self) -> usize {
        let mut cache = self.inner.write().await;
        cache.cleanup_expired()
    }

    // == Inspection ==
    /// Returns the raw entry count, expired-but-unswept entries included.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Returns the count of entries that have not expired.
    pub async fn live_len(&self) -> usize {
        self.inner.read().await.live_len()
    }

    /// Returns true if the cache holds no entries at all.
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Returns the TTL applied by [`set`](SharedCache::set).
    pub async fn default_ttl(&self) -> Duration {
        self.inner.read().await.default_ttl()
    }

    /// Returns a snapshot of the cache statistics.
    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats()
    }

    // == Memoization ==
    /// Returns the cached value for the key, computing and storing it on a
    /// miss.
    ///
    /// `init` runs without the cache lock held, so a slow computation never
    /// stalls other cache users. The flip side is that concurrent callers
    /// missing on the same key each run their own `init`; whichever
    /// finishes last owns the slot. The stored entry uses the default TTL.
    pub async fn get_or_insert_with<F, Fut>(&self, key: K, init: F) -> V
    where
        V: Clone,
        F: FnOnce() -> Fut,
        Fut: Future<Output = V>,
    {
        if let Some(value) = self.get(&key).await {
            return value;
        }

        let value = init().await;
        self.set(key, value.clone()).await;
        value
    }

    /// Like [`get_or_insert_with`](SharedCache::get_or_insert_with), but a
    /// freshly computed value is stored with an explicit TTL.
    pub async fn get_or_insert_with_ttl<F, Fut>(&self, key: K, ttl: Duration, init: F) -> V
    where
        V: Clone,
        F: FnOnce() -> Fut,
        Fut: Future<Output = V>,
    {
        if let Some(value) = self.get(&key).await {
            return value;
        }

        let value = init().await;
        self.set_with_ttl(key, value.clone(), ttl).await;
        value
    }

    /// Fallible variant of
    /// [`get_or_insert_with`](SharedCache::get_or_insert_with).
    ///
    /// A failed computation is propagated untouched and nothing is stored,
    /// so the next lookup retries.
    pub async fn try_get_or_insert_with<F, Fut, E>(&self, key: K, init: F) -> Result<V, E>
    where
        V: Clone,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(&key).await {
            return Ok(value);
        }

        let value = init().await?;
        self.set(key, value.clone()).await;
        Ok(value)
    }
}
