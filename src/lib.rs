//! # memocache
//!
//! An in-process TTL cache for memoizing idempotent computations.
//!
//! Every entry carries an absolute expiry instant: a value stored at time
//! `t` with TTL `d` is served until `t + d` and treated as absent
//! afterwards. Dead entries are reclaimed lazily when a lookup touches
//! them, and in bulk by an optional background sweep task.
//!
//! ## Features
//!
//! - **TTL on every entry**: a per-cache default, overridable per store
//! - **Lazy eviction**: looking up a dead entry removes it on the spot
//! - **Background sweep**: a cancellable task reclaims entries nobody
//!   touches anymore
//! - **Generic**: any `Eq + Hash` key, any value type
//! - **Async sharing**: a cloneable handle for multi-task hosts, with
//!   memoization helpers
//!
//! ## Quick Start
//!
//! ```rust
//! use memocache::{spawn_cleanup_task, CacheConfig, SharedCache};
//!
//! # tokio_test::block_on(async {
//! let config = CacheConfig::default();
//! let cache: SharedCache<String, String> = SharedCache::from_config(&config);
//!
//! // The owner starts the sweep once and cancels it at teardown by
//! // dropping the returned handle.
//! let cleanup = spawn_cleanup_task(cache.clone(), config.cleanup_interval);
//!
//! cache.set("user:42".to_string(), "alice".to_string()).await;
//! assert_eq!(cache.get("user:42").await, Some("alice".to_string()));
//!
//! // Memoize a computation under a key: runs at most once per live entry
//! let profile = cache
//!     .get_or_insert_with("user:7".to_string(), || async {
//!         "fetched".to_string()
//!     })
//!     .await;
//! assert_eq!(profile, "fetched");
//!
//! drop(cleanup);
//! # });
//! ```
//!
//! ## Single-threaded use
//!
//! The core [`TtlCache`] needs no runtime and no locking; it assumes one
//! caller at a time and is what [`SharedCache`] wraps for concurrent
//! hosts.
//!
//! ```rust
//! use memocache::TtlCache;
//! use std::time::Duration;
//!
//! let mut cache = TtlCache::new(Duration::from_secs(300));
//! cache.set("answer", 42u32);
//! assert_eq!(cache.get("answer"), Some(&42));
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod shared;
pub mod tasks;

pub use cache::{CacheEntry, CacheStats, TtlCache};
pub use config::CacheConfig;
pub use error::ConfigError;
pub use shared::SharedCache;
pub use tasks::{spawn_cleanup_task, CleanupTask};
