//! Integration Tests for the Cache
//!
//! Exercises the public API end to end: the single-threaded core, the
//! shared handle, the memoization helpers and the background sweep.

use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use memocache::{spawn_cleanup_task, CacheConfig, SharedCache, TtlCache};

// == Helper Functions ==

/// Installs a test subscriber so sweep-task logs show up with
/// `cargo test -- --nocapture`. Safe to call from every test.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("memocache=debug")
        .with_test_writer()
        .try_init();
}

fn shared_cache(default_ttl: Duration) -> SharedCache<String, String> {
    SharedCache::new(default_ttl)
}

// == Full Workflow Tests ==

#[tokio::test]
async fn test_full_cache_workflow() -> Result<()> {
    let cache = shared_cache(Duration::from_secs(300));

    // Store and read back
    cache.set("user:1".to_string(), "alice".to_string()).await;
    cache.set("user:2".to_string(), "bob".to_string()).await;
    assert_eq!(cache.get("user:1").await, Some("alice".to_string()));
    assert!(cache.contains_key("user:2").await);
    assert_eq!(cache.len().await, 2);

    // Overwrite keeps a single entry
    cache.set("user:1".to_string(), "alice-v2".to_string()).await;
    assert_eq!(cache.get("user:1").await, Some("alice-v2".to_string()));
    assert_eq!(cache.len().await, 2);

    // Delete and clear
    assert!(cache.delete("user:1").await);
    assert!(!cache.delete("user:1").await);
    cache.clear().await;
    assert!(cache.is_empty().await);

    // Counters survived the workflow
    let stats = cache.stats().await;
    assert_eq!(stats.hits, 2);
    assert_eq!(stats.misses, 0);
    assert_eq!(stats.total_entries, 0);

    Ok(())
}

#[test]
fn test_single_threaded_core_workflow() {
    let mut cache = TtlCache::new(Duration::from_secs(300));

    cache.set("config".to_string(), 1u32);
    cache.set_with_ttl("session".to_string(), 2u32, Duration::from_secs(60));

    assert_eq!(cache.get("config"), Some(&1));
    assert!(cache.contains_key("session"));
    assert_eq!(cache.len(), 2);

    assert!(cache.delete("config"));
    cache.clear();
    assert!(cache.is_empty());
}

// == TTL Expiration Tests ==

#[tokio::test]
async fn test_entry_expires_after_default_ttl() {
    // Default TTL of one second; "user:42" is stored at t=0, still served
    // around t=500ms, and gone around t=1500ms
    let cache = shared_cache(Duration::from_millis(1000));

    cache.set("user:42".to_string(), "profile".to_string()).await;

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(cache.get("user:42").await, Some("profile".to_string()));

    tokio::time::sleep(Duration::from_millis(1000)).await;
    assert_eq!(cache.get("user:42").await, None);

    // The failed lookup evicted the entry as a side effect
    assert_eq!(cache.len().await, 0);
}

#[tokio::test]
async fn test_presence_check_also_evicts_lazily() {
    let cache = shared_cache(Duration::from_secs(300));

    cache
        .set_with_ttl("token".to_string(), "abc".to_string(), Duration::from_millis(40))
        .await;

    tokio::time::sleep(Duration::from_millis(80)).await;

    assert!(!cache.contains_key("token").await);
    assert_eq!(cache.len().await, 0);
}

#[tokio::test]
async fn test_raw_len_vs_live_len() {
    let cache = shared_cache(Duration::from_secs(300));

    cache
        .set_with_ttl("short".to_string(), "a".to_string(), Duration::from_millis(40))
        .await;
    cache
        .set_with_ttl("long".to_string(), "b".to_string(), Duration::from_secs(60))
        .await;

    tokio::time::sleep(Duration::from_millis(80)).await;

    // Nothing has touched "short", so the raw count still includes it
    assert_eq!(cache.len().await, 2);
    assert_eq!(cache.live_len().await, 1);

    assert_eq!(cache.cleanup_expired().await, 1);
    assert_eq!(cache.len().await, 1);
}

// == Background Sweep Tests ==

#[tokio::test]
async fn test_sweep_reclaims_entries_nobody_reads() {
    init_tracing();

    let config = CacheConfig {
        default_ttl: Duration::from_millis(40),
        cleanup_interval: Duration::from_millis(50),
    };
    let cache: SharedCache<String, String> = SharedCache::from_config(&config);

    cache.set("orphan:1".to_string(), "a".to_string()).await;
    cache.set("orphan:2".to_string(), "b".to_string()).await;

    let cleanup = spawn_cleanup_task(cache.clone(), config.cleanup_interval);

    // No lookups happen; only the sweep can reclaim the entries
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert_eq!(cache.len().await, 0);
    let stats = cache.stats().await;
    assert_eq!(stats.expirations, 2);

    cleanup.abort();
}

#[tokio::test]
async fn test_sweep_stops_at_owner_teardown() {
    init_tracing();

    let cache = shared_cache(Duration::from_millis(30));
    cache.set("leftover".to_string(), "x".to_string()).await;

    let cleanup = spawn_cleanup_task(cache.clone(), Duration::from_millis(40));
    drop(cleanup);

    tokio::time::sleep(Duration::from_millis(120)).await;

    // The cancelled sweep never ran; the dead entry is still in the map
    assert_eq!(cache.len().await, 1);
    assert_eq!(cache.live_len().await, 0);
}

// == Memoization Tests ==

#[tokio::test]
async fn test_memoized_fetch_flow() -> Result<()> {
    let cache = shared_cache(Duration::from_secs(300));

    // First call computes, second call is served from the cache
    let first = cache
        .get_or_insert_with("report:2026".to_string(), || async {
            "rendered-report".to_string()
        })
        .await;
    let second = cache
        .get_or_insert_with("report:2026".to_string(), || async {
            "should-not-run".to_string()
        })
        .await;

    assert_eq!(first, "rendered-report");
    assert_eq!(second, "rendered-report");

    let stats = cache.stats().await;
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 1);

    Ok(())
}

#[tokio::test]
async fn test_memoization_recomputes_after_expiry() {
    let cache = shared_cache(Duration::from_secs(300));

    let first = cache
        .get_or_insert_with_ttl("quote".to_string(), Duration::from_millis(40), || async {
            "v1".to_string()
        })
        .await;

    tokio::time::sleep(Duration::from_millis(80)).await;

    let second = cache
        .get_or_insert_with_ttl("quote".to_string(), Duration::from_millis(40), || async {
            "v2".to_string()
        })
        .await;

    assert_eq!(first, "v1");
    assert_eq!(second, "v2");
}

#[tokio::test]
async fn test_failed_fetch_is_not_cached() {
    let cache = shared_cache(Duration::from_secs(300));

    let failed: Result<String> = cache
        .try_get_or_insert_with("flaky".to_string(), || async {
            Err(anyhow::anyhow!("backend down"))
        })
        .await;

    assert!(failed.is_err());
    assert_eq!(cache.len().await, 0);

    // The next attempt retries and succeeds
    let recovered: Result<String> = cache
        .try_get_or_insert_with("flaky".to_string(), || async { Ok("fresh".to_string()) })
        .await;

    assert_eq!(recovered.unwrap(), "fresh");
    assert_eq!(cache.get("flaky").await, Some("fresh".to_string()));
}

// == Configuration Tests ==

// Env vars are process-global; serialize the tests that touch them.
static ENV_LOCK: Mutex<()> = Mutex::new(());

#[tokio::test]
async fn test_cache_built_from_env_config() {
    let _guard = ENV_LOCK.lock().unwrap();
    std::env::set_var("MEMOCACHE_DEFAULT_TTL_MS", "1500");
    std::env::set_var("MEMOCACHE_CLEANUP_INTERVAL_MS", "600");

    let config = CacheConfig::from_env();

    std::env::remove_var("MEMOCACHE_DEFAULT_TTL_MS");
    std::env::remove_var("MEMOCACHE_CLEANUP_INTERVAL_MS");

    let config = config.expect("well-formed environment should load");
    assert_eq!(config.default_ttl, Duration::from_millis(1500));
    assert_eq!(config.cleanup_interval, Duration::from_millis(600));

    let cache: SharedCache<String, String> = SharedCache::from_config(&config);
    assert_eq!(cache.default_ttl().await, Duration::from_millis(1500));
}

// == Stats Snapshot Tests ==

#[tokio::test]
async fn test_stats_snapshot_serializes() -> Result<()> {
    let cache = shared_cache(Duration::from_secs(300));

    cache.set("key".to_string(), "value".to_string()).await;
    cache.get("key").await;
    cache.get("missing").await;

    let snapshot = serde_json::to_value(cache.stats().await)?;

    assert_eq!(snapshot["hits"], 1);
    assert_eq!(snapshot["misses"], 1);
    assert_eq!(snapshot["expirations"], 0);
    assert_eq!(snapshot["total_entries"], 1);

    Ok(())
}
