//! TTL Cleanup Task
//!
//! Background task that periodically removes expired cache entries.

use std::hash::Hash;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::shared::SharedCache;

// == Cleanup Task Handle ==
/// Handle to a running cleanup task.
///
/// The sweep's lifetime is tied to this handle: the owner that starts the
/// task keeps the handle for as long as the cache should be swept, and the
/// task is cancelled when the handle is dropped or
/// [`abort`](CleanupTask::abort) is called. The cache itself never starts
/// or stops the timer.
#[derive(Debug)]
pub struct CleanupTask {
    handle: JoinHandle<()>,
}

impl CleanupTask {
    /// Stops the sweep. Idempotent; dropping the handle does the same.
    pub fn abort(&self) {
        self.handle.abort();
    }

    /// Returns true once the task has fully stopped.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for CleanupTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// == Spawn ==
/// Spawns a background task that periodically cleans up expired cache
/// entries.
///
/// The task sleeps for `every`, then sweeps the shared cache, forever. The
/// first sweep happens one full interval after the spawn; there is no
/// sweep at spawn time. Sweep results are logged via `tracing`.
///
/// # Arguments
/// * `cache` - Shared cache handle the task sweeps
/// * `every` - Interval between sweeps
///
/// # Returns
/// A [`CleanupTask`] that cancels the sweep when aborted or dropped.
///
/// # Example
/// ```ignore
/// let cache: SharedCache<String, String> = SharedCache::new(Duration::from_secs(300));
/// let cleanup = spawn_cleanup_task(cache.clone(), Duration::from_secs(300));
/// // Later, during shutdown:
/// cleanup.abort();
/// ```
pub fn spawn_cleanup_task<K, V>(cache: SharedCache<K, V>, every: Duration) -> CleanupTask
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    let handle = tokio::spawn(async move {
        info!("Starting TTL cleanup task with interval of {:?}", every);

        loop {
            // Sleep for the configured interval
            tokio::time::sleep(every).await;

            let removed = cache.cleanup_expired().await;

            // Log cleanup statistics
            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    });

    CleanupTask { handle }
}
