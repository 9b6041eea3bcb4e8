//! TTL Cleanup Task
//!
//! Background task that periodically removes expired cache entries, so
//! entries that are never touched again still get purged.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{CacheKey, CacheValue, SharedCache};

/// Spawns a background task that periodically sweeps expired entries.
///
/// The task runs in an infinite loop, sleeping for the specified interval
/// between cleanup runs. It acquires a write lock on the cache for each
/// sweep.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
pub fn spawn_cleanup_task<K: CacheKey, V: CacheValue>(
    cache: SharedCache<K, V>,
    cleanup_interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Starting TTL cleanup task with interval of {:?}", cleanup_interval);

        loop {
            tokio::time::sleep(cleanup_interval).await;

            let removed = cache.write().await.cleanup_expired().await;

            if removed > 0 {
                info!("TTL cleanup: removed {} expired entries", removed);
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}
