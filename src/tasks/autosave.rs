//! Autosave Task
//!
//! Recurring timer that writes a snapshot of the cache every `save_interval`.
//! Runs in addition to save-on-mutation; both paths target the same file and
//! are serialized by the persistence write lock.

use tracing::{debug, info, warn};

use crate::cache::{CacheKey, CacheValue, SharedCache};

/// Starts the recurring save timer for a shared cache.
///
/// A no-op when the cache has no persistence or no `save_interval`. The
/// spawned task is attached to the cache so that `destroy` can cancel it;
/// timer-driven save failures are logged and never crash the task.
pub async fn start_autosave<K: CacheKey, V: CacheValue>(cache: SharedCache<K, V>) {
    let Some(interval) = cache.read().await.save_interval() else {
        return;
    };

    let worker = cache.clone();
    let handle = tokio::spawn(async move {
        info!("Starting autosave task with interval of {:?}", interval);

        loop {
            tokio::time::sleep(interval).await;

            match worker.read().await.persist().await {
                Ok(()) => debug!("Autosave: snapshot written"),
                Err(err) => warn!(error = %err, "Autosave: snapshot write failed"),
            }
        }
    });

    cache.write().await.attach_autosave(handle);
}
