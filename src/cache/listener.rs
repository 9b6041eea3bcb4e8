//! Eviction Listener Module
//!
//! Notification capability invoked when the cache forcibly removes an entry
//! to satisfy its capacity bound.

// == Eviction Listener ==
/// Receives a synchronous notification for every LRU eviction.
///
/// The listener is called once per evicted entry with the evicted key and its
/// last stored value, before the triggering `set` returns. Explicit deletes
/// and TTL expiry do not notify.
pub trait EvictionListener<K, V>: Send + Sync {
    fn on_evict(&self, key: &K, value: &V);
}

// == No-op Default ==
/// Listener that ignores every eviction; installed when no listener is
/// configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopListener;

impl<K, V> EvictionListener<K, V> for NoopListener {
    fn on_evict(&self, _key: &K, _value: &V) {}
}

// Plain closures work as listeners.
impl<K, V, F> EvictionListener<K, V> for F
where
    F: Fn(&K, &V) + Send + Sync,
{
    fn on_evict(&self, key: &K, value: &V) {
        self(key, value)
    }
}
