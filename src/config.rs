//! Configuration Module
//!
//! Builder-style configuration consumed by [`Cache::open`](crate::Cache::open).

use std::path::PathBuf;
use std::time::Duration;

use crate::cache::{EvictionListener, NoopListener};

// == Cache Config ==
/// Construction parameters for a cache instance.
///
/// Only `max_size` is required; TTL, eviction notification and persistence
/// are opt-in.
pub struct CacheConfig<K, V> {
    /// Maximum number of entries the cache can hold
    pub max_size: usize,
    /// Cache-wide TTL applied to every entry, None = entries never expire
    pub ttl: Option<Duration>,
    /// Capability invoked for every LRU eviction
    pub listener: Box<dyn EvictionListener<K, V>>,
    /// Optional durable snapshot settings
    pub persistence: Option<PersistenceConfig>,
}

impl<K, V> CacheConfig<K, V> {
    /// Creates a configuration holding at most `max_size` entries, with no
    /// TTL, a no-op eviction listener and no persistence.
    pub fn new(max_size: usize) -> Self {
        Self {
            max_size,
            ttl: None,
            listener: Box::new(NoopListener),
            persistence: None,
        }
    }

    /// Sets the cache-wide TTL applied to newly created or refreshed entries.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Installs an eviction listener, replacing the no-op default.
    pub fn on_eviction(mut self, listener: impl EvictionListener<K, V> + 'static) -> Self {
        self.listener = Box::new(listener);
        self
    }

    /// Enables durable snapshotting.
    pub fn persistence(mut self, persistence: PersistenceConfig) -> Self {
        self.persistence = Some(persistence);
        self
    }
}

// == Persistence Config ==
/// Durable snapshot settings.
#[derive(Debug, Clone)]
pub struct PersistenceConfig {
    /// Snapshot file destination
    pub file_path: PathBuf,
    /// Save after every mutating call (default: false)
    pub auto_save: bool,
    /// Interval for the recurring save timer, None = no timer
    pub save_interval: Option<Duration>,
}

impl PersistenceConfig {
    /// Creates a persistence configuration writing to `file_path`, with
    /// autosave disabled and no recurring timer.
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            auto_save: false,
            save_interval: None,
        }
    }

    /// Enables or disables save-on-mutation.
    pub fn auto_save(mut self, enabled: bool) -> Self {
        self.auto_save = enabled;
        self
    }

    /// Sets the interval for the recurring save timer.
    pub fn save_interval(mut self, interval: Duration) -> Self {
        self.save_interval = Some(interval);
        self
    }
}
