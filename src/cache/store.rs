//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking, TTL
//! expiration, eviction notification and optional durable snapshots.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::warn;

use crate::cache::{CacheEntry, CacheStats, EvictionListener, LruTracker};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::persist::{
    Persistence, Snapshot, SnapshotEntry, SnapshotMetadata, SnapshotStats, SNAPSHOT_VERSION,
};

// == Bound Aliases ==
/// Everything a cache key must support: hashing, cloning and snapshot
/// (de)serialization, plus being movable into background tasks.
pub trait CacheKey: Eq + Hash + Clone + Serialize + DeserializeOwned + Send + Sync + 'static {}
impl<T> CacheKey for T where T: Eq + Hash + Clone + Serialize + DeserializeOwned + Send + Sync + 'static {}

/// Everything a cache value must support. Values are opaque payloads; the
/// cache never inspects them.
pub trait CacheValue: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {}
impl<T> CacheValue for T where T: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {}

// == Shared Handle ==
/// Shared, lock-guarded cache handle for multi-task use. Every public
/// operation runs as one atomic unit under the lock, covering the map, the
/// recency list and the counters together.
pub type SharedCache<K, V> = Arc<RwLock<Cache<K, V>>>;

// == Cache ==
/// Capacity-bounded key/value cache with LRU eviction and TTL support.
///
/// The cache is single-owner (`&mut self`); wrap it in a [`SharedCache`] to
/// drive it from multiple tasks.
pub struct Cache<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// LRU access tracker; bijective with `entries`
    lru: LruTracker<K>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_size: usize,
    /// Cache-wide TTL for new and refreshed entries, None = never expire
    ttl: Option<Duration>,
    /// Notified synchronously for every LRU eviction
    listener: Box<dyn EvictionListener<K, V>>,
    /// Durable snapshot handle, None = in-memory only
    persistence: Option<Persistence>,
    /// Recurring save timer, attached by `tasks::start_autosave`
    autosave: Option<JoinHandle<()>>,
}

impl<K: CacheKey, V: CacheValue> Cache<K, V> {
    // == Constructor ==
    /// Builds a cache from its configuration.
    ///
    /// If persistence is configured and a snapshot file exists, it is loaded
    /// before the cache accepts operations; entries that expired while
    /// persisted are purged, and a snapshot holding more entries than
    /// `max_size` is evicted down from the recency tail, notifying the
    /// listener. A missing snapshot file is a normal empty start; any other
    /// read or parse failure aborts construction.
    pub async fn open(config: CacheConfig<K, V>) -> Result<Self> {
        if config.max_size == 0 {
            return Err(CacheError::InvalidConfig(
                "max_size must be a positive integer".to_string(),
            ));
        }

        let mut cache = Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::new(),
            max_size: config.max_size,
            ttl: config.ttl,
            listener: config.listener,
            persistence: config.persistence.map(Persistence::new),
            autosave: None,
        };

        let loaded = match &cache.persistence {
            Some(persistence) => persistence.load().await?,
            None => None,
        };
        if let Some(snapshot) = loaded {
            cache.restore(snapshot)?;
            let purged = cache.sweep_expired();
            let evicted = cache.evict_to_capacity();
            if purged + evicted > 0 {
                cache.autosave().await;
            }
        }

        Ok(cache)
    }

    // == Set ==
    /// Inserts or replaces a key-value pair.
    ///
    /// A replaced key gets a fresh value and timestamps and is promoted to
    /// most recently used. When a new key would exceed capacity, the least
    /// recently used entry is evicted first and the eviction listener is
    /// invoked with the evicted pair before this call returns.
    pub async fn set(&mut self, key: K, value: V) {
        let is_overwrite = self.entries.contains_key(&key);

        if !is_overwrite && self.entries.len() >= self.max_size {
            if let Some(evicted_key) = self.lru.evict_oldest() {
                if let Some(evicted) = self.entries.remove(&evicted_key) {
                    self.stats.record_eviction();
                    self.listener.on_evict(&evicted_key, &evicted.value);
                }
            }
        }

        let entry = CacheEntry::new(value, self.ttl);
        self.entries.insert(key.clone(), entry);
        self.lru.touch(&key);
        self.stats.set_total_entries(self.entries.len());

        self.autosave().await;
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// A hit promotes the key to most recently used. An expired entry is
    /// removed on the spot and counted as a miss, like an absent key.
    pub fn get(&mut self, key: &K) -> Option<V> {
        if let Some(entry) = self.entries.get(key) {
            if entry.is_expired() {
                self.entries.remove(key);
                self.lru.remove(key);
                self.stats.set_total_entries(self.entries.len());
                self.stats.record_miss();
                return None;
            }

            let value = entry.value.clone();
            self.stats.record_hit();
            self.lru.touch(key);
            Some(value)
        } else {
            self.stats.record_miss();
            None
        }
    }

    // == Contains Key ==
    /// Checks whether a live entry exists for `key`.
    ///
    /// Performs the same expiry check and removal as [`get`](Self::get), but
    /// does not promote the key and does not touch the hit/miss counters.
    /// The asymmetry with `get` is deliberate: existence probes should not
    /// distort recency order or the hit rate.
    pub fn contains_key(&mut self, key: &K) -> bool {
        if let Some(entry) = self.entries.get(key) {
            if entry.is_expired() {
                self.entries.remove(key);
                self.lru.remove(key);
                self.stats.set_total_entries(self.entries.len());
                return false;
            }
            true
        } else {
            false
        }
    }

    // == Delete ==
    /// Removes an entry by key; returns whether it existed.
    pub async fn delete(&mut self, key: &K) -> bool {
        if self.entries.remove(key).is_some() {
            self.lru.remove(key);
            self.stats.set_total_entries(self.entries.len());
            self.autosave().await;
            true
        } else {
            false
        }
    }

    // == Clear ==
    /// Removes all entries and resets every counter to zero.
    pub async fn clear(&mut self) {
        self.entries.clear();
        self.lru.clear();
        self.stats = CacheStats::new();
        self.autosave().await;
    }

    // == Update TTL ==
    /// Resets the expiry of an existing entry to `now + ttl` without touching
    /// its value or recency position. Returns false (no-op) when the key does
    /// not exist.
    pub async fn update_ttl(&mut self, key: &K, ttl: Duration) -> bool {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.refresh_ttl(ttl);
        } else {
            return false;
        }
        self.autosave().await;
        true
    }

    // == Cleanup Expired ==
    /// Removes every entry whose expiry has passed.
    ///
    /// Returns the number of entries removed. Idempotent: a second call with
    /// no new expirations returns 0.
    pub async fn cleanup_expired(&mut self) -> usize {
        let removed = self.sweep_expired();
        if removed > 0 {
            self.autosave().await;
        }
        removed
    }

    /// Evicts from the recency tail until the capacity bound holds again,
    /// notifying the listener for each removal. Needed when a snapshot is
    /// reopened with a smaller `max_size` than it was saved with.
    fn evict_to_capacity(&mut self) -> usize {
        let mut evicted_count = 0;
        while self.entries.len() > self.max_size {
            let Some(evicted_key) = self.lru.evict_oldest() else {
                break;
            };
            if let Some(evicted) = self.entries.remove(&evicted_key) {
                self.stats.record_eviction();
                self.listener.on_evict(&evicted_key, &evicted.value);
                evicted_count += 1;
            }
        }
        self.stats.set_total_entries(self.entries.len());
        evicted_count
    }

    fn sweep_expired(&mut self) -> usize {
        let expired_keys: Vec<K> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();

        for key in expired_keys {
            self.entries.remove(&key);
            self.lru.remove(&key);
        }

        self.stats.set_total_entries(self.entries.len());
        count
    }

    // == Length ==
    /// Current physical entry count, including expired entries that have not
    /// been swept yet.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Keys ==
    /// Snapshot of the current physical keys. Expired-but-unswept entries are
    /// included; run [`cleanup_expired`](Self::cleanup_expired) first when
    /// only live keys are wanted.
    pub fn keys(&self) -> Vec<K> {
        self.entries.keys().cloned().collect()
    }

    // == Values ==
    /// Snapshot of the current physical values, with the same expiry caveat
    /// as [`keys`](Self::keys).
    pub fn values(&self) -> Vec<V> {
        self.entries.values().map(|entry| entry.value.clone()).collect()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Persist ==
    /// Writes the full cache state to the configured snapshot file.
    ///
    /// Fails with [`CacheError::PersistenceNotConfigured`] when the cache was
    /// built without persistence; I/O failures propagate.
    pub async fn persist(&self) -> Result<()> {
        let persistence = self
            .persistence
            .as_ref()
            .ok_or(CacheError::PersistenceNotConfigured)?;
        persistence.save(&self.snapshot()).await
    }

    // == Destroy ==
    /// Cancels the recurring save timer and performs one final save when
    /// persistence is configured. Part of the application's explicit shutdown
    /// sequence.
    pub async fn destroy(&mut self) -> Result<()> {
        if let Some(handle) = self.autosave.take() {
            handle.abort();
        }
        if self.persistence.is_some() {
            self.persist().await?;
        }
        Ok(())
    }

    // == Autosave Wiring ==
    /// Interval for the recurring save timer, if persistence configures one.
    pub fn save_interval(&self) -> Option<Duration> {
        self.persistence.as_ref().and_then(|p| p.save_interval())
    }

    /// Attaches the recurring save timer so `destroy` can cancel it. An
    /// already attached timer is aborted first.
    pub fn attach_autosave(&mut self, handle: JoinHandle<()>) {
        if let Some(old) = self.autosave.replace(handle) {
            old.abort();
        }
    }

    /// Save-on-mutation path. Failures are logged and swallowed so the
    /// triggering operation still completes normally.
    async fn autosave(&self) {
        let Some(persistence) = &self.persistence else {
            return;
        };
        if !persistence.auto_save() {
            return;
        }
        if let Err(err) = persistence.save(&self.snapshot()).await {
            warn!(error = %err, "autosave failed");
        }
    }

    // == Snapshot Conversion ==
    fn snapshot(&self) -> Snapshot<K, V> {
        Snapshot {
            data: self
                .entries
                .iter()
                .map(|(key, entry)| {
                    (
                        key.clone(),
                        SnapshotEntry {
                            value: entry.value.clone(),
                            timestamp: entry.created_at,
                            expires_at: entry.expires_at,
                        },
                    )
                })
                .collect(),
            access_order: self.lru.iter().cloned().collect(),
            stats: SnapshotStats {
                hits: self.stats.hits,
                misses: self.stats.misses,
            },
            metadata: SnapshotMetadata {
                version: SNAPSHOT_VERSION.to_string(),
                saved_at: chrono::Utc::now(),
                max_size: self.max_size,
                ttl: self.ttl.map(|ttl| ttl.as_millis() as u64),
            },
        }
    }

    /// Replaces entries, recency order and hit/miss counters wholesale with
    /// the snapshot contents. The entry keys and the access order must be a
    /// bijection: every access-order key must name exactly one stored entry,
    /// or the snapshot is rejected. The eviction counter restarts at zero;
    /// it is not part of the on-disk format.
    fn restore(&mut self, snapshot: Snapshot<K, V>) -> Result<()> {
        let Snapshot {
            data,
            access_order,
            stats,
            ..
        } = snapshot;

        if data.len() != access_order.len() {
            return Err(CacheError::Snapshot(
                "entry count does not match access order length".to_string(),
            ));
        }

        self.entries = data
            .into_iter()
            .map(|(key, entry)| {
                (
                    key,
                    CacheEntry {
                        value: entry.value,
                        created_at: entry.timestamp,
                        expires_at: entry.expires_at,
                    },
                )
            })
            .collect();

        let mut seen: HashSet<&K> = HashSet::with_capacity(access_order.len());
        for key in &access_order {
            if !seen.insert(key) || !self.entries.contains_key(key) {
                return Err(CacheError::Snapshot(
                    "access order does not match entry keys".to_string(),
                ));
            }
        }
        self.lru = LruTracker::from_most_recent(access_order);

        self.stats = CacheStats {
            hits: stats.hits,
            misses: stats.misses,
            evictions: 0,
            total_entries: self.entries.len(),
        };
        Ok(())
    }

    // == Invariant Check (test only) ==
    /// Asserts the store/recency bijection and the capacity bound.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        assert!(self.entries.len() <= self.max_size, "capacity exceeded");
        assert_eq!(
            self.entries.len(),
            self.lru.len(),
            "store and recency tracker diverged"
        );
        for key in self.entries.keys() {
            assert!(self.lru.contains(key), "entry missing from recency order");
        }
    }
}
