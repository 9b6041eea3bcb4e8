//! Persistence Module
//!
//! Loads and saves cache snapshots. Every write to the snapshot file goes
//! through an internal mutex, so a timer-driven save and a mutation-triggered
//! save can never interleave their writes.

mod snapshot;

pub use snapshot::{Snapshot, SnapshotEntry, SnapshotMetadata, SnapshotStats, SNAPSHOT_VERSION};

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use crate::config::PersistenceConfig;
use crate::error::{CacheError, Result};

// == Persistence ==
/// Handle for the snapshot file of one cache instance.
pub struct Persistence {
    path: PathBuf,
    auto_save: bool,
    save_interval: Option<Duration>,
    /// Serializes all writes to the snapshot file
    write_lock: Arc<Mutex<()>>,
}

impl Persistence {
    // == Constructor ==
    pub fn new(config: PersistenceConfig) -> Self {
        Self {
            path: config.file_path,
            auto_save: config.auto_save,
            save_interval: config.save_interval,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    // == Accessors ==
    /// Snapshot file destination.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether every mutating call should save immediately.
    pub fn auto_save(&self) -> bool {
        self.auto_save
    }

    /// Interval for the recurring save timer, if one is configured.
    pub fn save_interval(&self) -> Option<Duration> {
        self.save_interval
    }

    // == Load ==
    /// Reads and parses the snapshot file.
    ///
    /// A missing file is a normal empty start and yields `Ok(None)`. Any
    /// other read or parse failure propagates.
    pub async fn load<K, V>(&self) -> Result<Option<Snapshot<K, V>>>
    where
        K: DeserializeOwned,
        V: DeserializeOwned,
    {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no snapshot file, starting empty");
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        let snapshot: Snapshot<K, V> = serde_json::from_slice(&bytes)?;
        if snapshot.metadata.version != SNAPSHOT_VERSION {
            return Err(CacheError::Snapshot(format!(
                "unsupported snapshot version '{}'",
                snapshot.metadata.version
            )));
        }

        debug!(
            path = %self.path.display(),
            entries = snapshot.data.len(),
            "snapshot loaded"
        );
        Ok(Some(snapshot))
    }

    // == Save ==
    /// Serializes the snapshot, ensures the destination directory exists and
    /// writes the file. Writes are serialized through the internal mutex.
    pub async fn save<K, V>(&self, snapshot: &Snapshot<K, V>) -> Result<()>
    where
        K: Serialize,
        V: Serialize,
    {
        let bytes = serde_json::to_vec_pretty(snapshot)?;

        let _guard = self.write_lock.lock().await;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        fs::write(&self.path, bytes).await?;

        debug!(
            path = %self.path.display(),
            entries = snapshot.data.len(),
            "snapshot written"
        );
        Ok(())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::tempdir;

    fn sample_snapshot() -> Snapshot<String, String> {
        Snapshot {
            data: vec![(
                "k".to_string(),
                SnapshotEntry {
                    value: "v".to_string(),
                    timestamp: 1_700_000_000_000,
                    expires_at: None,
                },
            )],
            access_order: vec!["k".to_string()],
            stats: SnapshotStats { hits: 0, misses: 0 },
            metadata: SnapshotMetadata {
                version: SNAPSHOT_VERSION.to_string(),
                saved_at: Utc::now(),
                max_size: 4,
                ttl: None,
            },
        }
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty_start() {
        let dir = tempdir().unwrap();
        let persistence = Persistence::new(PersistenceConfig::new(dir.path().join("missing.json")));

        let loaded: Option<Snapshot<String, String>> = persistence.load().await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_save_creates_parent_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("cache.json");
        let persistence = Persistence::new(PersistenceConfig::new(path.clone()));

        persistence.save(&sample_snapshot()).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempdir().unwrap();
        let persistence = Persistence::new(PersistenceConfig::new(dir.path().join("cache.json")));

        persistence.save(&sample_snapshot()).await.unwrap();
        let loaded: Snapshot<String, String> = persistence.load().await.unwrap().unwrap();

        assert_eq!(loaded.data.len(), 1);
        assert_eq!(loaded.data[0].0, "k");
        assert_eq!(loaded.access_order, vec!["k".to_string()]);
    }

    #[tokio::test]
    async fn test_load_rejects_unknown_version() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cache.json");
        let persistence = Persistence::new(PersistenceConfig::new(path.clone()));

        let mut snapshot = sample_snapshot();
        snapshot.metadata.version = "9.9".to_string();
        persistence.save(&snapshot).await.unwrap();

        let result: Result<Option<Snapshot<String, String>>> = persistence.load().await;
        assert!(matches!(result, Err(CacheError::Snapshot(_))));
    }

    #[tokio::test]
    async fn test_load_rejects_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cache.json");
        fs::write(&path, b"not json at all").await.unwrap();

        let persistence = Persistence::new(PersistenceConfig::new(path));
        let result: Result<Option<Snapshot<String, String>>> = persistence.load().await;
        assert!(matches!(result, Err(CacheError::Serialization(_))));
    }
}
