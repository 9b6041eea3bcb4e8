//! Snapshot Document Module
//!
//! On-disk representation of the full cache state. The document is versioned
//! JSON; field names are camelCase to keep existing snapshot files readable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// == Format Version ==
/// Version string written into every snapshot; loading rejects others.
pub const SNAPSHOT_VERSION: &str = "1.0";

// == Snapshot ==
/// Complete serialized cache state.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot<K, V> {
    /// Every physical entry as a `[key, entry]` pair
    pub data: Vec<(K, SnapshotEntry<V>)>,
    /// Recency order, most recently used first
    pub access_order: Vec<K>,
    /// Hit/miss counters at save time
    pub stats: SnapshotStats,
    /// Bookkeeping about the snapshot itself
    pub metadata: SnapshotMetadata,
}

// == Snapshot Entry ==
/// One persisted entry. `expires_at` is an absolute Unix-ms timestamp and is
/// preserved verbatim across a save/load round trip, so wall-clock time spent
/// on disk counts against the remaining lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotEntry<V> {
    pub value: V,
    /// Creation timestamp (Unix milliseconds)
    pub timestamp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<u64>,
}

// == Snapshot Stats ==
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SnapshotStats {
    pub hits: u64,
    pub misses: u64,
}

// == Snapshot Metadata ==
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotMetadata {
    pub version: String,
    pub saved_at: DateTime<Utc>,
    pub max_size: usize,
    /// Cache-wide TTL in milliseconds at save time, if one was configured
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,
}
