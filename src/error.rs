//! Error types for the cache engine
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache engine.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Construction-time configuration is invalid
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A persistence operation was requested on a cache built without
    /// a persistence configuration
    #[error("Persistence is not configured for this cache")]
    PersistenceNotConfigured,

    /// The snapshot file was readable but its contents are unusable
    #[error("Invalid snapshot: {0}")]
    Snapshot(String),

    /// Filesystem failure while reading or writing a snapshot
    #[error("Snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot (de)serialization failure
    #[error("Snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the cache engine.
pub type Result<T> = std::result::Result<T, CacheError>;
