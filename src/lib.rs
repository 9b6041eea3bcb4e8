//! Memocache - a capacity-bounded in-memory cache
//!
//! Provides a generic key/value cache with TTL expiration, LRU eviction, an
//! eviction notification hook and optional durable snapshots with autosave.
//!
//! The cache is a plain library component: build one instance during process
//! startup, hand an explicit handle to every consumer, and call
//! [`Cache::destroy`] during the shutdown sequence.
//!
//! ```no_run
//! use std::time::Duration;
//! use memocache::{Cache, CacheConfig, PersistenceConfig};
//!
//! # async fn demo() -> memocache::Result<()> {
//! let mut cache: Cache<String, String> = Cache::open(
//!     CacheConfig::new(1000)
//!         .ttl(Duration::from_secs(300))
//!         .persistence(PersistenceConfig::new("data/cache.json").auto_save(true)),
//! )
//! .await?;
//!
//! cache.set("session:42".to_string(), "alice".to_string()).await;
//! assert_eq!(cache.get(&"session:42".to_string()).as_deref(), Some("alice"));
//!
//! cache.destroy().await?;
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod persist;
pub mod tasks;

pub use cache::{
    Cache, CacheEntry, CacheKey, CacheStats, CacheValue, EvictionListener, NoopListener,
    SharedCache,
};
pub use config::{CacheConfig, PersistenceConfig};
pub use error::{CacheError, Result};
pub use tasks::{spawn_cleanup_task, start_autosave};
