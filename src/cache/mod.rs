//! Cache Module
//!
//! Provides in-memory caching with TTL expiration, LRU eviction, eviction
//! notification and optional durable snapshots.

mod entry;
mod listener;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use listener::{EvictionListener, NoopListener};
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::{Cache, CacheKey, CacheValue, SharedCache};
