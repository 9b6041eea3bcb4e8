//! Background Tasks Module
//!
//! Recurring tasks driven against a [`SharedCache`](crate::SharedCache):
//!
//! - Autosave: writes a snapshot every `save_interval`
//! - TTL Cleanup: sweeps expired entries at a configured interval

mod autosave;
mod cleanup;

pub use autosave::start_autosave;
pub use cleanup::spawn_cleanup_task;
