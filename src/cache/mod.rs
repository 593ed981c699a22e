//! Cache Module
//!
//! Provides a bounded in-memory key-value store with pluggable eviction.

mod entry;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use shared::SharedCache;
pub use stats::{CacheStats, StatsReport};
pub use store::CacheStore;
