//! Policy Cache - a bounded in-process key-value cache
//!
//! Values are opaque bytes keyed by strings. When the cache is full, an
//! interchangeable eviction policy (LRU, LFU or FIFO) picks the victim.

pub mod cache;
pub mod config;
pub mod error;
pub mod policy;

pub use cache::{CacheStats, CacheStore, SharedCache, StatsReport};
pub use config::Config;
pub use error::{CacheError, Result};
pub use policy::{EvictionPolicy, PolicyKind};
