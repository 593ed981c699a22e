//! Eviction Policy Module
//!
//! Interchangeable strategies that pick which key leaves a full cache.
//!
//! A policy only sees keys. The cache store owns entries and values and
//! reports every insert, access and eviction to the active policy.

mod fifo;
mod lfu;
mod lru;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CacheError, Result};

pub use fifo::FifoPolicy;
pub use lfu::LfuPolicy;
pub use lru::LruPolicy;

// == Eviction Policy Trait ==
/// Contract shared by every eviction strategy.
///
/// Implementations must keep metadata for exactly the keys reported through
/// `on_insert` and not yet removed through `on_evict`.
pub trait EvictionPolicy: fmt::Debug + Send {
    /// Short, stable policy name (`"lru"`, `"lfu"`, ...).
    fn name(&self) -> &'static str;

    /// Returns the key that should be evicted next.
    ///
    /// Does not remove any metadata; the store calls `on_evict` once the
    /// entry is gone. Fails with [`CacheError::NoCandidates`] when empty.
    fn select_victim(&self) -> Result<String>;

    /// A new key entered the cache.
    fn on_insert(&mut self, key: &str);

    /// A resident key was read or overwritten.
    fn on_access(&mut self, key: &str);

    /// A key left the cache; drop its metadata.
    fn on_evict(&mut self, key: &str);

    /// Number of keys this policy currently holds metadata for.
    fn tracked(&self) -> usize;
}

// == Policy Kind ==
/// Selector for the built-in policies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// Least recently used
    #[default]
    Lru,
    /// Least frequently used, ties go to the earliest insert
    Lfu,
    /// First in, first out
    Fifo,
}

impl PolicyKind {
    /// Creates a fresh, empty policy of this kind.
    pub fn build(self) -> Box<dyn EvictionPolicy> {
        match self {
            PolicyKind::Lru => Box::new(LruPolicy::new()),
            PolicyKind::Lfu => Box::new(LfuPolicy::new()),
            PolicyKind::Fifo => Box::new(FifoPolicy::new()),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PolicyKind::Lru => "lru",
            PolicyKind::Lfu => "lfu",
            PolicyKind::Fifo => "fifo",
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = CacheError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lru" => Ok(PolicyKind::Lru),
            "lfu" => Ok(PolicyKind::Lfu),
            "fifo" => Ok(PolicyKind::Fifo),
            other => Err(CacheError::InvalidConfiguration(format!(
                "unknown eviction policy '{}' (expected lru, lfu or fifo)",
                other
            ))),
        }
    }
}
