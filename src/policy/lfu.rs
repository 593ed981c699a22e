//! LFU Policy Module
//!
//! Least Frequently Used eviction with insertion-order tie-breaking.

use std::collections::HashMap;

use crate::error::{CacheError, Result};
use crate::policy::EvictionPolicy;

/// Per-key frequency metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Usage {
    /// Inserts and accesses seen since the key entered the cache
    count: u64,
    /// Monotonic insertion sequence, breaks ties between equal counts
    inserted: u64,
}

// == LFU Policy ==
/// Tracks access counts for LFU eviction.
///
/// An insert counts as the first access. The victim is the key with the
/// lowest count; among equal counts the earliest inserted key loses.
#[derive(Debug, Default)]
pub struct LfuPolicy {
    usage: HashMap<String, Usage>,
    next_seq: u64,
}

impl LfuPolicy {
    // == Constructor ==
    /// Creates a new empty LFU policy.
    pub fn new() -> Self {
        Self {
            usage: HashMap::new(),
            next_seq: 0,
        }
    }

    // == Frequency ==
    /// Returns the current access count for `key`.
    #[cfg(test)]
    fn frequency(&self, key: &str) -> Option<u64> {
        self.usage.get(key).map(|u| u.count)
    }
}

impl EvictionPolicy for LfuPolicy {
    fn name(&self) -> &'static str {
        "lfu"
    }

    fn select_victim(&self) -> Result<String> {
        self.usage
            .iter()
            .min_by_key(|(_, u)| (u.count, u.inserted))
            .map(|(key, _)| key.clone())
            .ok_or(CacheError::NoCandidates)
    }

    fn on_insert(&mut self, key: &str) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.usage.insert(
            key.to_string(),
            Usage {
                count: 1,
                inserted: seq,
            },
        );
    }

    fn on_access(&mut self, key: &str) {
        if let Some(usage) = self.usage.get_mut(key) {
            usage.count = usage.count.saturating_add(1);
        }
    }

    fn on_evict(&mut self, key: &str) {
        self.usage.remove(key);
    }

    fn tracked(&self) -> usize {
        self.usage.len()
    }
}
