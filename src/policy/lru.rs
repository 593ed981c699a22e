//! LRU Policy Module
//!
//! Least Recently Used eviction.

use std::collections::{BTreeMap, HashMap};

use crate::error::{CacheError, Result};
use crate::policy::EvictionPolicy;

// == LRU Policy ==
/// Tracks access order for LRU eviction.
///
/// Every insert and access stamps the key with a fresh tick from a
/// monotonic counter. `order` maps tick -> key, so its first entry is the
/// least recently used key and its last entry the most recent. Ticks are
/// unique, so two keys never share a position.
#[derive(Debug, Default)]
pub struct LruPolicy {
    /// Key -> tick of its latest insert or access
    ticks: HashMap<String, u64>,
    /// Tick -> key, oldest first
    order: BTreeMap<u64, String>,
    next_tick: u64,
}

impl LruPolicy {
    // == Constructor ==
    /// Creates a new empty LRU policy.
    pub fn new() -> Self {
        Self {
            ticks: HashMap::new(),
            order: BTreeMap::new(),
            next_tick: 0,
        }
    }

    // == Touch ==
    /// Moves `key` to the most-recent position, adding it if missing.
    fn touch(&mut self, key: &str) {
        let tick = self.next_tick;
        self.next_tick += 1;

        match self.ticks.get_mut(key) {
            Some(old) => {
                if let Some(owned) = self.order.remove(old) {
                    self.order.insert(tick, owned);
                }
                *old = tick;
            }
            None => {
                self.ticks.insert(key.to_string(), tick);
                self.order.insert(tick, key.to_string());
            }
        }
    }

    // == Recency Rank ==
    /// Position of `key` counted from the least recently used end.
    #[cfg(test)]
    fn recency_rank(&self, key: &str) -> Option<usize> {
        let tick = *self.ticks.get(key)?;
        Some(self.order.range(..tick).count())
    }
}

impl EvictionPolicy for LruPolicy {
    fn name(&self) -> &'static str {
        "lru"
    }

    fn select_victim(&self) -> Result<String> {
        self.order
            .values()
            .next()
            .cloned()
            .ok_or(CacheError::NoCandidates)
    }

    fn on_insert(&mut self, key: &str) {
        self.touch(key);
    }

    fn on_access(&mut self, key: &str) {
        self.touch(key);
    }

    fn on_evict(&mut self, key: &str) {
        if let Some(tick) = self.ticks.remove(key) {
            self.order.remove(&tick);
        }
    }

    fn tracked(&self) -> usize {
        self.ticks.len()
    }
}
