//! FIFO Policy Module

use std::collections::VecDeque;

use crate::error::{CacheError, Result};
use crate::policy::EvictionPolicy;

// == FIFO Policy ==
/// Evicts keys in the order they were inserted. Reads and overwrites do not
/// change a key's position.
#[derive(Debug, Default)]
pub struct FifoPolicy {
    /// Front = oldest insert
    queue: VecDeque<String>,
}

impl FifoPolicy {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }
}

impl EvictionPolicy for FifoPolicy {
    fn name(&self) -> &'static str {
        "fifo"
    }

    fn select_victim(&self) -> Result<String> {
        self.queue.front().cloned().ok_or(CacheError::NoCandidates)
    }

    fn on_insert(&mut self, key: &str) {
        if !self.queue.iter().any(|k| k == key) {
            self.queue.push_back(key.to_string());
        }
    }

    fn on_access(&mut self, _key: &str) {}

    fn on_evict(&mut self, key: &str) {
        // The victim is almost always at the front
        if self.queue.front().map(String::as_str) == Some(key) {
            self.queue.pop_front();
        } else {
            self.queue.retain(|k| k != key);
        }
    }

    fn tracked(&self) -> usize {
        self.queue.len()
    }
}
