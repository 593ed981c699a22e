//! Cache Entry Module
//!
//! Defines the structure for individual cache entries.

// == Cache Entry ==
/// A stored value plus the store-level bookkeeping needed to replay
/// resident keys into a newly installed policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// The stored value
    pub value: Vec<u8>,
    /// Store-wide insertion sequence number, unique per entry
    pub inserted_seq: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `inserted_seq` - Position of this insert in the store's history
    pub fn new(value: Vec<u8>, inserted_seq: u64) -> Self {
        Self {
            value,
            inserted_seq,
        }
    }

    // == Replace Value ==
    /// Overwrites the value in place, keeping the insertion sequence.
    ///
    /// Returns the previous value.
    pub fn replace(&mut self, value: Vec<u8>) -> Vec<u8> {
        std::mem::replace(&mut self.value, value)
    }
}
