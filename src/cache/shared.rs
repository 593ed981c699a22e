//! Shared Cache Module
//!
//! Thread-safe handle around a [`CacheStore`].

use std::sync::Arc;

use parking_lot::Mutex;

use crate::cache::{CacheStats, CacheStore, StatsReport};
use crate::error::Result;
use crate::policy::{EvictionPolicy, PolicyKind};

// == Shared Cache ==
/// Cloneable handle that serializes every operation through one lock.
///
/// Reads take the same exclusive lock as writes because a hit mutates
/// policy metadata. Entries, counters and policy state always change
/// together under that lock.
#[derive(Debug, Clone)]
pub struct SharedCache {
    inner: Arc<Mutex<CacheStore>>,
}

impl SharedCache {
    /// Wraps an existing store.
    pub fn new(store: CacheStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Builds a store with a built-in policy and wraps it.
    pub fn with_policy(kind: PolicyKind, max_capacity: usize) -> Result<Self> {
        Ok(Self::new(CacheStore::new(kind, max_capacity)?))
    }

    pub fn put(&self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Result<()> {
        self.inner.lock().put(key, value)
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.inner.lock().get(key)
    }

    pub fn evict(&self) -> Result<String> {
        self.inner.lock().evict()
    }

    pub fn set_policy(&self, kind: PolicyKind) {
        self.inner.lock().set_policy(kind);
    }

    pub fn replace_policy(&self, policy: Box<dyn EvictionPolicy>) -> Result<()> {
        self.inner.lock().replace_policy(policy)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }

    pub fn report(&self) -> StatsReport {
        self.inner.lock().report()
    }

    /// Runs `f` with exclusive access to the store, for multi-step
    /// operations that must not interleave with other callers.
    pub fn with_store<R>(&self, f: impl FnOnce(&mut CacheStore) -> R) -> R {
        let mut store = self.inner.lock();
        f(&mut store)
    }
}
