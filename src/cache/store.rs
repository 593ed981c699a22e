//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with a pluggable eviction policy.

use std::collections::HashMap;

use tracing::{debug, error, info};

use crate::cache::{CacheEntry, CacheStats, StatsReport};
use crate::error::{CacheError, Result};
use crate::policy::{EvictionPolicy, PolicyKind};

// == Cache Store ==
/// Bounded key-value storage that delegates victim selection to the active
/// eviction policy.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Active eviction policy
    policy: Box<dyn EvictionPolicy>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_capacity: usize,
    /// Next insertion sequence number
    next_seq: u64,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty CacheStore using one of the built-in policies.
    ///
    /// # Arguments
    /// * `kind` - Eviction policy to start with
    /// * `max_capacity` - Maximum number of entries the cache can hold
    ///
    /// # Errors
    /// `InvalidConfiguration` if `max_capacity` is zero.
    pub fn new(kind: PolicyKind, max_capacity: usize) -> Result<Self> {
        Self::with_policy(kind.build(), max_capacity)
    }

    /// Creates an empty CacheStore with a caller-supplied policy.
    ///
    /// The policy must not track any keys yet.
    pub fn with_policy(policy: Box<dyn EvictionPolicy>, max_capacity: usize) -> Result<Self> {
        if max_capacity == 0 {
            return Err(CacheError::InvalidConfiguration(
                "max_capacity must be greater than zero".to_string(),
            ));
        }
        ensure_fresh(policy.as_ref())?;

        Ok(Self {
            entries: HashMap::new(),
            policy,
            stats: CacheStats::new(),
            max_capacity,
            next_seq: 0,
        })
    }

    // == Put ==
    /// Stores a key-value pair.
    ///
    /// Overwriting a resident key counts as an access and never evicts.
    /// Inserting a new key into a full cache evicts exactly one entry first.
    ///
    /// # Errors
    /// `InvalidKey` for an empty key; eviction failures are propagated
    /// unchanged.
    pub fn put(&mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) -> Result<()> {
        let key = key.into();
        validate_key(&key)?;
        let value = value.into();

        if let Some(entry) = self.entries.get_mut(&key) {
            entry.replace(value);
            self.policy.on_access(&key);
            return Ok(());
        }

        if self.entries.len() >= self.max_capacity {
            self.evict()?;
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.policy.on_insert(&key);
        self.entries.insert(key, CacheEntry::new(value, seq));
        self.stats.set_total_entries(self.entries.len());

        Ok(())
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// A hit is reported to the policy so later evictions see it. An absent
    /// key yields `None` and only bumps the miss counter.
    pub fn get(&mut self, key: &str) -> Option<Vec<u8>> {
        match self.entries.get(key) {
            Some(entry) => {
                let value = entry.value.clone();
                self.policy.on_access(key);
                self.stats.record_hit();
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Evict ==
    /// Removes the entry chosen by the active policy and returns its key.
    ///
    /// # Errors
    /// `EvictionImpossible` when the cache is empty or the policy names a key
    /// that is not resident; `NoCandidates` when the policy has no metadata.
    pub fn evict(&mut self) -> Result<String> {
        if self.entries.is_empty() {
            error!(policy = self.policy.name(), "eviction requested on empty cache");
            return Err(CacheError::EvictionImpossible(
                "cache holds no entries".to_string(),
            ));
        }

        let victim = self.policy.select_victim().map_err(|err| {
            error!(
                policy = self.policy.name(),
                entries = self.entries.len(),
                "policy failed to select a victim: {}",
                err
            );
            err
        })?;

        self.policy.on_evict(&victim);
        if self.entries.remove(&victim).is_none() {
            error!(policy = self.policy.name(), key = %victim, "policy selected a non-resident key");
            return Err(CacheError::EvictionImpossible(format!(
                "policy selected '{}' which is not in the cache",
                victim
            )));
        }

        self.stats.record_eviction();
        self.stats.set_total_entries(self.entries.len());
        debug!(policy = self.policy.name(), key = %victim, "evicted entry");

        Ok(victim)
    }

    // == Set Policy ==
    /// Switches to a fresh built-in policy.
    pub fn set_policy(&mut self, kind: PolicyKind) {
        self.install(kind.build());
    }

    /// Switches to a caller-supplied policy, which must not track any keys yet.
    pub fn replace_policy(&mut self, policy: Box<dyn EvictionPolicy>) -> Result<()> {
        ensure_fresh(policy.as_ref())?;
        self.install(policy);
        Ok(())
    }

    /// Seeds `policy` with every resident key in insertion order, then makes
    /// it the active policy. Values are not touched and access history from
    /// the previous policy is dropped.
    fn install(&mut self, mut policy: Box<dyn EvictionPolicy>) {
        let mut resident: Vec<(&String, u64)> = self
            .entries
            .iter()
            .map(|(key, entry)| (key, entry.inserted_seq))
            .collect();
        resident.sort_unstable_by_key(|(_, seq)| *seq);

        for (key, _) in &resident {
            policy.on_insert(key);
        }
        debug!(policy = policy.name(), seeded = resident.len(), "seeded eviction policy");

        info!(
            from = self.policy.name(),
            to = policy.name(),
            entries = self.entries.len(),
            "eviction policy switched"
        );
        self.policy = policy;
        self.stats.record_policy_switch();
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Returns statistics together with the active configuration.
    pub fn report(&self) -> StatsReport {
        StatsReport::new(self.policy.name(), self.max_capacity, self.stats())
    }

    // == Accessors ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_capacity(&self) -> usize {
        self.max_capacity
    }

    /// Checks residency without counting as an access.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Sorted snapshot of resident keys.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    /// Number of keys the active policy holds metadata for.
    pub fn policy_tracked(&self) -> usize {
        self.policy.tracked()
    }
}

fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::InvalidKey("key cannot be empty".to_string()));
    }
    Ok(())
}

fn ensure_fresh(policy: &dyn EvictionPolicy) -> Result<()> {
    if policy.tracked() != 0 {
        return Err(CacheError::InvalidConfiguration(format!(
            "{} policy already tracks {} keys",
            policy.name(),
            policy.tracked()
        )));
    }
    Ok(())
}
