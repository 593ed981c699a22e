//! Configuration Module
//!
//! Handles loading cache and demo-host settings from environment variables.

use std::env;

use crate::error::Result;
use crate::policy::PolicyKind;

/// Cache and demo workload parameters.
///
/// Numeric values fall back to their defaults when missing or unparseable.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Maximum number of entries the cache can hold
    pub max_capacity: usize,
    /// Eviction policy the cache starts with
    pub policy: PolicyKind,
    /// Number of concurrent demo workers
    pub workers: usize,
    /// Operations each demo worker performs
    pub ops_per_worker: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_MAX_CAPACITY` - Maximum cache entries (default: 1000)
    /// - `CACHE_POLICY` - `lru`, `lfu` or `fifo` (default: lru)
    /// - `DEMO_WORKERS` - Concurrent demo workers (default: 4)
    /// - `DEMO_OPS_PER_WORKER` - Operations per worker (default: 1000)
    ///
    /// # Errors
    /// `InvalidConfiguration` if `CACHE_POLICY` names an unknown policy.
    /// A zero capacity is accepted here and rejected when the cache is built.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let policy = match env::var("CACHE_POLICY") {
            Ok(name) => name.parse()?,
            Err(_) => defaults.policy,
        };

        Ok(Self {
            max_capacity: parse_var("CACHE_MAX_CAPACITY").unwrap_or(defaults.max_capacity),
            policy,
            workers: parse_var("DEMO_WORKERS").unwrap_or(defaults.workers),
            ops_per_worker: parse_var("DEMO_OPS_PER_WORKER").unwrap_or(defaults.ops_per_worker),
        })
    }
}

fn parse_var(name: &str) -> Option<usize> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_capacity: 1000,
            policy: PolicyKind::Lru,
            workers: 4,
            ops_per_worker: 1000,
        }
    }
}
