//! Error types for the policy cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache construction and eviction.
///
/// A lookup miss is not represented here: `get` returns `None` for absent keys.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Rejected construction parameters (zero capacity, unknown policy name)
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Key rejected by `put`
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Eviction requested while no victim can exist
    #[error("Eviction impossible: {0}")]
    EvictionImpossible(String),

    /// The eviction policy holds no metadata to choose a victim from
    #[error("Eviction policy has no candidates")]
    NoCandidates,
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
