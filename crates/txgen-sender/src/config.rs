//! Orchestrator configuration.
//!
//! Built once at startup and passed by reference into the orchestrators; no
//! global state.

use std::str::FromStr;
use txgen_types::constants::{DEFAULT_KEY_COUNT, GENESIS_WINDOW_END};

/// What to do when a sampled source wallet has no unspent outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptySourcePolicy {
    /// Fail the whole call immediately.
    #[default]
    Abort,
    /// Exclude the wallet and sample another source.
    Retry,
}

impl FromStr for EmptySourcePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "abort" => Ok(Self::Abort),
            "retry" => Ok(Self::Retry),
            _ => Err(format!("unknown policy: {} (use abort or retry)", s)),
        }
    }
}

/// Configuration for the payment generator and canceller.
#[derive(Debug, Clone)]
pub struct SenderConfig {
    /// Size of the well-known wallet pool.
    pub key_count: usize,
    /// Height at which payment generation is refused.
    pub window_end: u64,
    /// Hard cap on source-sampling attempts per call, independent of the
    /// exclusion set.
    pub max_attempts: usize,
    /// Behavior when a source wallet has no unspent outputs.
    pub empty_source_policy: EmptySourcePolicy,
}

impl Default for SenderConfig {
    fn default() -> Self {
        Self::with_key_count(DEFAULT_KEY_COUNT)
    }
}

impl SenderConfig {
    /// Config for a pool of `key_count` wallets; the attempt cap defaults to
    /// one try per wallet.
    pub fn with_key_count(key_count: usize) -> Self {
        Self {
            key_count,
            window_end: GENESIS_WINDOW_END,
            max_attempts: key_count,
            empty_source_policy: EmptySourcePolicy::default(),
        }
    }
}
