//! Unspent outputs and fee quotes as returned by the chain query endpoints.

use crate::address::Address;
use crate::hash::Hash;
use serde::{Deserialize, Serialize};

/// A spendable output, as reported by the chain.
///
/// Read-only snapshot; the chain creates and consumes these, the generator
/// only selects among them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnspentOutput {
    /// Identifier of the output (hash of the creating transaction + index).
    pub utxo: Hash,
    /// Value in atomic units.
    pub amount: u64,
    /// Owning address.
    pub address: Address,
    /// First height at which the output may be spent.
    pub unlock_height: u64,
}

impl UnspentOutput {
    /// Whether the output is spendable at the given chain height.
    pub fn unlocked_at(&self, height: u64) -> bool {
        self.unlock_height <= height
    }
}

/// Per-transaction fee estimates for a given transaction byte size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeQuote {
    pub low: u64,
    pub medium: u64,
    pub high: u64,
}
