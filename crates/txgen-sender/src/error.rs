//! Orchestrator error taxonomy.
//!
//! Every public operation returns one of these; nothing panics past the
//! crate boundary. Gating conditions and selection exhaustion are ordinary
//! variants so callers can report them as outcomes rather than faults.

use thiserror::Error;
use txgen_rpc::RpcError;
use txgen_tx::{CancelResultCode, TxError};
use txgen_types::Hash;
use txgen_wallet::WalletError;

#[derive(Debug, Error)]
pub enum SenderError {
    /// The chain's query side is unreachable or misbehaving.
    #[error("chain unavailable: {0}")]
    Chain(#[from] RpcError),

    /// Height is 0: the chain has not produced a block yet.
    #[error("the chain has not started yet; try again after the first block")]
    NotStarted,

    /// The genesis funding window has closed; generation is refused so the
    /// tool cannot spend non-test funds.
    #[error("the genesis funding window has closed (height {height})")]
    WindowClosed { height: u64 },

    /// Every sampled source was excluded without finding a spendable set.
    #[error("no funded source wallet found after {attempted} attempts")]
    NoFundedSource { attempted: usize },

    /// The wallet pool is too small to pick distinct source and destination.
    #[error("wallet pool of {key_count} is too small for a payment")]
    PoolTooSmall { key_count: usize },

    /// The pending transaction to cancel is gone, usually because it
    /// confirmed or was dropped.
    #[error("pending transaction {hash} not found; it may already have confirmed")]
    OriginalNotFound { hash: Hash },

    /// Cancellation assembly returned a non-success code.
    #[error("cancellation assembly failed: {code}")]
    Assembly { code: CancelResultCode },

    /// Transaction construction failed.
    #[error("transaction build failed: {0}")]
    Build(#[from] TxError),

    /// Key registry lookup failed.
    #[error(transparent)]
    Wallet(#[from] WalletError),

    /// The network rejected the submission. Never retried here: replaying a
    /// submission after an ambiguous failure invites double-spend reports.
    #[error("submission failed: {source}")]
    Submission {
        #[source]
        source: RpcError,
    },
}
