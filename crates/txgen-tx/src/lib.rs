//! Transaction construction and cancellation assembly.
//!
//! Provides the typed transaction structure, a builder for payment
//! transactions, structural size estimation for fee quotes, per-input
//! signing, and the canceller that re-spends a pending transaction's
//! inputs to supersede it.

pub mod builder;
pub mod cancel;
pub mod fee;
pub mod types;

pub use builder::TransactionBuilder;
pub use cancel::{CancelResult, CancelResultCode, TxCanceller};
pub use fee::estimate_tx_size;
pub use types::{Transaction, TxInput, TxOutput, Unlock};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TxError {
    #[error("transaction has no inputs")]
    NoInputs,

    #[error("transaction has no destinations")]
    NoDestinations,

    #[error("insufficient inputs: need {need}, have {have}")]
    InsufficientInputs { need: u64, have: u64 },

    #[error("zero-amount output to {0}")]
    ZeroAmount(txgen_types::Address),

    #[error("value overflow summing inputs and outputs")]
    ValueOverflow,
}
