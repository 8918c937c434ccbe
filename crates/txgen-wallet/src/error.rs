//! Wallet error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("no key at index {0}")]
    UnknownIndex(usize),
}
