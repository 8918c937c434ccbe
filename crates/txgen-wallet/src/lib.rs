//! Wallet-side pieces of the traffic generator.
//!
//! Provides the deterministic well-known key registry the tool draws its
//! source and destination wallets from, and the UTXO selector both
//! orchestrators use.

pub mod error;
pub mod keys;
pub mod utxo;

pub use error::WalletError;
pub use keys::{KeyPair, KeyRegistry};
pub use utxo::{select_utxos, SelectionError, SelectionResult};
