//! Core types shared across the txgen workspace.
//!
//! Provides the content hash, address, unspent-output, and fee-quote types
//! that the chain client, transaction layer, and orchestrators all speak.

pub mod address;
pub mod constants;
pub mod hash;
pub mod utxo;

pub use address::{Address, AddressError};
pub use hash::Hash;
pub use utxo::{FeeQuote, UnspentOutput};
