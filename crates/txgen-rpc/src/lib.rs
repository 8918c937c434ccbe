//! Async chain RPC client.
//!
//! HTTP client for the chain's query endpoints (height, UTXOs, fee
//! estimates, pending transactions) and the submission endpoint.
//!
//! # Example
//!
//! ```ignore
//! use txgen_rpc::ChainRpc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let chain = ChainRpc::new("http://localhost:2826");
//!     let height = chain.get_height().await.unwrap();
//!     println!("Height: {}", height);
//! }
//! ```

pub mod chain;
pub mod client;
pub mod error;

pub use chain::{ChainRpc, SubmitAck};
pub use client::{RpcClient, RpcConfig};
pub use error::RpcError;

/// Default local endpoints.
pub mod endpoints {
    /// Query node (height, UTXO, fee, pending-pool lookups).
    pub const LOCAL_QUERY: &str = "http://localhost:2826";
    /// Submission node.
    pub const LOCAL_SUBMIT: &str = "http://localhost:2825";
}
