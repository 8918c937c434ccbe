//! Typed client for the chain's query and submission API.

use crate::client::{RpcClient, RpcConfig};
use crate::error::RpcError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use txgen_tx::Transaction;
use txgen_types::{Address, FeeQuote, Hash, UnspentOutput};

#[derive(Debug, Deserialize)]
struct HeightResponse {
    height: u64,
}

/// Acknowledgement of a submitted transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitAck {
    /// Hash the node computed for the accepted transaction.
    pub tx_hash: Hash,
}

/// Decode a response body, tagging shape mismatches with the endpoint.
fn parse<T: DeserializeOwned>(endpoint: &str, val: Value) -> Result<T, RpcError> {
    serde_json::from_value(val).map_err(|e| RpcError::BadResponse {
        endpoint: endpoint.to_string(),
        detail: e.to_string(),
    })
}

/// Async client for the chain query/submit endpoints.
///
/// Queries and submissions can go to different nodes; `new` points both at
/// the same URL.
pub struct ChainRpc {
    query: RpcClient,
    submit: RpcClient,
}

impl ChainRpc {
    /// Create a client with query and submission on the same node.
    pub fn new(url: &str) -> Self {
        Self {
            query: RpcClient::new(url),
            submit: RpcClient::new(url),
        }
    }

    /// Create a client with separate query and submission nodes.
    pub fn with_endpoints(query_url: &str, submit_url: &str) -> Self {
        Self {
            query: RpcClient::new(query_url),
            submit: RpcClient::new(submit_url),
        }
    }

    /// Create with full configuration for both endpoints.
    pub fn with_configs(query: RpcConfig, submit: RpcConfig) -> Self {
        Self {
            query: RpcClient::with_config(query),
            submit: RpcClient::with_config(submit),
        }
    }

    /// The query-side RPC client, for custom calls.
    pub fn client(&self) -> &RpcClient {
        &self.query
    }

    /// Current chain height.
    pub async fn get_height(&self) -> Result<u64, RpcError> {
        let val = self.query.get("/block_height").await?;
        let resp: HeightResponse = parse("/block_height", val)?;
        Ok(resp.height)
    }

    /// Unspent outputs owned by an address.
    pub async fn get_utxos(&self, address: &Address) -> Result<Vec<UnspentOutput>, RpcError> {
        let endpoint = format!("/utxo/{}", address);
        let val = self.query.get(&endpoint).await?;
        parse(&endpoint, val)
    }

    /// Fee quote for a transaction of the given byte size.
    pub async fn get_fee_estimate(&self, tx_size: usize) -> Result<FeeQuote, RpcError> {
        let endpoint = format!("/transaction/fees/{}", tx_size);
        let val = self.query.get(&endpoint).await?;
        parse(&endpoint, val)
    }

    /// Fetch a broadcast-but-unconfirmed transaction by hash.
    ///
    /// A 404 surfaces as [`RpcError::NotFound`]; the caller decides what a
    /// missing pending transaction means.
    pub async fn get_pending_transaction(&self, hash: &Hash) -> Result<Transaction, RpcError> {
        let endpoint = format!("/transaction/pending/{}", hash);
        let val = self.query.get(&endpoint).await?;
        parse(&endpoint, val)
    }

    /// Current on-chain states of the given outputs.
    pub async fn get_utxo_states(&self, utxos: &[Hash]) -> Result<Vec<UnspentOutput>, RpcError> {
        let body = serde_json::json!({ "utxos": utxos });
        let val = self.query.post("/utxo_info", &body).await?;
        parse("/utxo_info", val)
    }

    /// Submit a signed transaction. Fire-and-forget: waits only for the
    /// node's acknowledgement, not confirmation.
    pub async fn send_transaction(&self, tx: &Transaction) -> Result<SubmitAck, RpcError> {
        let body = serde_json::json!({ "tx": tx });
        let val = self.submit.put("/transaction", &body).await?;
        parse("/transaction", val)
    }
}
