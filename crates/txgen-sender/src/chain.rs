//! Chain access seam.
//!
//! The orchestrators only touch the chain through this trait, so tests run
//! them against an in-memory chain.

use async_trait::async_trait;
use txgen_rpc::{ChainRpc, RpcError, SubmitAck};
use txgen_tx::Transaction;
use txgen_types::{Address, FeeQuote, Hash, UnspentOutput};

/// Chain query and submission operations the orchestrators need.
#[async_trait]
pub trait ChainSource: Send + Sync {
    /// Current chain height.
    async fn get_height(&self) -> Result<u64, RpcError>;

    /// Unspent outputs owned by an address.
    async fn get_utxos(&self, address: &Address) -> Result<Vec<UnspentOutput>, RpcError>;

    /// Fee quote for a transaction of the given byte size.
    async fn get_fee_estimate(&self, tx_size: usize) -> Result<FeeQuote, RpcError>;

    /// A broadcast-but-unconfirmed transaction, by hash.
    async fn get_pending_transaction(&self, hash: &Hash) -> Result<Transaction, RpcError>;

    /// Current on-chain states of the given outputs.
    async fn get_utxo_states(&self, utxos: &[Hash]) -> Result<Vec<UnspentOutput>, RpcError>;

    /// Submit a signed transaction.
    async fn submit(&self, tx: &Transaction) -> Result<SubmitAck, RpcError>;
}

#[async_trait]
impl ChainSource for ChainRpc {
    async fn get_height(&self) -> Result<u64, RpcError> {
        ChainRpc::get_height(self).await
    }

    async fn get_utxos(&self, address: &Address) -> Result<Vec<UnspentOutput>, RpcError> {
        ChainRpc::get_utxos(self, address).await
    }

    async fn get_fee_estimate(&self, tx_size: usize) -> Result<FeeQuote, RpcError> {
        ChainRpc::get_fee_estimate(self, tx_size).await
    }

    async fn get_pending_transaction(&self, hash: &Hash) -> Result<Transaction, RpcError> {
        ChainRpc::get_pending_transaction(self, hash).await
    }

    async fn get_utxo_states(&self, utxos: &[Hash]) -> Result<Vec<UnspentOutput>, RpcError> {
        ChainRpc::get_utxo_states(self, utxos).await
    }

    async fn submit(&self, tx: &Transaction) -> Result<SubmitAck, RpcError> {
        ChainRpc::send_transaction(self, tx).await
    }
}
