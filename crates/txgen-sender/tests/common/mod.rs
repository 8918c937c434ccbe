//! In-memory chain for orchestrator tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use txgen_rpc::{RpcError, SubmitAck};
use txgen_sender::ChainSource;
use txgen_tx::Transaction;
use txgen_types::{Address, FeeQuote, Hash, UnspentOutput};

/// Mock chain: height, per-address UTXO sets, pending pool, and a record of
/// every submission and fee-quote request.
#[derive(Default)]
pub struct MockChain {
    pub height: Mutex<u64>,
    pub utxos: Mutex<HashMap<Address, Vec<UnspentOutput>>>,
    pub pending: Mutex<HashMap<Hash, Transaction>>,
    pub states: Mutex<HashMap<Hash, UnspentOutput>>,
    pub submitted: Mutex<Vec<Transaction>>,
    pub fee_requests: Mutex<Vec<usize>>,
    pub fail_height: Mutex<bool>,
    pub fail_submit: Mutex<bool>,
}

impl MockChain {
    pub fn at_height(height: u64) -> Self {
        let chain = Self::default();
        *chain.height.lock().unwrap() = height;
        chain
    }

    pub fn fund(&self, address: Address, amounts: &[u64]) {
        let mut utxos = self.utxos.lock().unwrap();
        let entry = utxos.entry(address).or_default();
        for (i, &amount) in amounts.iter().enumerate() {
            let utxo = Hash::digest(format!("{}:{}:{}", address, i, amount).as_bytes());
            let output = UnspentOutput {
                utxo,
                amount,
                address,
                unlock_height: 0,
            };
            self.states.lock().unwrap().insert(utxo, output.clone());
            entry.push(output);
        }
    }

    pub fn add_pending(&self, tx: Transaction) -> Hash {
        let hash = tx.hash_full();
        self.pending.lock().unwrap().insert(hash, tx);
        hash
    }

    pub fn submitted_count(&self) -> usize {
        self.submitted.lock().unwrap().len()
    }
}

/// Fee model: one tenth of the transaction size per tier step.
fn quote_for(size: usize) -> FeeQuote {
    let medium = (size / 10) as u64;
    FeeQuote {
        low: medium / 2,
        medium,
        high: medium * 2,
    }
}

#[async_trait]
impl ChainSource for MockChain {
    async fn get_height(&self) -> Result<u64, RpcError> {
        if *self.fail_height.lock().unwrap() {
            return Err(RpcError::HttpStatus {
                endpoint: "/block_height".into(),
                status: 503,
                body: "unavailable".into(),
            });
        }
        Ok(*self.height.lock().unwrap())
    }

    async fn get_utxos(&self, address: &Address) -> Result<Vec<UnspentOutput>, RpcError> {
        Ok(self
            .utxos
            .lock()
            .unwrap()
            .get(address)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_fee_estimate(&self, tx_size: usize) -> Result<FeeQuote, RpcError> {
        self.fee_requests.lock().unwrap().push(tx_size);
        Ok(quote_for(tx_size))
    }

    async fn get_pending_transaction(&self, hash: &Hash) -> Result<Transaction, RpcError> {
        self.pending
            .lock()
            .unwrap()
            .get(hash)
            .cloned()
            .ok_or(RpcError::NotFound {
                resource: format!("/transaction/pending/{}", hash),
            })
    }

    async fn get_utxo_states(&self, utxos: &[Hash]) -> Result<Vec<UnspentOutput>, RpcError> {
        let states = self.states.lock().unwrap();
        Ok(utxos.iter().filter_map(|h| states.get(h).cloned()).collect())
    }

    async fn submit(&self, tx: &Transaction) -> Result<SubmitAck, RpcError> {
        if *self.fail_submit.lock().unwrap() {
            return Err(RpcError::HttpStatus {
                endpoint: "/transaction".into(),
                status: 400,
                body: "rejected".into(),
            });
        }
        self.submitted.lock().unwrap().push(tx.clone());
        Ok(SubmitAck {
            tx_hash: tx.hash_full(),
        })
    }
}
