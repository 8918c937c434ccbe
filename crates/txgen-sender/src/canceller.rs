//! Pending-transaction cancellation.
//!
//! Looks up a still-pending transaction, fetches the current state of the
//! outputs it consumes, and submits a replacement that re-spends them at a
//! higher fee. A missing pending transaction is terminal: it usually means
//! the original already confirmed or was dropped, and retrying cannot help.

use crate::chain::ChainSource;
use crate::error::SenderError;
use crate::gate;
use std::collections::HashSet;
use txgen_tx::{estimate_tx_size, CancelResultCode, TxCanceller};
use txgen_types::{Address, Hash};
use txgen_wallet::KeyRegistry;

/// Outcome of a successful cancellation.
#[derive(Debug, Clone)]
pub struct CancelReport {
    pub original_hash: Hash,
    pub original_size: usize,
    pub cancel_hash: Hash,
    pub cancel_size: usize,
    /// Chain height at submission time.
    pub height: u64,
}

/// Builds and submits cancellation transactions.
pub struct CancellationBuilder<'a, C: ChainSource> {
    chain: &'a C,
    keys: &'a KeyRegistry,
}

impl<'a, C: ChainSource> CancellationBuilder<'a, C> {
    pub fn new(chain: &'a C, keys: &'a KeyRegistry) -> Self {
        Self { chain, keys }
    }

    /// Cancel the pending transaction with the given hash.
    pub async fn cancel(&self, hash: &Hash) -> Result<CancelReport, SenderError> {
        let height = self.chain.get_height().await?;
        let height = gate::check_cancel(height).ready()?;

        let original = match self.chain.get_pending_transaction(hash).await {
            Ok(tx) => tx,
            Err(txgen_rpc::RpcError::NotFound { .. }) => {
                return Err(SenderError::OriginalNotFound { hash: *hash })
            }
            Err(e) => return Err(e.into()),
        };

        let consumed: Vec<Hash> = original.inputs.iter().map(|i| i.utxo).collect();
        let states = self.chain.get_utxo_states(&consumed).await?;
        for state in &states {
            match self.keys.index_of(&state.address) {
                Some(index) => {
                    log::debug!("input {} owned by pool wallet {}", state.utxo, index)
                }
                None => log::debug!("input {} owned by named wallet {}", state.utxo, state.address),
            }
        }

        // Size the replacement for its quote: same inputs, one payback
        // output per distinct owner.
        let owners: HashSet<Address> = states.iter().map(|s| s.address).collect();
        let size = estimate_tx_size(original.inputs.len(), owners.len().max(1), 0);
        let quote = self.chain.get_fee_estimate(size).await?;

        let keys = self.keys.signing_pairs();
        let result = TxCanceller::new(&original, &states, &keys).build(quote.medium);
        if result.code != CancelResultCode::Success {
            return Err(SenderError::Assembly { code: result.code });
        }
        let cancel_tx = result.tx.ok_or(SenderError::Assembly {
            code: CancelResultCode::InvalidTransaction,
        })?;

        let cancel_hash = cancel_tx.hash_full();
        log::info!("TX_HASH (cancel / {}): {}", height, cancel_hash);

        self.chain
            .submit(&cancel_tx)
            .await
            .map_err(|source| SenderError::Submission { source })?;

        Ok(CancelReport {
            original_hash: *hash,
            original_size: original.num_bytes(),
            cancel_hash,
            cancel_size: cancel_tx.num_bytes(),
            height,
        })
    }
}
