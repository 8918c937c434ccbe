//! Random payment generation.
//!
//! One call produces one synthetic payment: sample a funded source wallet,
//! pick a distinct destination, spend a random 20–69% slice of the source's
//! unspent value, and submit. Sources that cannot fund the draw are excluded
//! and resampled, bounded by the pool size and the configured attempt cap.
//!
//! Calls share no mutable state, so concurrent invocations are safe as long
//! as the chain client and key registry allow concurrent reads.

use crate::chain::ChainSource;
use crate::config::{EmptySourcePolicy, SenderConfig};
use crate::error::SenderError;
use crate::gate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use txgen_tx::{estimate_tx_size, Transaction, TransactionBuilder, TxError};
use txgen_types::constants::{SPEND_PERCENT_MAX, SPEND_PERCENT_MIN};
use txgen_types::Hash;
use txgen_wallet::utxo::{select_utxos, SelectionError};
use txgen_wallet::KeyRegistry;

/// Outcome of a successful send.
#[derive(Debug, Clone)]
pub struct SendReport {
    /// Content hash of the submitted transaction.
    pub tx_hash: Hash,
    /// Chain height at submission time.
    pub height: u64,
    /// Source wallet index.
    pub source: usize,
    /// Destination wallet index.
    pub destination: usize,
    /// Requested spend amount (the destination also receives any selection
    /// remainder above this, minus the fee).
    pub amount: u64,
    /// Fee paid.
    pub fee: u64,
}

struct BuiltPayment {
    tx: Transaction,
    source: usize,
    destination: usize,
    amount: u64,
    fee: u64,
}

/// Generates one random payment per call.
pub struct RandomPaymentGenerator<'a, C: ChainSource> {
    config: &'a SenderConfig,
    chain: &'a C,
    keys: &'a KeyRegistry,
}

impl<'a, C: ChainSource> RandomPaymentGenerator<'a, C> {
    pub fn new(config: &'a SenderConfig, chain: &'a C, keys: &'a KeyRegistry) -> Self {
        Self {
            config,
            chain,
            keys,
        }
    }

    /// Generate and submit one payment.
    pub async fn send(&self) -> Result<SendReport, SenderError> {
        let mut rng = StdRng::from_entropy();
        self.send_with_rng(&mut rng).await
    }

    /// Generate and submit one payment, drawing randomness from `rng`.
    pub async fn send_with_rng<R: Rng + Send>(
        &self,
        rng: &mut R,
    ) -> Result<SendReport, SenderError> {
        let height = self.chain.get_height().await?;
        let height = gate::check_send(height, self.config.window_end).ready()?;

        let built = self.build_payment(height, rng).await?;
        let tx_hash = built.tx.hash_full();
        log::info!(
            "TX_HASH (send / {}): {} ({} -> {}, amount {}, fee {})",
            height,
            tx_hash,
            built.source,
            built.destination,
            built.amount,
            built.fee
        );

        self.chain
            .submit(&built.tx)
            .await
            .map_err(|source| SenderError::Submission { source })?;

        Ok(SendReport {
            tx_hash,
            height,
            source: built.source,
            destination: built.destination,
            amount: built.amount,
            fee: built.fee,
        })
    }

    /// Sample sources without replacement until one can fund a payment.
    async fn build_payment<R: Rng + Send>(
        &self,
        height: u64,
        rng: &mut R,
    ) -> Result<BuiltPayment, SenderError> {
        let key_count = self.keys.len();
        if key_count < 2 {
            return Err(SenderError::PoolTooSmall { key_count });
        }

        let mut excluded: HashSet<usize> = HashSet::new();
        let max_attempts = self.config.max_attempts.max(1);

        for _ in 0..max_attempts {
            let remaining: Vec<usize> =
                (0..key_count).filter(|i| !excluded.contains(i)).collect();
            if remaining.is_empty() {
                break;
            }
            let source = remaining[rng.gen_range(0..remaining.len())];
            excluded.insert(source);
            let source_pair = self.keys.key(source)?;

            let utxos = self.chain.get_utxos(&source_pair.address).await?;
            if utxos.is_empty() {
                match self.config.empty_source_policy {
                    EmptySourcePolicy::Abort => {
                        return Err(SenderError::NoFundedSource {
                            attempted: excluded.len(),
                        })
                    }
                    EmptySourcePolicy::Retry => continue,
                }
            }

            let sum: u64 = utxos.iter().map(|u| u.amount).sum();
            if sum == 0 {
                continue;
            }

            let destination = loop {
                let candidate = rng.gen_range(0..key_count);
                if candidate != source {
                    break candidate;
                }
            };
            let destination_pair = self.keys.key(destination)?;

            // Provisional sizing before the input count is known.
            let provisional = estimate_tx_size(2, 2, 0);
            let quote = self.chain.get_fee_estimate(provisional).await?;
            log::debug!("provisional fee quote for {} bytes: {}", provisional, quote.medium);

            let percent = rng.gen_range(SPEND_PERCENT_MIN..=SPEND_PERCENT_MAX);
            let amount = (u128::from(sum) * u128::from(percent) / 100) as u64;

            let selection = match select_utxos(&utxos, amount, height) {
                Ok(selection) => selection,
                Err(SelectionError::Insufficient { .. }) | Err(SelectionError::ZeroTarget) => {
                    continue
                }
            };

            // Final sizing with the real input count.
            let final_size = estimate_tx_size(selection.selected.len(), 2, 0);
            let quote = self.chain.get_fee_estimate(final_size).await?;
            let fee = quote.medium;

            let mut builder = TransactionBuilder::new(source_pair.secret.clone());
            for output in &selection.selected {
                builder = builder.add_input(output.utxo, output.amount);
            }
            builder = builder.add_output(destination_pair.address, amount);

            let tx = match builder.sign(fee) {
                Ok(tx) => tx,
                // Selection covered the amount but not the fee on top.
                Err(TxError::InsufficientInputs { .. }) => continue,
                Err(e) => return Err(e.into()),
            };

            return Ok(BuiltPayment {
                tx,
                source,
                destination,
                amount,
                fee,
            });
        }

        Err(SenderError::NoFundedSource {
            attempted: excluded.len(),
        })
    }
}
