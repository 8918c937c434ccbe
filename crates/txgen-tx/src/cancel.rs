//! Cancellation transaction assembly.
//!
//! A cancellation re-spends every input of a still-pending transaction back
//! to the owners of those inputs, at a fee strictly above the original's, so
//! the network prefers it and the original can never confirm. The outcome is
//! always a [`CancelResult`] code; assembly itself never fails abruptly.

use crate::types::{Transaction, TxInput, TxOutput, Unlock};
use ed25519_dalek::{Signer, SigningKey};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use txgen_types::{Address, Hash, UnspentOutput};

/// Discriminated outcome of cancellation assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CancelResultCode {
    Success,
    /// The original transaction is structurally unusable (no inputs, no
    /// outputs, duplicate inputs, or outputs exceeding inputs).
    InvalidTransaction,
    /// An input's current UTXO state was not supplied by the chain.
    NotFoundUtxo,
    /// No available key controls one of the consumed outputs.
    NotFoundKey,
    /// The inputs cannot cover a fee above the original's.
    NotEnoughFee,
}

impl fmt::Display for CancelResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Success => "Success",
            Self::InvalidTransaction => "InvalidTransaction",
            Self::NotFoundUtxo => "NotFoundUtxo",
            Self::NotFoundKey => "NotFoundKey",
            Self::NotEnoughFee => "NotEnoughFee",
        };
        f.write_str(s)
    }
}

/// Result of [`TxCanceller::build`]: a code plus the replacement
/// transaction on success.
#[derive(Debug)]
pub struct CancelResult {
    pub code: CancelResultCode,
    pub tx: Option<Transaction>,
}

impl CancelResult {
    fn failed(code: CancelResultCode) -> Self {
        Self { code, tx: None }
    }
}

/// Assembles a cancellation for one pending transaction.
pub struct TxCanceller<'a> {
    original: &'a Transaction,
    states: &'a [UnspentOutput],
    keys: &'a [(Address, SigningKey)],
}

impl<'a> TxCanceller<'a> {
    /// `states` are the current on-chain records of the outputs the original
    /// consumes; `keys` is the full set of keys available for re-signing.
    pub fn new(
        original: &'a Transaction,
        states: &'a [UnspentOutput],
        keys: &'a [(Address, SigningKey)],
    ) -> Self {
        Self {
            original,
            states,
            keys,
        }
    }

    /// Build the replacement transaction. `min_fee` is the network's medium
    /// quote for a transaction of the replacement's size; the effective fee
    /// is raised above the original's implicit fee if that quote is not
    /// already higher.
    pub fn build(&self, min_fee: u64) -> CancelResult {
        if self.original.inputs.is_empty() || self.original.outputs.is_empty() {
            return CancelResult::failed(CancelResultCode::InvalidTransaction);
        }

        let by_utxo: HashMap<Hash, &UnspentOutput> =
            self.states.iter().map(|s| (s.utxo, s)).collect();
        let key_by_address: HashMap<&Address, &SigningKey> =
            self.keys.iter().map(|(addr, key)| (addr, key)).collect();

        // Resolve each input to its current state and owning key, in input
        // order. Duplicate inputs would double-count value.
        let mut resolved: Vec<&UnspentOutput> = Vec::with_capacity(self.original.inputs.len());
        let mut seen: HashSet<Hash> = HashSet::new();
        for input in &self.original.inputs {
            if !seen.insert(input.utxo) {
                return CancelResult::failed(CancelResultCode::InvalidTransaction);
            }
            let Some(state) = by_utxo.get(&input.utxo).copied() else {
                return CancelResult::failed(CancelResultCode::NotFoundUtxo);
            };
            if !key_by_address.contains_key(&state.address) {
                return CancelResult::failed(CancelResultCode::NotFoundKey);
            }
            resolved.push(state);
        }

        let Some(input_sum) = resolved
            .iter()
            .try_fold(0u64, |acc, s| acc.checked_add(s.amount))
        else {
            return CancelResult::failed(CancelResultCode::InvalidTransaction);
        };
        let Some(output_sum) = self
            .original
            .outputs
            .iter()
            .try_fold(0u64, |acc, o| acc.checked_add(o.amount))
        else {
            return CancelResult::failed(CancelResultCode::InvalidTransaction);
        };
        if output_sum > input_sum {
            return CancelResult::failed(CancelResultCode::InvalidTransaction);
        }
        let original_fee = input_sum - output_sum;

        // Strictly outbid the original.
        let fee = min_fee.max(original_fee.saturating_add(1));
        if input_sum <= fee {
            return CancelResult::failed(CancelResultCode::NotEnoughFee);
        }

        // One payback output per distinct owner, in first-seen order.
        let mut owners: Vec<Address> = Vec::new();
        let mut paybacks: HashMap<Address, u64> = HashMap::new();
        for state in &resolved {
            let entry = paybacks.entry(state.address).or_insert_with(|| {
                owners.push(state.address);
                0
            });
            *entry += state.amount;
        }

        // The fee comes out of the largest payback (first seen on ties).
        let mut payer = owners[0];
        for addr in &owners[1..] {
            if paybacks[addr] > paybacks[&payer] {
                payer = *addr;
            }
        }
        if paybacks[&payer] <= fee {
            return CancelResult::failed(CancelResultCode::NotEnoughFee);
        }
        if let Some(amount) = paybacks.get_mut(&payer) {
            *amount -= fee;
        }

        let outputs: Vec<TxOutput> = owners
            .iter()
            .filter(|addr| paybacks[addr] > 0)
            .map(|addr| TxOutput {
                amount: paybacks[addr],
                address: *addr,
            })
            .collect();

        let mut tx = Transaction {
            inputs: self
                .original
                .inputs
                .iter()
                .map(|input| TxInput::new(input.utxo))
                .collect(),
            outputs,
            payload: Vec::new(),
            lock_height: 0,
        };

        let challenge = tx.challenge_hash();
        for (input, state) in tx.inputs.iter_mut().zip(&resolved) {
            let key = key_by_address[&state.address];
            let sig = key.sign(challenge.as_bytes());
            input.unlock = Unlock(sig.to_bytes().to_vec());
        }

        CancelResult {
            code: CancelResultCode::Success,
            tx: Some(tx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TransactionBuilder;

    fn key(byte: u8) -> SigningKey {
        SigningKey::from_bytes(&[byte; 32])
    }

    fn addr(byte: u8) -> Address {
        Address::from_key(&key(byte).verifying_key())
    }

    fn utxo(tag: &[u8], amount: u64, owner: u8) -> UnspentOutput {
        UnspentOutput {
            utxo: Hash::digest(tag),
            amount,
            address: addr(owner),
            unlock_height: 0,
        }
    }

    fn keys(bytes: &[u8]) -> Vec<(Address, SigningKey)> {
        bytes.iter().map(|&b| (addr(b), key(b))).collect()
    }

    /// A pending payment from owner 1 to owner 2, fee 10.
    fn pending() -> (Transaction, Vec<UnspentOutput>) {
        let states = vec![utxo(b"a", 100, 1), utxo(b"b", 60, 1)];
        let tx = TransactionBuilder::new(key(1))
            .add_input(states[0].utxo, 100)
            .add_input(states[1].utxo, 60)
            .add_output(addr(2), 150)
            .sign(10)
            .unwrap();
        (tx, states)
    }

    #[test]
    fn test_success_respends_same_inputs() {
        let (original, states) = pending();
        let keys = keys(&[1, 2]);
        let result = TxCanceller::new(&original, &states, &keys).build(5);
        assert_eq!(result.code, CancelResultCode::Success);
        let tx = result.tx.unwrap();
        let original_utxos: Vec<Hash> = original.inputs.iter().map(|i| i.utxo).collect();
        let cancel_utxos: Vec<Hash> = tx.inputs.iter().map(|i| i.utxo).collect();
        assert_eq!(original_utxos, cancel_utxos);
        // Single owner gets everything back minus the fee (original fee 10,
        // so the cancel pays 11).
        assert_eq!(tx.outputs.len(), 1);
        assert_eq!(tx.outputs[0].address, addr(1));
        assert_eq!(tx.outputs[0].amount, 160 - 11);
    }

    #[test]
    fn test_fee_exceeds_original() {
        let (original, states) = pending();
        let keys = keys(&[1]);
        // Medium quote below the original fee: must still outbid it.
        let result = TxCanceller::new(&original, &states, &keys).build(3);
        let tx = result.tx.unwrap();
        let paid: u64 = 160 - tx.output_sum();
        assert!(paid > 10);
    }

    #[test]
    fn test_quote_used_when_higher() {
        let (original, states) = pending();
        let keys = keys(&[1]);
        let result = TxCanceller::new(&original, &states, &keys).build(25);
        let tx = result.tx.unwrap();
        assert_eq!(160 - tx.output_sum(), 25);
    }

    #[test]
    fn test_missing_state_is_not_found_utxo() {
        let (original, states) = pending();
        let keys = keys(&[1]);
        let result = TxCanceller::new(&original, &states[..1], &keys).build(5);
        assert_eq!(result.code, CancelResultCode::NotFoundUtxo);
        assert!(result.tx.is_none());
    }

    #[test]
    fn test_unknown_owner_is_not_found_key() {
        let (original, states) = pending();
        let keys = keys(&[2, 3]);
        let result = TxCanceller::new(&original, &states, &keys).build(5);
        assert_eq!(result.code, CancelResultCode::NotFoundKey);
    }

    #[test]
    fn test_dust_inputs_are_not_enough_fee() {
        let states = vec![utxo(b"a", 4, 1)];
        let original = TransactionBuilder::new(key(1))
            .add_input(states[0].utxo, 4)
            .add_output(addr(2), 2)
            .sign(2)
            .unwrap();
        let keys = keys(&[1]);
        let result = TxCanceller::new(&original, &states, &keys).build(100);
        assert_eq!(result.code, CancelResultCode::NotEnoughFee);
    }

    #[test]
    fn test_multi_owner_paybacks() {
        let states = vec![utxo(b"a", 100, 1), utxo(b"b", 80, 3)];
        // Hand-build a two-owner pending transaction.
        let mut original = Transaction {
            inputs: vec![TxInput::new(states[0].utxo), TxInput::new(states[1].utxo)],
            outputs: vec![TxOutput {
                amount: 170,
                address: addr(2),
            }],
            payload: Vec::new(),
            lock_height: 0,
        };
        let challenge = original.challenge_hash();
        original.inputs[0].unlock = Unlock(key(1).sign(challenge.as_bytes()).to_bytes().to_vec());
        original.inputs[1].unlock = Unlock(key(3).sign(challenge.as_bytes()).to_bytes().to_vec());

        let keys = keys(&[1, 3]);
        let result = TxCanceller::new(&original, &states, &keys).build(5);
        assert_eq!(result.code, CancelResultCode::Success);
        let tx = result.tx.unwrap();
        assert_eq!(tx.outputs.len(), 2);
        // Original fee is 10, so the cancel pays 11, out of owner 1's 100.
        assert_eq!(tx.outputs[0].address, addr(1));
        assert_eq!(tx.outputs[0].amount, 89);
        assert_eq!(tx.outputs[1].address, addr(3));
        assert_eq!(tx.outputs[1].amount, 80);
    }

    #[test]
    fn test_overflowing_input_states_are_invalid() {
        let states = vec![utxo(b"a", u64::MAX, 1), utxo(b"b", 5, 1)];
        let original = Transaction {
            inputs: vec![TxInput::new(states[0].utxo), TxInput::new(states[1].utxo)],
            outputs: vec![TxOutput {
                amount: 1,
                address: addr(2),
            }],
            payload: Vec::new(),
            lock_height: 0,
        };
        let result = TxCanceller::new(&original, &states, &keys(&[1])).build(5);
        assert_eq!(result.code, CancelResultCode::InvalidTransaction);
    }

    #[test]
    fn test_cancel_signatures_verify() {
        let (original, states) = pending();
        let keys = keys(&[1]);
        let tx = TxCanceller::new(&original, &states, &keys).build(5).tx.unwrap();
        let challenge = tx.challenge_hash();
        for input in &tx.inputs {
            assert!(input.unlock.verify(&addr(1), &challenge));
        }
    }

    #[test]
    fn test_empty_original_is_invalid() {
        let original = Transaction {
            inputs: Vec::new(),
            outputs: Vec::new(),
            payload: Vec::new(),
            lock_height: 0,
        };
        let result = TxCanceller::new(&original, &[], &[]).build(5);
        assert_eq!(result.code, CancelResultCode::InvalidTransaction);
    }
}
