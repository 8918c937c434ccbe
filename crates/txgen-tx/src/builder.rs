//! Payment transaction builder.
//!
//! Assembles inputs and outputs for a single-owner spend, then signs every
//! input with the owner key. Any value left over after the outputs and fee
//! folds into the sole destination when there is exactly one, otherwise it
//! comes back to the owner as change; the builder never burns value.

use crate::types::{Transaction, TxInput, TxOutput, Unlock};
use crate::TxError;
use ed25519_dalek::{Signer, SigningKey};
use txgen_types::{Address, Hash};

/// Builder for transactions whose inputs are all owned by one key.
pub struct TransactionBuilder {
    owner: SigningKey,
    owner_address: Address,
    inputs: Vec<(Hash, u64)>,
    outputs: Vec<TxOutput>,
    lock_height: u64,
}

impl TransactionBuilder {
    pub fn new(owner: SigningKey) -> Self {
        let owner_address = Address::from_key(&owner.verifying_key());
        Self {
            owner,
            owner_address,
            inputs: Vec::new(),
            outputs: Vec::new(),
            lock_height: 0,
        }
    }

    /// Add an unspent output as an input, at its recorded value.
    pub fn add_input(mut self, utxo: Hash, amount: u64) -> Self {
        self.inputs.push((utxo, amount));
        self
    }

    /// Add a destination output.
    pub fn add_output(mut self, address: Address, amount: u64) -> Self {
        self.outputs.push(TxOutput { amount, address });
        self
    }

    pub fn lock_height(mut self, height: u64) -> Self {
        self.lock_height = height;
        self
    }

    /// Finalize with the given fee and sign every input.
    pub fn sign(self, fee: u64) -> Result<Transaction, TxError> {
        if self.inputs.is_empty() {
            return Err(TxError::NoInputs);
        }
        if self.outputs.is_empty() {
            return Err(TxError::NoDestinations);
        }
        if let Some(out) = self.outputs.iter().find(|o| o.amount == 0) {
            return Err(TxError::ZeroAmount(out.address));
        }

        let input_sum = self
            .inputs
            .iter()
            .try_fold(0u64, |acc, (_, amount)| acc.checked_add(*amount))
            .ok_or(TxError::ValueOverflow)?;
        let output_sum = self
            .outputs
            .iter()
            .try_fold(0u64, |acc, o| acc.checked_add(o.amount))
            .ok_or(TxError::ValueOverflow)?;
        let need = output_sum.checked_add(fee).ok_or(TxError::ValueOverflow)?;
        if input_sum < need {
            return Err(TxError::InsufficientInputs {
                need,
                have: input_sum,
            });
        }

        let mut outputs = self.outputs;
        let remainder = input_sum - need;
        if remainder > 0 {
            if outputs.len() == 1 {
                outputs[0].amount += remainder;
            } else {
                outputs.push(TxOutput {
                    amount: remainder,
                    address: self.owner_address,
                });
            }
        }

        let mut tx = Transaction {
            inputs: self.inputs.iter().map(|(utxo, _)| TxInput::new(*utxo)).collect(),
            outputs,
            payload: Vec::new(),
            lock_height: self.lock_height,
        };

        let challenge = tx.challenge_hash();
        let sig = self.owner.sign(challenge.as_bytes());
        let unlock = Unlock(sig.to_bytes().to_vec());
        for input in &mut tx.inputs {
            input.unlock = unlock.clone();
        }
        Ok(tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(byte: u8) -> SigningKey {
        SigningKey::from_bytes(&[byte; 32])
    }

    fn addr(byte: u8) -> Address {
        Address::from_key(&key(byte).verifying_key())
    }

    #[test]
    fn test_remainder_folds_into_single_output() {
        let tx = TransactionBuilder::new(key(1))
            .add_input(Hash::digest(b"a"), 150)
            .add_output(addr(2), 100)
            .sign(10)
            .unwrap();
        // 150 - 100 - 10 = 40 folds into the destination.
        assert_eq!(tx.outputs.len(), 1);
        assert_eq!(tx.outputs[0].amount, 140);
    }

    #[test]
    fn test_change_output_with_multiple_destinations() {
        let tx = TransactionBuilder::new(key(1))
            .add_input(Hash::digest(b"a"), 200)
            .add_output(addr(2), 50)
            .add_output(addr(3), 60)
            .sign(10)
            .unwrap();
        assert_eq!(tx.outputs.len(), 3);
        assert_eq!(tx.outputs[2].amount, 80);
        assert_eq!(tx.outputs[2].address, addr(1));
    }

    #[test]
    fn test_value_conservation() {
        let tx = TransactionBuilder::new(key(1))
            .add_input(Hash::digest(b"a"), 100)
            .add_input(Hash::digest(b"b"), 50)
            .add_output(addr(2), 120)
            .sign(7)
            .unwrap();
        assert_eq!(tx.output_sum() + 7, 150);
    }

    #[test]
    fn test_insufficient_inputs() {
        let err = TransactionBuilder::new(key(1))
            .add_input(Hash::digest(b"a"), 100)
            .add_output(addr(2), 100)
            .sign(1)
            .unwrap_err();
        assert!(matches!(
            err,
            TxError::InsufficientInputs { need: 101, have: 100 }
        ));
    }

    #[test]
    fn test_overflowing_inputs_rejected() {
        let err = TransactionBuilder::new(key(1))
            .add_input(Hash::digest(b"a"), u64::MAX)
            .add_input(Hash::digest(b"b"), 2)
            .add_output(addr(2), 10)
            .sign(0)
            .unwrap_err();
        assert!(matches!(err, TxError::ValueOverflow));
    }

    #[test]
    fn test_overflowing_fee_rejected() {
        let err = TransactionBuilder::new(key(1))
            .add_input(Hash::digest(b"a"), 100)
            .add_output(addr(2), u64::MAX)
            .sign(1)
            .unwrap_err();
        assert!(matches!(err, TxError::ValueOverflow));
    }

    #[test]
    fn test_no_inputs_rejected() {
        let err = TransactionBuilder::new(key(1))
            .add_output(addr(2), 10)
            .sign(0)
            .unwrap_err();
        assert!(matches!(err, TxError::NoInputs));
    }

    #[test]
    fn test_no_destinations_rejected() {
        let err = TransactionBuilder::new(key(1))
            .add_input(Hash::digest(b"a"), 10)
            .sign(0)
            .unwrap_err();
        assert!(matches!(err, TxError::NoDestinations));
    }

    #[test]
    fn test_inputs_signed_by_owner() {
        let owner = key(1);
        let owner_addr = Address::from_key(&owner.verifying_key());
        let tx = TransactionBuilder::new(owner)
            .add_input(Hash::digest(b"a"), 100)
            .add_output(addr(2), 90)
            .sign(10)
            .unwrap();
        let challenge = tx.challenge_hash();
        for input in &tx.inputs {
            assert!(input.unlock.verify(&owner_addr, &challenge));
        }
    }
}
