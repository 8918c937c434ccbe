//! Typed transaction structure and canonical encoding.
//!
//! The fee is implicit: `sum(input values) - sum(output values)`. Input
//! values live on the chain, not in the transaction, so fee recovery needs
//! the current UTXO states (see [`crate::cancel`]).

use ed25519_dalek::{Signature, Verifier};
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use txgen_types::{Address, Hash};

/// An input unlock: the ed25519 signature over the challenge hash.
/// Empty until the transaction is signed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Unlock(pub Vec<u8>);

impl Unlock {
    pub fn is_signed(&self) -> bool {
        !self.0.is_empty()
    }

    /// Check the unlock against the owning address and challenge hash.
    pub fn verify(&self, address: &Address, challenge: &Hash) -> bool {
        let Ok(key) = address.verifying_key() else {
            return false;
        };
        let bytes: [u8; 64] = match self.0.as_slice().try_into() {
            Ok(bytes) => bytes,
            Err(_) => return false,
        };
        let sig = Signature::from_bytes(&bytes);
        key.verify(challenge.as_bytes(), &sig).is_ok()
    }
}

impl Serialize for Unlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(&self.0))
    }
}

impl<'de> Deserialize<'de> for Unlock {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s).map(Unlock).map_err(D::Error::custom)
    }
}

/// A reference to an unspent output being consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxInput {
    /// Identifier of the consumed output.
    pub utxo: Hash,
    /// Signature over the challenge hash; empty while unsigned.
    #[serde(default)]
    pub unlock: Unlock,
    /// Blocks the input must age past its unlock height. Always 0 here.
    #[serde(default)]
    pub unlock_age: u32,
}

impl TxInput {
    pub fn new(utxo: Hash) -> Self {
        Self {
            utxo,
            unlock: Unlock::default(),
            unlock_age: 0,
        }
    }
}

/// A newly created output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutput {
    pub amount: u64,
    pub address: Address,
}

/// A payment transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub payload: Vec<u8>,
    #[serde(default)]
    pub lock_height: u64,
}

impl Transaction {
    /// Canonical binary encoding. `include_unlocks` is false when computing
    /// the challenge hash that the unlocks themselves sign.
    fn encode(&self, include_unlocks: bool) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.num_bytes());
        out.extend_from_slice(&(self.inputs.len() as u32).to_le_bytes());
        for input in &self.inputs {
            out.extend_from_slice(input.utxo.as_bytes());
            if include_unlocks {
                out.extend_from_slice(&(input.unlock.0.len() as u32).to_le_bytes());
                out.extend_from_slice(&input.unlock.0);
            } else {
                out.extend_from_slice(&0u32.to_le_bytes());
            }
            out.extend_from_slice(&input.unlock_age.to_le_bytes());
        }
        out.extend_from_slice(&(self.outputs.len() as u32).to_le_bytes());
        for output in &self.outputs {
            out.extend_from_slice(&output.amount.to_le_bytes());
            out.extend_from_slice(output.address.key_bytes());
        }
        out.extend_from_slice(&(self.payload.len() as u32).to_le_bytes());
        out.extend_from_slice(&self.payload);
        out.extend_from_slice(&self.lock_height.to_le_bytes());
        out
    }

    /// Content hash of the full signed transaction. Used for reporting and
    /// as the submission/pending-pool identifier.
    pub fn hash_full(&self) -> Hash {
        Hash::digest(&self.encode(true))
    }

    /// Hash the unlocks sign: the transaction with all unlocks blanked.
    pub fn challenge_hash(&self) -> Hash {
        Hash::digest(&self.encode(false))
    }

    /// Serialized byte size of the transaction as encoded.
    pub fn num_bytes(&self) -> usize {
        let mut size = 4 + 4 + 4 + 8; // counts, payload length, lock_height
        for input in &self.inputs {
            size += 32 + 4 + input.unlock.0.len() + 4;
        }
        size += self.outputs.len() * (8 + 32);
        size += self.payload.len();
        size
    }

    /// Total value of the outputs.
    pub fn output_sum(&self) -> u64 {
        self.outputs.iter().map(|o| o.amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};

    fn addr(byte: u8) -> Address {
        Address::from_key(&SigningKey::from_bytes(&[byte; 32]).verifying_key())
    }

    fn sample_tx() -> Transaction {
        Transaction {
            inputs: vec![TxInput::new(Hash::digest(b"utxo-1"))],
            outputs: vec![TxOutput {
                amount: 500,
                address: addr(1),
            }],
            payload: Vec::new(),
            lock_height: 0,
        }
    }

    #[test]
    fn test_hash_changes_with_unlock() {
        let mut tx = sample_tx();
        let unsigned = tx.hash_full();
        tx.inputs[0].unlock = Unlock(vec![0xab; 64]);
        assert_ne!(unsigned, tx.hash_full());
    }

    #[test]
    fn test_challenge_ignores_unlock() {
        let mut tx = sample_tx();
        let before = tx.challenge_hash();
        tx.inputs[0].unlock = Unlock(vec![0xab; 64]);
        assert_eq!(before, tx.challenge_hash());
    }

    #[test]
    fn test_num_bytes_matches_encoding() {
        let mut tx = sample_tx();
        tx.inputs[0].unlock = Unlock(vec![0u8; 64]);
        assert_eq!(tx.num_bytes(), tx.encode(true).len());
    }

    #[test]
    fn test_unlock_verify() {
        let key = SigningKey::from_bytes(&[9u8; 32]);
        let address = Address::from_key(&key.verifying_key());
        let tx = sample_tx();
        let challenge = tx.challenge_hash();
        let unlock = Unlock(key.sign(challenge.as_bytes()).to_bytes().to_vec());
        assert!(unlock.verify(&address, &challenge));
        assert!(!unlock.verify(&addr(1), &challenge));
    }

    #[test]
    fn test_serde_round_trip() {
        let tx = sample_tx();
        let json = serde_json::to_string(&tx).unwrap();
        let back: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(tx, back);
    }
}
