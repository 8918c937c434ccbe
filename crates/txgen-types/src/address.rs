//! Public-key addresses.
//!
//! An address is the hex encoding of an ed25519 verifying key. Keeping the
//! raw key in the address lets the cancellation path recover the signer
//! without a separate lookup table on the wire.

use ed25519_dalek::VerifyingKey;
use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AddressError {
    #[error("invalid address encoding: {0}")]
    Encoding(#[from] hex::FromHexError),

    #[error("invalid address length: expected 32 bytes, got {0}")]
    Length(usize),

    #[error("address is not a valid public key")]
    InvalidKey,
}

/// A wallet address (hex-encoded ed25519 public key).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; 32]);

impl Address {
    /// Build an address from a verifying key.
    pub fn from_key(key: &VerifyingKey) -> Self {
        Self(key.to_bytes())
    }

    /// Raw 32 key bytes.
    pub fn key_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Decode back into a verifying key for signature checks.
    pub fn verifying_key(&self) -> Result<VerifyingKey, AddressError> {
        VerifyingKey::from_bytes(&self.0).map_err(|_| AddressError::InvalidKey)
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        let len = bytes.len();
        let bytes: [u8; 32] = bytes.try_into().map_err(|_| AddressError::Length(len))?;
        Ok(Self(bytes))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}
