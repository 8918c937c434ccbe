//! Deterministic well-known key registry.
//!
//! Every developer running the tool derives the same key pool, so funds sent
//! between well-known wallets on a devnet stay reachable from any machine.
//! Derivation is a domain-separated SHA-512/256 of the wallet's name; the
//! pool wallets are named by index, plus a fixed set of named wallets used
//! by the network's bootstrap (genesis funder, commons budget, node
//! operators).
//!
//! The registry is immutable after construction; concurrent reads need no
//! locking.

use crate::error::WalletError;
use ed25519_dalek::SigningKey;
use sha2::{Digest, Sha512_256};
use std::collections::HashMap;
use txgen_types::Address;

const DERIVATION_DOMAIN: &[u8] = b"txgen.well-known.v1";

/// A deterministic wallet key pair.
#[derive(Clone)]
pub struct KeyPair {
    pub secret: SigningKey,
    pub address: Address,
}

impl KeyPair {
    fn derive(name: &str) -> Self {
        let mut hasher = Sha512_256::new();
        hasher.update(DERIVATION_DOMAIN);
        hasher.update([0x1f]);
        hasher.update(name.as_bytes());
        let seed: [u8; 32] = hasher.finalize().into();
        let secret = SigningKey::from_bytes(&seed);
        let address = Address::from_key(&secret.verifying_key());
        Self { secret, address }
    }
}

/// Fixed pool of well-known key pairs plus the named bootstrap wallets.
pub struct KeyRegistry {
    pool: Vec<KeyPair>,
    genesis: KeyPair,
    commons_budget: KeyPair,
    nodes: Vec<KeyPair>,
    by_address: HashMap<Address, usize>,
}

/// Number of named node-operator wallets.
pub const NODE_WALLETS: usize = 7;

impl KeyRegistry {
    /// Derive a registry with `key_count` pool wallets.
    pub fn new(key_count: usize) -> Self {
        let pool: Vec<KeyPair> = (0..key_count)
            .map(|i| KeyPair::derive(&format!("pool.{}", i)))
            .collect();
        let genesis = KeyPair::derive("genesis");
        let commons_budget = KeyPair::derive("commons-budget");
        let nodes: Vec<KeyPair> = (0..NODE_WALLETS)
            .map(|i| KeyPair::derive(&format!("node.{}", i + 1)))
            .collect();

        let mut by_address = HashMap::new();
        for (i, pair) in pool.iter().enumerate() {
            by_address.insert(pair.address, i);
        }

        log::debug!("derived {} pool keys + {} named wallets", key_count, NODE_WALLETS + 2);

        Self {
            pool,
            genesis,
            commons_budget,
            nodes,
            by_address,
        }
    }

    /// Size of the pool.
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Pool key pair at `index`.
    pub fn key(&self, index: usize) -> Result<&KeyPair, WalletError> {
        self.pool.get(index).ok_or(WalletError::UnknownIndex(index))
    }

    /// Pool index owning `address`, if any.
    pub fn index_of(&self, address: &Address) -> Option<usize> {
        self.by_address.get(address).copied()
    }

    /// The genesis funding wallet.
    pub fn genesis(&self) -> &KeyPair {
        &self.genesis
    }

    /// The commons budget wallet.
    pub fn commons_budget(&self) -> &KeyPair {
        &self.commons_budget
    }

    /// Named node-operator wallet (1-based, matching the network docs).
    pub fn node(&self, n: usize) -> Result<&KeyPair, WalletError> {
        if n == 0 {
            return Err(WalletError::UnknownIndex(0));
        }
        self.nodes.get(n - 1).ok_or(WalletError::UnknownIndex(n))
    }

    /// Every key the registry controls (pool + named), as address/secret
    /// pairs for cancellation re-signing.
    pub fn signing_pairs(&self) -> Vec<(Address, SigningKey)> {
        self.pool
            .iter()
            .chain(std::iter::once(&self.genesis))
            .chain(std::iter::once(&self.commons_budget))
            .chain(self.nodes.iter())
            .map(|pair| (pair.address, pair.secret.clone()))
            .collect()
    }

    /// Iterate the pool key pairs in index order.
    pub fn iter(&self) -> impl Iterator<Item = &KeyPair> {
        self.pool.iter()
    }
}
