//! Seed-derived accounts.

use crate::address::Address;
use crate::crypto::{self, clamp_private_key, public_key_from_private, secure_hash, sha256};
use crate::types::{PublicKey, Signature, PRIVATE_KEY_LENGTH};
use std::fmt;

/// A Curve25519 key pair derived from a seed.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    private_key: [u8; PRIVATE_KEY_LENGTH],
    public_key: PublicKey,
}

impl KeyPair {
    /// Returns the clamped private key.
    pub fn private_key(&self) -> &[u8; PRIVATE_KEY_LENGTH] {
        &self.private_key
    }

    /// Returns the public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

/// Derives the key pair for `seed` at account index `nonce`.
///
/// The account seed is `secure_hash(nonce_be ++ seed)`; its SHA-256 is
/// clamped into the private key. Any byte sequence, empty included, gives a
/// valid pair.
pub fn derive_key_pair(seed: &[u8], nonce: u32) -> KeyPair {
    let mut stoken = Vec::with_capacity(4 + seed.len());
    stoken.extend_from_slice(&nonce.to_be_bytes());
    stoken.extend_from_slice(seed);

    let account_seed = secure_hash(&stoken);
    let private_key = clamp_private_key(sha256(&account_seed));
    let public_key = PublicKey(public_key_from_private(&private_key));

    KeyPair {
        private_key,
        public_key,
    }
}

/// An account: key pair and address on one chain.
#[derive(Clone)]
pub struct Account {
    nonce: u32,
    key_pair: KeyPair,
    address: Address,
}

impl Account {
    /// Creates the first account (nonce 0) of a seed.
    pub fn from_seed(seed: &[u8], chain_id: u8) -> Self {
        Self::from_seed_with_nonce(seed, 0, chain_id)
    }

    /// Creates the account at index `nonce` of a seed.
    pub fn from_seed_with_nonce(seed: &[u8], nonce: u32, chain_id: u8) -> Self {
        let key_pair = derive_key_pair(seed, nonce);
        let address = Address::from_public_key(key_pair.public_key(), chain_id);
        Self {
            nonce,
            key_pair,
            address,
        }
    }

    /// Returns the account index within the seed.
    pub fn nonce(&self) -> u32 {
        self.nonce
    }

    /// Returns the public key.
    pub fn public_key(&self) -> &PublicKey {
        self.key_pair.public_key()
    }

    /// Returns the address.
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Signs arbitrary bytes with the account's private key.
    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature(crypto::sign(self.key_pair.private_key(), message))
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("address", &self.address.to_string())
            .field("public_key", &self.key_pair.public_key)
            .field("nonce", &self.nonce)
            .finish_non_exhaustive()
    }
}
