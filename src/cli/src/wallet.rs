//! Wallet implementation for the CLI.
//!
//! The wallet is never stored: every invocation rebuilds it from the seed
//! given on the command line.

use crate::errors::WalletError;
use zap_core::encoding::seed_bytes;
use zap_core::{Account, Address, Network, PublicKey};

/// A seed-backed wallet for one account index on one network.
#[derive(Debug, Clone)]
pub struct Wallet {
    account: Account,
    network: Network,
}

impl Wallet {
    /// Builds a wallet from seed text, raw UTF-8 or base58.
    pub fn from_seed_text(
        seed: &str,
        base58: bool,
        nonce: u32,
        network: Network,
    ) -> Result<Self, WalletError> {
        let bytes = seed_bytes(seed, base58)?;
        Ok(Self::from_seed_bytes(&bytes, nonce, network))
    }

    /// Builds a wallet from seed bytes.
    pub fn from_seed_bytes(seed: &[u8], nonce: u32, network: Network) -> Self {
        Self {
            account: Account::from_seed_with_nonce(seed, nonce, network.chain_id()),
            network,
        }
    }

    /// Gets the account.
    pub fn account(&self) -> &Account {
        &self.account
    }

    /// Gets the network.
    pub fn network(&self) -> Network {
        self.network
    }

    /// Gets the current account index.
    pub fn account_index(&self) -> u32 {
        self.account.nonce()
    }

    /// Gets the address for the current account.
    pub fn address(&self) -> &Address {
        self.account.address()
    }

    /// Gets the public key for the current account.
    pub fn public_key(&self) -> &PublicKey {
        self.account.public_key()
    }
}
