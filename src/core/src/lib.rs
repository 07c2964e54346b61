//! Core primitives for the zap wallet.
//!
//! This crate derives Waves accounts from seeds, encodes and signs transfer
//! transactions, and produces the forms a node accepts for broadcast. It does
//! no I/O; talking to a node is left to the caller.

pub mod account;
pub mod address;
pub mod asset;
pub mod crypto;
pub mod encoding;
pub mod errors;
pub mod transaction;
pub mod types;

// Re-export commonly used types
pub use account::{derive_key_pair, Account, KeyPair};
pub use address::{Address, Recipient};
pub use asset::{Asset, AssetId};
pub use errors::CoreError;
pub use transaction::{TransferJson, TransferTransaction, TxState};
pub use types::{Amount, Network, PublicKey, Signature, Timestamp};
