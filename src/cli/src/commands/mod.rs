//! Commands for the CLI wallet.

pub mod asset;
pub mod show;
pub mod spend;
pub mod transactions;
