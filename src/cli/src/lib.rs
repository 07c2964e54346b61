//! CLI wallet for sending zap on the Waves network.

pub mod commands;
pub mod config;
pub mod errors;
pub mod node;
pub mod wallet;

// Re-export commonly used types and functions
pub use commands::{asset, show, spend, transactions};
pub use config::WalletConfig;
pub use errors::WalletError;
pub use node::{NodeApi, NodeClient, TransactionRecord};
pub use wallet::Wallet;
