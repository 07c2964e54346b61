//! Transactions command for the CLI wallet.

use crate::errors::WalletError;
use crate::node::{NodeApi, TransactionRecord};
use crate::wallet::Wallet;
use tracing::info;

/// Largest page the node serves.
pub const MAX_LIMIT: usize = 1000;

/// Runs the transactions command.
pub async fn run(
    node: &dyn NodeApi,
    wallet: &Wallet,
    limit: usize,
) -> Result<Vec<TransactionRecord>, WalletError> {
    let limit = limit.clamp(1, MAX_LIMIT);
    info!("Listing up to {} transactions for {}", limit, wallet.address());

    let records = node.list_transactions(wallet.address(), limit).await?;
    info!("Node returned {} transactions", records.len());
    Ok(records)
}
