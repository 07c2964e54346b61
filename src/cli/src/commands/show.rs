//! Show command for the CLI wallet.

use crate::errors::WalletError;
use crate::node::NodeApi;
use crate::wallet::Wallet;
use tracing::{debug, info};
use zap_core::{Address, Amount, Asset, AssetId};

/// What `show` found for an account.
#[derive(Debug, Clone)]
pub struct Holding {
    /// The account address
    pub address: Address,
    /// The asset looked up
    pub asset: Asset,
    /// Balance in smallest units
    pub balance: Amount,
}

impl Holding {
    /// Balance rendered with the asset's decimals.
    pub fn formatted_balance(&self) -> String {
        self.asset.format_amount(self.balance)
    }
}

/// Runs the show command.
pub async fn run(
    node: &dyn NodeApi,
    wallet: &Wallet,
    asset_id: &AssetId,
) -> Result<Holding, WalletError> {
    let address = *wallet.address();
    info!("Getting balance of {} for address: {}", asset_id, address);

    let asset = node.get_asset(asset_id).await?;
    debug!("Asset {} has {} decimals", asset.name, asset.decimals);

    let balance = node.get_balance(&address, asset_id).await?;
    debug!("Balance: {}", balance);

    Ok(Holding {
        address,
        asset,
        balance,
    })
}
