//! Asset command for the CLI wallet.

use crate::errors::WalletError;
use crate::node::NodeApi;
use tracing::info;
use zap_core::{Asset, AssetId};

/// Runs the asset command.
pub async fn run(node: &dyn NodeApi, asset_id: &AssetId) -> Result<Asset, WalletError> {
    info!("Fetching details of asset {}", asset_id);
    node.get_asset(asset_id).await
}
