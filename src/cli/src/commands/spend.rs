//! Spend command for the CLI wallet.

use crate::errors::WalletError;
use crate::node::NodeApi;
use crate::wallet::Wallet;
use tracing::{debug, info};
use zap_core::types::current_timestamp;
use zap_core::{Amount, Asset, AssetId, CoreError, Recipient, Timestamp, TransferJson, TransferTransaction};

/// Parameters of a transfer.
#[derive(Debug, Clone)]
pub struct SpendRequest {
    /// Recipient address or `alias:<chain>:<name>`
    pub recipient: String,
    /// Asset to send
    pub asset_id: AssetId,
    /// Amount in smallest units
    pub amount: Amount,
    /// Fee in whole units of `fee_asset_id`, e.g. `"0.1"`
    pub fee: String,
    /// Asset the fee is paid in
    pub fee_asset_id: AssetId,
    /// Optional attachment text; an empty string means none
    pub attachment: Option<String>,
    /// Creation time; the current time when `None`
    pub timestamp: Option<Timestamp>,
    /// Sign but do not broadcast
    pub dry_run: bool,
}

/// The signed transfer and, unless it was a dry run, the node's answer.
#[derive(Debug, Clone)]
pub struct SpendOutcome {
    /// The signed transaction
    pub transaction: TransferTransaction,
    /// The JSON that was (or would be) broadcast
    pub json: TransferJson,
    /// The node response
    pub response: Option<serde_json::Value>,
}

/// Converts the request's decimal fee into smallest units of `fee_asset`.
pub fn fee_units(request: &SpendRequest, fee_asset: &Asset) -> Result<Amount, WalletError> {
    fee_asset
        .parse_amount(request.fee.trim())
        .map_err(|e| WalletError::InvalidAmount(format!("fee {:?}: {}", request.fee, e)))
}

/// Builds and signs the transfer described by `request`, paying `fee` smallest
/// units of the fee asset.
pub fn build_signed(
    wallet: &Wallet,
    request: &SpendRequest,
    fee: Amount,
) -> Result<TransferTransaction, WalletError> {
    if request.amount == 0 {
        return Err(WalletError::InvalidAmount("amount must be positive".to_string()));
    }

    let recipient: Recipient = request.recipient.parse()?;
    let chain_id = wallet.network().chain_id();
    if recipient.chain_id() != chain_id {
        return Err(CoreError::InvalidAddress(format!(
            "{} is not on {} (chain id {:?})",
            recipient,
            wallet.network(),
            chain_id as char
        ))
        .into());
    }

    let attachment = request
        .attachment
        .as_deref()
        .filter(|text| !text.is_empty())
        .map(|text| text.as_bytes().to_vec());

    let mut tx = TransferTransaction::new(
        *wallet.public_key(),
        request.timestamp.unwrap_or_else(current_timestamp),
        recipient,
        request.asset_id,
        request.amount,
        fee,
        request.fee_asset_id,
        attachment,
    )?;
    tx.sign(wallet.account())?;
    tx.verify()?;
    debug!("Signed transfer {}", tx);
    Ok(tx)
}

/// Runs the spend command.
pub async fn run(
    node: &dyn NodeApi,
    wallet: &Wallet,
    request: &SpendRequest,
) -> Result<SpendOutcome, WalletError> {
    info!(
        "Sending {} of {} from {} to {}",
        request.amount,
        request.asset_id,
        wallet.address(),
        request.recipient
    );

    let fee_asset = node.get_asset(&request.fee_asset_id).await?;
    let fee = fee_units(request, &fee_asset)?;
    debug!("Fee {} {} is {} smallest units", request.fee, fee_asset.name, fee);

    let transaction = build_signed(wallet, request, fee)?;
    let json = transaction.to_json()?;
    debug!("Wire bytes: {}", hex::encode(transaction.to_wire_bytes()?));

    if request.dry_run {
        info!("Dry run, not broadcasting {}", json.id.as_deref().unwrap_or_default());
        return Ok(SpendOutcome {
            transaction,
            json,
            response: None,
        });
    }

    let response = node.broadcast(&json).await?;
    info!("Broadcast accepted by node");

    Ok(SpendOutcome {
        transaction,
        json,
        response: Some(response),
    })
}
