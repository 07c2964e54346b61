//! Access to a Waves node over its REST API.

use crate::errors::WalletError;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};
use zap_core::{Address, Amount, Asset, AssetId, TransferJson};

/// Operations the wallet needs from a node.
#[async_trait]
pub trait NodeApi: Send + Sync {
    /// Balance of `asset` held by `address`, in smallest units.
    async fn get_balance(&self, address: &Address, asset: &AssetId) -> Result<Amount, WalletError>;

    /// Descriptor of `asset`.
    async fn get_asset(&self, asset: &AssetId) -> Result<Asset, WalletError>;

    /// Most recent transactions touching `address`, newest first.
    async fn list_transactions(
        &self,
        address: &Address,
        limit: usize,
    ) -> Result<Vec<TransactionRecord>, WalletError>;

    /// Submits a signed transfer and returns the node's answer.
    async fn broadcast(&self, tx: &TransferJson) -> Result<serde_json::Value, WalletError>;
}

/// A transaction as listed by the node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    /// Base58 transaction id
    pub id: String,
    /// Transaction type
    #[serde(rename = "type")]
    pub tx_type: u8,
    /// Sender address
    #[serde(default)]
    pub sender: Option<String>,
    /// Sender public key
    #[serde(default)]
    pub sender_public_key: Option<String>,
    /// Recipient address or alias, for transfers
    #[serde(default)]
    pub recipient: Option<String>,
    /// Amount, for transfers
    #[serde(default)]
    pub amount: Option<Amount>,
    /// Transferred asset, `None` for WAVES
    #[serde(default)]
    pub asset_id: Option<String>,
    /// Fee in smallest units
    #[serde(default)]
    pub fee: Amount,
    /// Fee asset, `None` for WAVES
    #[serde(default)]
    pub fee_asset_id: Option<String>,
    /// Milliseconds since the epoch
    pub timestamp: u64,
    /// Block height, once confirmed
    #[serde(default)]
    pub height: Option<u64>,
    /// Base58 attachment
    #[serde(default)]
    pub attachment: Option<String>,
    /// Any other fields the node returned
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl TransactionRecord {
    /// Returns the timestamp as a UTC date.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.timestamp as i64).single()
    }

    /// Whether `address` sent this transaction.
    pub fn is_outgoing(&self, address: &Address) -> bool {
        self.sender.as_deref() == Some(address.to_string().as_str())
    }

    /// Whether this transfer moved `asset`.
    pub fn moves_asset(&self, asset: &AssetId) -> bool {
        self.asset_id == asset.id_or_none()
    }
}

/// Error body returned by the node.
#[derive(Debug, Deserialize)]
struct NodeErrorBody {
    #[serde(default)]
    error: Option<i64>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BalanceBody {
    balance: Amount,
}

/// [`NodeApi`] over HTTP with `reqwest`.
#[derive(Debug, Clone)]
pub struct NodeClient {
    base_url: String,
    client: reqwest::Client,
}

impl NodeClient {
    /// Creates a client for the node at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, WalletError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| WalletError::NetworkError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, WalletError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| WalletError::NetworkError(format!("Failed to connect to node: {}", e)))?;
        read_json(response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, WalletError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| WalletError::NetworkError(format!("Failed to connect to node: {}", e)))?;
        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, WalletError> {
    let status = response.status();
    let response_text = response
        .text()
        .await
        .map_err(|e| WalletError::NetworkError(format!("Failed to get response text: {}", e)))?;
    debug!("Node response ({}): {}", status, response_text);

    if !status.is_success() {
        let detail = match serde_json::from_str::<NodeErrorBody>(&response_text) {
            Ok(NodeErrorBody {
                error: Some(code),
                message: Some(message),
            }) => format!("error {}: {}", code, message),
            Ok(NodeErrorBody {
                message: Some(message),
                ..
            }) => message,
            _ => response_text.clone(),
        };
        warn!("Node returned {}: {}", status, detail);
        return Err(WalletError::NodeRequestFailed(format!("{} ({})", detail, status)));
    }

    if response_text.is_empty() {
        return Err(WalletError::NetworkError("Empty response from node".to_string()));
    }

    serde_json::from_str(&response_text).map_err(|e| {
        WalletError::NodeRequestFailed(format!("Failed to parse response: {}: {}", e, response_text))
    })
}

#[async_trait]
impl NodeApi for NodeClient {
    async fn get_balance(&self, address: &Address, asset: &AssetId) -> Result<Amount, WalletError> {
        let path = match asset {
            AssetId::Waves => format!("/addresses/balance/{}", address),
            AssetId::Issued(_) => format!("/assets/balance/{}/{}", address, asset),
        };
        let body: BalanceBody = self.get_json(&path).await?;
        Ok(body.balance)
    }

    async fn get_asset(&self, asset: &AssetId) -> Result<Asset, WalletError> {
        match asset {
            AssetId::Waves => Ok(Asset::waves()),
            AssetId::Issued(_) => self.get_json(&format!("/assets/details/{}", asset)).await,
        }
    }

    async fn list_transactions(
        &self,
        address: &Address,
        limit: usize,
    ) -> Result<Vec<TransactionRecord>, WalletError> {
        // The node nests the list one level deep: [[tx, tx, ...]].
        let nested: Vec<Vec<TransactionRecord>> = self
            .get_json(&format!("/transactions/address/{}/limit/{}", address, limit))
            .await?;
        Ok(nested.into_iter().next().unwrap_or_default())
    }

    async fn broadcast(&self, tx: &TransferJson) -> Result<serde_json::Value, WalletError> {
        self.post_json("/transactions/broadcast", tx).await
    }
}
