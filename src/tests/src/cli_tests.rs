//! Tests for the CLI wallet commands against an in-memory node.

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;
use zap_cli::commands::spend::SpendRequest;
use zap_cli::{
    asset, show, spend, transactions, NodeApi, TransactionRecord, Wallet, WalletConfig,
    WalletError,
};
use zap_core::{
    Address, Amount, Asset, AssetId, CoreError, Network, TransferJson, TransferTransaction,
};

const ZAP_ID: &str = "35twb3NRL7cZwD1JjPHGzFLQ1P4gtUutTuFEXAg1f1hG";

/// Node that keeps balances in memory and records broadcasts.
#[derive(Default)]
struct MockNode {
    balances: HashMap<(Address, AssetId), Amount>,
    assets: Vec<Asset>,
    history: Vec<TransactionRecord>,
    broadcasts: Mutex<Vec<TransferJson>>,
}

impl MockNode {
    fn broadcasts(&self) -> Vec<TransferJson> {
        self.broadcasts.lock().unwrap().clone()
    }
}

#[async_trait]
impl NodeApi for MockNode {
    async fn get_balance(&self, address: &Address, asset: &AssetId) -> Result<Amount, WalletError> {
        Ok(self
            .balances
            .get(&(*address, *asset))
            .copied()
            .unwrap_or_default())
    }

    async fn get_asset(&self, asset: &AssetId) -> Result<Asset, WalletError> {
        if *asset == AssetId::Waves {
            return Ok(Asset::waves());
        }
        self.assets
            .iter()
            .find(|a| a.asset_id == *asset)
            .cloned()
            .ok_or_else(|| WalletError::NodeRequestFailed(format!("error 112: no asset {}", asset)))
    }

    async fn list_transactions(
        &self,
        _address: &Address,
        limit: usize,
    ) -> Result<Vec<TransactionRecord>, WalletError> {
        Ok(self.history.iter().take(limit).cloned().collect())
    }

    async fn broadcast(&self, tx: &TransferJson) -> Result<serde_json::Value, WalletError> {
        // Reject anything that does not verify, like a real node
        TransferTransaction::from_json(tx)?.verify()?;
        self.broadcasts.lock().unwrap().push(tx.clone());
        Ok(serde_json::to_value(tx)?)
    }
}

fn zap_id() -> AssetId {
    ZAP_ID.parse().unwrap()
}

fn zap_asset() -> Asset {
    serde_json::from_value(json!({
        "assetId": ZAP_ID,
        "name": "Zap",
        "description": "Zap points",
        "decimals": 2,
        "issuer": "3N5net4nzSeeqxPfGZrvVvnGavsinipQHbE",
        "quantity": 1_000_000_000u64,
        "reissuable": true,
        "minSponsoredAssetFee": 1
    }))
    .unwrap()
}

fn wallet(seed: &str) -> Wallet {
    Wallet::from_seed_text(seed, false, 0, Network::Testnet).unwrap()
}

fn node_with_funds(wallet: &Wallet, amount: Amount) -> MockNode {
    let mut node = MockNode {
        assets: vec![zap_asset()],
        ..Default::default()
    };
    node.balances.insert((*wallet.address(), zap_id()), amount);
    node
}

fn request(recipient: &Wallet, amount: Amount, dry_run: bool) -> SpendRequest {
    SpendRequest {
        recipient: recipient.address().to_string(),
        asset_id: zap_id(),
        amount,
        fee: "0.01".to_string(),
        fee_asset_id: zap_id(),
        attachment: None,
        timestamp: Some(1_700_000_000_000),
        dry_run,
    }
}

/// Tests that show reports the balance with the asset's decimals.
#[tokio::test]
async fn test_show() {
    let alice = wallet("alice seed");
    let node = node_with_funds(&alice, 12_345);

    let holding = show::run(&node, &alice, &zap_id()).await.unwrap();
    assert_eq!(holding.address, *alice.address());
    assert_eq!(holding.balance, 12_345);
    assert_eq!(holding.asset.name, "Zap");
    assert_eq!(holding.formatted_balance(), "123.45");

    // Unknown accounts simply hold nothing
    let bob = wallet("bob seed");
    let holding = show::run(&node, &bob, &zap_id()).await.unwrap();
    assert_eq!(holding.balance, 0);
}

/// Tests that spend broadcasts a transfer the node can verify.
#[tokio::test]
async fn test_spend() {
    let alice = wallet("alice seed");
    let bob = wallet("bob seed");
    let node = node_with_funds(&alice, 1_000);

    let mut req = request(&bob, 500, false);
    req.attachment = Some("thanks".to_string());
    let outcome = spend::run(&node, &alice, &req).await.unwrap();

    let sent = node.broadcasts();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0], outcome.json);
    assert_eq!(sent[0].sender_public_key, *alice.public_key());
    assert_eq!(sent[0].recipient, bob.address().to_string());
    assert_eq!(sent[0].amount, 500);
    assert_eq!(sent[0].fee, 1);
    assert_eq!(sent[0].proofs.len(), 1);
    assert!(outcome.response.is_some());

    let tx = TransferTransaction::from_json(&sent[0]).unwrap();
    assert_eq!(tx.attachment.as_deref(), Some(&b"thanks"[..]));
    assert_eq!(Some(tx.id().unwrap()), sent[0].id);
}

/// Tests that a dry run signs without broadcasting.
#[tokio::test]
async fn test_spend_dry_run() {
    let alice = wallet("alice seed");
    let bob = wallet("bob seed");
    let node = node_with_funds(&alice, 1_000);

    let outcome = spend::run(&node, &alice, &request(&bob, 500, true))
        .await
        .unwrap();
    assert!(outcome.response.is_none());
    assert!(node.broadcasts().is_empty());
    outcome.transaction.verify().unwrap();
}

/// Tests that spend rejects bad input before signing.
#[tokio::test]
async fn test_spend_rejects_bad_input() {
    let alice = wallet("alice seed");
    let bob = wallet("bob seed");
    let node = node_with_funds(&alice, 1_000);

    // Zero amount
    let result = spend::run(&node, &alice, &request(&bob, 0, false)).await;
    assert!(matches!(result, Err(WalletError::InvalidAmount(_))));

    // Recipient on another network
    let mainnet_bob = Wallet::from_seed_text("bob seed", false, 0, Network::Mainnet).unwrap();
    let result = spend::run(&node, &alice, &request(&mainnet_bob, 1, false)).await;
    assert!(matches!(
        result,
        Err(WalletError::Core(CoreError::InvalidAddress(_)))
    ));

    // Attachment over the limit
    let mut req = request(&bob, 1, false);
    req.attachment = Some("x".repeat(141));
    let result = spend::run(&node, &alice, &req).await;
    assert!(matches!(result, Err(WalletError::Core(CoreError::Encoding(_)))));

    // Fee finer than the fee asset's decimals
    let mut req = request(&bob, 1, false);
    req.fee = "0.001".to_string();
    let result = spend::run(&node, &alice, &req).await;
    assert!(matches!(result, Err(WalletError::InvalidAmount(_))));

    assert!(node.broadcasts().is_empty());
}

/// Tests that the fee is scaled by the fee asset's decimals.
#[tokio::test]
async fn test_spend_fee_uses_fee_asset_decimals() {
    let alice = wallet("alice seed");
    let bob = wallet("bob seed");
    let node = node_with_funds(&alice, 1_000);

    // Zap has 2 decimals
    let mut req = request(&bob, 10, true);
    req.fee = "0.1".to_string();
    let outcome = spend::run(&node, &alice, &req).await.unwrap();
    assert_eq!(outcome.json.fee, 10);

    // WAVES has 8
    req.fee_asset_id = AssetId::Waves;
    req.fee = "0.001".to_string();
    let outcome = spend::run(&node, &alice, &req).await.unwrap();
    assert_eq!(outcome.json.fee, 100_000);
    assert_eq!(outcome.json.fee_asset_id, AssetId::Waves);
}

/// Tests listing transactions.
#[tokio::test]
async fn test_transactions() {
    let alice = wallet("alice seed");
    let bob = wallet("bob seed");
    let mut node = node_with_funds(&alice, 1_000);
    for i in 0..3u64 {
        let record: TransactionRecord = serde_json::from_value(json!({
            "id": format!("tx{}", i),
            "type": 4,
            "sender": alice.address().to_string(),
            "senderPublicKey": alice.public_key().to_string(),
            "recipient": bob.address().to_string(),
            "amount": 100 + i,
            "assetId": ZAP_ID,
            "fee": 1,
            "feeAssetId": ZAP_ID,
            "timestamp": 1_700_000_000_000u64 + i
        }))
        .unwrap();
        node.history.push(record);
    }

    let records = transactions::run(&node, &alice, 2).await.unwrap();
    assert_eq!(records.len(), 2);
    assert!(records[0].is_outgoing(alice.address()));
    assert!(records[0].moves_asset(&zap_id()));

    // Zero is raised to one
    let records = transactions::run(&node, &alice, 0).await.unwrap();
    assert_eq!(records.len(), 1);

    // Bob sees the same transfers as incoming
    let records = transactions::run(&node, &bob, 10).await.unwrap();
    assert_eq!(records.len(), 3);
    assert!(!records[2].is_outgoing(bob.address()));
}

/// Tests the asset command for issued and native assets.
#[tokio::test]
async fn test_asset() {
    let node = MockNode {
        assets: vec![zap_asset()],
        ..Default::default()
    };

    let zap = asset::run(&node, &zap_id()).await.unwrap();
    assert_eq!(zap.decimals, 2);
    assert!(zap.is_sponsored());

    let waves = asset::run(&node, &AssetId::Waves).await.unwrap();
    assert_eq!(waves.decimals, 8);

    let missing = AssetId::Issued([7u8; 32]);
    let result = asset::run(&node, &missing).await;
    assert!(matches!(result, Err(WalletError::NodeRequestFailed(_))));
}

/// Tests that a config file drives the spend defaults.
#[tokio::test]
async fn test_config_driven_spend() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    let config = WalletConfig {
        fee: "0.03".to_string(),
        ..Default::default()
    };
    config.to_file(&path).unwrap();

    let config = WalletConfig::load(Some(path.as_path())).unwrap();
    let alice = wallet("alice seed");
    let bob = wallet("bob seed");
    let node = node_with_funds(&alice, 1_000);

    let req = SpendRequest {
        recipient: bob.address().to_string(),
        asset_id: config.asset().unwrap(),
        amount: 10,
        fee: config.fee.clone(),
        fee_asset_id: config.fee_asset().unwrap(),
        attachment: Some(String::new()),
        timestamp: None,
        dry_run: false,
    };
    spend::run(&node, &alice, &req).await.unwrap();

    let sent = node.broadcasts();
    assert_eq!(sent[0].fee, 3);
    assert_eq!(sent[0].asset_id, zap_id());
    assert_eq!(sent[0].fee_asset_id, zap_id());
    assert_eq!(sent[0].attachment, "");
}
