//! Tests for the core crate.

use serde_json::json;
use zap_core::{
    asset::AssetId,
    crypto, derive_key_pair,
    encoding::{base58_decode, base58_encode},
    Account, Address, CoreError, Network, PublicKey, Recipient, Signature, TransferJson,
    TransferTransaction, TxState,
};

const ZAP_ID: &str = "35twb3NRL7cZwD1JjPHGzFLQ1P4gtUutTuFEXAg1f1hG";

const KNOWN_SEED: &str = "manage manual recall harvest series desert melt police rose hollow moral pledge kitten position add";
const KNOWN_PUBLIC_KEY: &str = "HBqhfdFASRQ5eBBpu2y6c6KKi1az6bMx8v1JxX4iW1Q8";
const KNOWN_RECIPIENT: &str = "3Mr2S13RUQzn2peQMZjf7bTrjkkUqtJaYEa";
const KNOWN_ID: &str = "5g7Br3jzE7n5eTXL2MyErZUSM2RCUWNZQrXbZtfj5ZSL";
const KNOWN_PROOF: &str =
    "Y4cTqp6eEVt1oPyC4fbpyfP8tjT1gTHHJSjkWorS84o9BwNhZN2gtWKdnuPnNLJLFAoWKNDxjqNAcnjiQE2bysF";

fn zap() -> AssetId {
    ZAP_ID.parse().unwrap()
}

/// Tests the full path from seed to a decoded, verified transfer.
#[test]
fn test_seed_to_signed_transfer() {
    let chain_id = Network::Testnet.chain_id();

    // Derive the sender and a recipient
    let sender = Account::from_seed(b"test seed", chain_id);
    let recipient = Account::from_seed(b"another seed", chain_id);
    assert_eq!(sender.address().chain_id(), b'T');
    assert_eq!(
        *sender.address(),
        Address::from_public_key(sender.public_key(), chain_id)
    );

    // Build a transfer of 500 with a fee of 10 in the same asset
    let mut tx = TransferTransaction::new(
        *sender.public_key(),
        1_700_000_000_000,
        Recipient::Address(*recipient.address()),
        zap(),
        500,
        10,
        zap(),
        None,
    )
    .unwrap();
    assert_eq!(tx.state(), TxState::Built);
    assert!(tx.to_wire_bytes().is_err());

    // Sign it
    tx.sign(&sender).unwrap();
    assert_eq!(tx.state(), TxState::Signed);
    tx.verify().unwrap();

    // Decode the wire form
    let wire = tx.to_wire_bytes().unwrap();
    let decoded = TransferTransaction::from_wire_bytes(&wire).unwrap();
    assert_eq!(decoded, tx);
    assert_eq!(decoded.amount, 500);
    assert_eq!(decoded.fee, 10);
    assert_eq!(decoded.asset_id, zap());
    assert_eq!(decoded.fee_asset_id, zap());
    assert_eq!(decoded.attachment, None);
    assert_eq!(decoded.id().unwrap(), tx.id().unwrap());
    decoded.verify_signature(sender.public_key()).unwrap();

    // The JSON form decodes to the same transfer
    let json = tx.to_json().unwrap();
    assert_eq!(TransferTransaction::from_json(&json).unwrap(), tx);
}

/// Tests that a signed transfer cannot be signed again.
#[test]
fn test_resign_rejected() {
    let sender = Account::from_seed(b"test seed", b'T');
    let recipient = Account::from_seed(b"another seed", b'T');

    let mut tx = TransferTransaction::new(
        *sender.public_key(),
        1,
        Recipient::Address(*recipient.address()),
        AssetId::Waves,
        1,
        100_000,
        AssetId::Waves,
        Some(b"first".to_vec()),
    )
    .unwrap();
    tx.sign(&sender).unwrap();
    let signature = *tx.signature().unwrap();

    assert_eq!(tx.sign(&sender), Err(CoreError::AlreadySigned));
    assert_eq!(tx.signature(), Some(&signature));
}

/// Tests that changing a signed field breaks the signature.
#[test]
fn test_tampered_transfer_fails_verification() {
    let sender = Account::from_seed(b"test seed", b'T');
    let recipient = Account::from_seed(b"another seed", b'T');

    let mut tx = TransferTransaction::new(
        *sender.public_key(),
        1_700_000_000_000,
        Recipient::Address(*recipient.address()),
        zap(),
        500,
        10,
        zap(),
        None,
    )
    .unwrap();
    tx.sign(&sender).unwrap();

    let mut wire = tx.to_wire_bytes().unwrap();
    // Amount sits after type, version, key, asset and fee asset, and timestamp
    let amount_offset = 1 + 1 + 32 + 33 + 33 + 8;
    wire[amount_offset + 7] ^= 0x01;

    let tampered = TransferTransaction::from_wire_bytes(&wire).unwrap();
    assert_eq!(tampered.amount, 500 ^ 1);
    assert!(matches!(
        tampered.verify(),
        Err(CoreError::SignatureVerification(_))
    ));
}

/// Tests that accounts from one seed differ per nonce.
#[test]
fn test_account_nonces() {
    let first = Account::from_seed_with_nonce(b"test seed", 0, b'W');
    let second = Account::from_seed_with_nonce(b"test seed", 1, b'W');

    assert_ne!(first.public_key(), second.public_key());
    assert_ne!(first.address(), second.address());
    assert!(first.address().to_string().starts_with("3P"));

    let signature = second.sign(b"message");
    crypto::verify(second.public_key().as_bytes(), b"message", signature.as_bytes()).unwrap();
    assert!(crypto::verify(first.public_key().as_bytes(), b"message", signature.as_bytes()).is_err());
}

/// Tests base58 helpers at the crate boundary.
#[test]
fn test_base58() {
    assert_eq!(base58_encode(b"hello world"), "StV1DL6CwTryKyV");
    assert_eq!(base58_decode("StV1DL6CwTryKyV").unwrap(), b"hello world");
    assert!(matches!(base58_decode("0"), Err(CoreError::Decode(_))));
    assert!(matches!(
        "0OIl".parse::<AssetId>(),
        Err(CoreError::Decode(_)) | Err(CoreError::InvalidAssetId(_))
    ));
}

/// Tests a fixed transfer: its id, its proof and the proof's reproduction.
#[test]
fn test_known_transfer_vector() {
    let json: TransferJson = serde_json::from_value(json!({
        "type": 4,
        "version": 2,
        "id": KNOWN_ID,
        "senderPublicKey": KNOWN_PUBLIC_KEY,
        "recipient": KNOWN_RECIPIENT,
        "amount": 500,
        "assetId": ZAP_ID,
        "fee": 10,
        "feeAssetId": ZAP_ID,
        "timestamp": 1_700_000_000_000u64,
        "attachment": "i7Af",
        "proofs": [KNOWN_PROOF]
    }))
    .unwrap();

    // Decoding checks the id against the contents
    let tx = TransferTransaction::from_json(&json).unwrap();
    assert_eq!(tx.attachment.as_deref(), Some(&b"zap"[..]));
    assert_eq!(tx.body_bytes().unwrap().len(), 155);
    assert_eq!(tx.id().unwrap(), KNOWN_ID);
    tx.verify().unwrap();

    // The same transfer built from its fields has the same id
    let sender: PublicKey = KNOWN_PUBLIC_KEY.parse().unwrap();
    let built = TransferTransaction::new(
        sender,
        1_700_000_000_000,
        KNOWN_RECIPIENT.parse().unwrap(),
        zap(),
        500,
        10,
        zap(),
        Some(b"zap".to_vec()),
    )
    .unwrap();
    assert_eq!(built.id().unwrap(), KNOWN_ID);

    // Signing with the same randomness reproduces the proof
    let pair = derive_key_pair(KNOWN_SEED.as_bytes(), 0);
    assert_eq!(*pair.public_key(), sender);
    let random: [u8; 64] = std::array::from_fn(|i| i as u8);
    let proof = crypto::sign_with_random(pair.private_key(), &built.body_bytes().unwrap(), &random);
    assert_eq!(Signature(proof), json.proofs[0]);

    // A changed amount no longer matches the proof
    let mut tampered = json.clone();
    tampered.id = None;
    tampered.amount = 501;
    let tx = TransferTransaction::from_json(&tampered).unwrap();
    assert!(matches!(
        tx.verify(),
        Err(CoreError::SignatureVerification(_))
    ));
}
