//! Transfer transactions: canonical encoding, signing and wire forms.
//!
//! A transfer is built with every field except its signature, signed exactly
//! once, then handed to a node as JSON. The body bytes are the version 2
//! transfer layout:
//!
//! ```text
//! type(1) version(1) sender_public_key(32)
//! asset_flag(1) [asset_id(32)] fee_asset_flag(1) [fee_asset_id(32)]
//! timestamp(8, BE) amount(8, BE) fee(8, BE)
//! recipient(26 | alias) attachment_len(2, BE) attachment
//! ```
//!
//! The binary wire form appends the 64-byte signature to the body.

use crate::account::Account;
use crate::address::Recipient;
use crate::asset::AssetId;
use crate::crypto::{self, blake2b256};
use crate::encoding::{base58_decode, base58_encode};
use crate::errors::{CoreError, Result};
use crate::types::{Amount, PublicKey, Signature, Timestamp, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};
use byteorder::{BigEndian, ByteOrder, WriteBytesExt};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Transaction type tag of a transfer.
pub const TRANSFER_TYPE: u8 = 4;

/// Transfer layout version produced by this crate.
pub const TRANSFER_VERSION: u8 = 2;

/// Largest attachment accepted by the network, in bytes.
pub const MAX_ATTACHMENT_SIZE: usize = 140;

/// Where a transaction is in its local lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TxState {
    /// All fields set, no signature yet
    Built,
    /// Signature attached, ready for broadcast
    Signed,
}

/// A transfer of `amount` of `asset_id` from the sender to `recipient`.
///
/// Fields stay public so callers can inspect them; changing any of them after
/// signing makes [`TransferTransaction::verify`] fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferTransaction {
    /// The sender's public key
    pub sender_public_key: PublicKey,
    /// Creation time in milliseconds
    pub timestamp: Timestamp,
    /// The receiving address or alias
    pub recipient: Recipient,
    /// The asset being moved
    pub asset_id: AssetId,
    /// The amount, in smallest units of `asset_id`
    pub amount: Amount,
    /// The fee, in smallest units of `fee_asset_id`
    pub fee: Amount,
    /// The asset the fee is paid in
    pub fee_asset_id: AssetId,
    /// Optional payload; empty and absent encode identically
    pub attachment: Option<Vec<u8>>,
    signature: Option<Signature>,
}

impl TransferTransaction {
    /// Builds an unsigned transfer.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        sender_public_key: PublicKey,
        timestamp: Timestamp,
        recipient: Recipient,
        asset_id: AssetId,
        amount: Amount,
        fee: Amount,
        fee_asset_id: AssetId,
        attachment: Option<Vec<u8>>,
    ) -> Result<Self> {
        check_attachment(attachment.as_deref())?;
        Ok(Self {
            sender_public_key,
            timestamp,
            recipient,
            asset_id,
            amount,
            fee,
            fee_asset_id,
            attachment,
            signature: None,
        })
    }

    /// Returns the lifecycle state.
    pub fn state(&self) -> TxState {
        match self.signature {
            Some(_) => TxState::Signed,
            None => TxState::Built,
        }
    }

    /// Returns the signature, if signed.
    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    /// Returns the bytes that are signed and hashed into the id.
    pub fn body_bytes(&self) -> Result<Vec<u8>> {
        let attachment = self.attachment.as_deref().unwrap_or_default();
        check_attachment(Some(attachment))?;

        let mut buf = Vec::with_capacity(128 + attachment.len());
        buf.push(TRANSFER_TYPE);
        buf.push(TRANSFER_VERSION);
        buf.extend_from_slice(self.sender_public_key.as_bytes());
        self.asset_id.write_bytes(&mut buf);
        self.fee_asset_id.write_bytes(&mut buf);
        write_u64(&mut buf, self.timestamp)?;
        write_u64(&mut buf, self.amount)?;
        write_u64(&mut buf, self.fee)?;
        self.recipient.write_bytes(&mut buf)?;
        buf.write_u16::<BigEndian>(attachment.len() as u16)
            .map_err(|e| CoreError::Encoding(e.to_string()))?;
        buf.extend_from_slice(attachment);
        Ok(buf)
    }

    /// Returns the transaction id: base58 of BLAKE2b-256 over the body bytes.
    pub fn id(&self) -> Result<String> {
        Ok(base58_encode(&blake2b256(&self.body_bytes()?)))
    }

    /// Signs the transaction with `account`, moving it from `Built` to `Signed`.
    ///
    /// A signed transaction is never re-signed; the account must own the
    /// sender public key.
    pub fn sign(&mut self, account: &Account) -> Result<()> {
        if self.signature.is_some() {
            return Err(CoreError::AlreadySigned);
        }
        if account.public_key() != &self.sender_public_key {
            return Err(CoreError::SignerMismatch {
                expected: self.sender_public_key.to_string(),
                actual: account.public_key().to_string(),
            });
        }

        let body = self.body_bytes()?;
        debug!("Signing {} body bytes for {}", body.len(), account.address());
        self.signature = Some(account.sign(&body));
        Ok(())
    }

    /// Checks the signature against `public_key` over the current fields.
    pub fn verify_signature(&self, public_key: &PublicKey) -> Result<()> {
        let signature = self.signature.as_ref().ok_or(CoreError::NotSigned)?;
        crypto::verify(public_key.as_bytes(), &self.body_bytes()?, signature.as_bytes())
    }

    /// Checks the signature against the sender public key.
    pub fn verify(&self) -> Result<()> {
        self.verify_signature(&self.sender_public_key)
    }

    /// Returns the body bytes followed by the signature.
    pub fn to_wire_bytes(&self) -> Result<Vec<u8>> {
        let signature = self.signature.as_ref().ok_or(CoreError::NotSigned)?;
        let mut bytes = self.body_bytes()?;
        bytes.extend_from_slice(signature.as_bytes());
        Ok(bytes)
    }

    /// Parses the output of [`TransferTransaction::to_wire_bytes`].
    ///
    /// A zero-length attachment comes back as `None`.
    pub fn from_wire_bytes(bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(bytes);

        let tx_type = reader.u8()?;
        if tx_type != TRANSFER_TYPE {
            return Err(CoreError::Decode(format!(
                "expected transaction type {}, got {}",
                TRANSFER_TYPE, tx_type
            )));
        }
        let version = reader.u8()?;
        if version != TRANSFER_VERSION {
            return Err(CoreError::Decode(format!(
                "unsupported transfer version {}",
                version
            )));
        }

        let mut sender = [0u8; PUBLIC_KEY_LENGTH];
        sender.copy_from_slice(reader.take(PUBLIC_KEY_LENGTH)?);
        let asset_id = reader.asset_id()?;
        let fee_asset_id = reader.asset_id()?;
        let timestamp = reader.u64()?;
        let amount = reader.u64()?;
        let fee = reader.u64()?;
        let recipient = reader.recipient()?;
        let attachment_len = reader.u16()? as usize;
        let attachment = reader.take(attachment_len)?.to_vec();

        let mut signature = [0u8; SIGNATURE_LENGTH];
        signature.copy_from_slice(reader.take(SIGNATURE_LENGTH)?);
        reader.finish()?;

        let mut tx = Self::new(
            PublicKey(sender),
            timestamp,
            recipient,
            asset_id,
            amount,
            fee,
            fee_asset_id,
            (!attachment.is_empty()).then_some(attachment),
        )?;
        tx.signature = Some(Signature(signature));
        Ok(tx)
    }

    /// Returns the JSON object a node accepts on `/transactions/broadcast`.
    pub fn to_json(&self) -> Result<TransferJson> {
        let signature = self.signature.ok_or(CoreError::NotSigned)?;
        Ok(TransferJson {
            tx_type: TRANSFER_TYPE,
            version: TRANSFER_VERSION,
            id: Some(self.id()?),
            sender_public_key: self.sender_public_key,
            recipient: self.recipient.to_string(),
            amount: self.amount,
            asset_id: self.asset_id,
            fee: self.fee,
            fee_asset_id: self.fee_asset_id,
            timestamp: self.timestamp,
            attachment: base58_encode(self.attachment.as_deref().unwrap_or_default()),
            proofs: vec![signature],
        })
    }

    /// Rebuilds a transaction from its JSON form, checking the id if present.
    pub fn from_json(json: &TransferJson) -> Result<Self> {
        if json.tx_type != TRANSFER_TYPE || json.version != TRANSFER_VERSION {
            return Err(CoreError::Decode(format!(
                "expected transfer v{}, got type {} v{}",
                TRANSFER_VERSION, json.tx_type, json.version
            )));
        }
        if json.proofs.len() > 1 {
            return Err(CoreError::Decode(format!(
                "expected at most one proof, got {}",
                json.proofs.len()
            )));
        }

        let attachment = base58_decode(&json.attachment)?;
        let mut tx = Self::new(
            json.sender_public_key,
            json.timestamp,
            json.recipient.parse()?,
            json.asset_id,
            json.amount,
            json.fee,
            json.fee_asset_id,
            (!attachment.is_empty()).then_some(attachment),
        )?;
        tx.signature = json.proofs.first().copied();

        if let Some(id) = &json.id {
            let actual = tx.id()?;
            if &actual != id {
                return Err(CoreError::Decode(format!(
                    "id {} does not match contents ({})",
                    id, actual
                )));
            }
        }
        Ok(tx)
    }
}

fn check_attachment(attachment: Option<&[u8]>) -> Result<()> {
    match attachment {
        Some(bytes) if bytes.len() > MAX_ATTACHMENT_SIZE => Err(CoreError::Encoding(format!(
            "attachment is {} bytes, maximum is {}",
            bytes.len(),
            MAX_ATTACHMENT_SIZE
        ))),
        _ => Ok(()),
    }
}

fn write_u64(buf: &mut Vec<u8>, value: u64) -> Result<()> {
    buf.write_u64::<BigEndian>(value)
        .map_err(|e| CoreError::Encoding(e.to_string()))
}

/// Cursor over wire bytes.
struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self.pos + len;
        let slice = self.bytes.get(self.pos..end).ok_or_else(|| {
            CoreError::Decode(format!(
                "need {} bytes at offset {}, only {} left",
                len,
                self.pos,
                self.bytes.len() - self.pos
            ))
        })?;
        self.pos = end;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn u16(&mut self) -> Result<u16> {
        Ok(BigEndian::read_u16(self.take(2)?))
    }

    fn u64(&mut self) -> Result<u64> {
        Ok(BigEndian::read_u64(self.take(8)?))
    }

    fn asset_id(&mut self) -> Result<AssetId> {
        let (asset_id, used) = AssetId::read_bytes(&self.bytes[self.pos..])?;
        self.pos += used;
        Ok(asset_id)
    }

    fn recipient(&mut self) -> Result<Recipient> {
        let (recipient, used) = Recipient::read_bytes(&self.bytes[self.pos..])?;
        self.pos += used;
        Ok(recipient)
    }

    fn finish(&self) -> Result<()> {
        if self.pos != self.bytes.len() {
            return Err(CoreError::Decode(format!(
                "{} trailing bytes",
                self.bytes.len() - self.pos
            )));
        }
        Ok(())
    }
}

/// JSON form of a transfer as nodes accept and return it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferJson {
    /// Transaction type, always 4
    #[serde(rename = "type")]
    pub tx_type: u8,
    /// Transfer layout version
    pub version: u8,
    /// Base58 transaction id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Base58 sender public key
    pub sender_public_key: PublicKey,
    /// Base58 address or `alias:<chain>:<name>`
    pub recipient: String,
    /// Amount in smallest units
    pub amount: Amount,
    /// Asset id, `null` for WAVES
    #[serde(default)]
    pub asset_id: AssetId,
    /// Fee in smallest units
    pub fee: Amount,
    /// Fee asset id, `null` for WAVES
    #[serde(default)]
    pub fee_asset_id: AssetId,
    /// Milliseconds since the epoch
    pub timestamp: Timestamp,
    /// Base58 attachment bytes
    #[serde(default)]
    pub attachment: String,
    /// Base58 signatures
    #[serde(default)]
    pub proofs: Vec<Signature>,
}

impl TransferJson {
    /// Lists the fields as `(name, value)` pairs, sorted by name.
    pub fn fields(&self) -> Result<Vec<(String, serde_json::Value)>> {
        let value = serde_json::to_value(self).map_err(|e| CoreError::Encoding(e.to_string()))?;
        match value {
            serde_json::Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(CoreError::Encoding(format!(
                "transfer serialized to non-object {}",
                other
            ))),
        }
    }
}

impl fmt::Display for TransferTransaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transfer {{ sender: {}, recipient: {}, asset: {}, amount: {}, fee: {} {}, timestamp: {}, state: {:?} }}",
            self.sender_public_key,
            self.recipient,
            self.asset_id,
            self.amount,
            self.fee,
            self.fee_asset_id,
            self.timestamp,
            self.state()
        )
    }
}
