//! Asset identifiers and descriptors.

use crate::encoding::{base58_decode, base58_encode};
use crate::errors::{CoreError, Result};
use crate::types::Amount;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Length of an issued asset id.
pub const ASSET_ID_LENGTH: usize = 32;

/// Decimals of the native WAVES asset.
pub const WAVES_DECIMALS: u8 = 8;

const WAVES: &str = "WAVES";

/// Identifies the native asset or an issued one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum AssetId {
    #[default]
    Waves,
    Issued([u8; ASSET_ID_LENGTH]),
}

impl AssetId {
    /// Returns the base58 id, or `None` for the native asset.
    pub fn id_or_none(&self) -> Option<String> {
        match self {
            AssetId::Waves => None,
            AssetId::Issued(id) => Some(base58_encode(id)),
        }
    }

    /// Writes the presence flag and, for issued assets, the id.
    pub fn write_bytes(&self, buf: &mut Vec<u8>) {
        match self {
            AssetId::Waves => buf.push(0),
            AssetId::Issued(id) => {
                buf.push(1);
                buf.extend_from_slice(id);
            }
        }
    }

    /// Reads an asset id from the front of `bytes`, returning it and the bytes consumed.
    pub fn read_bytes(bytes: &[u8]) -> Result<(Self, usize)> {
        match bytes.first() {
            Some(0) => Ok((AssetId::Waves, 1)),
            Some(1) => {
                let raw = bytes
                    .get(1..1 + ASSET_ID_LENGTH)
                    .ok_or_else(|| CoreError::Decode("truncated asset id".to_string()))?;
                let mut id = [0u8; ASSET_ID_LENGTH];
                id.copy_from_slice(raw);
                Ok((AssetId::Issued(id), 1 + ASSET_ID_LENGTH))
            }
            Some(flag) => Err(CoreError::Decode(format!("invalid asset flag {}", flag))),
            None => Err(CoreError::Decode("missing asset flag".to_string())),
        }
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetId::Waves => f.write_str(WAVES),
            AssetId::Issued(id) => f.write_str(&base58_encode(id)),
        }
    }
}

impl FromStr for AssetId {
    type Err = CoreError;

    /// `"WAVES"` and the empty string name the native asset.
    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() || s.eq_ignore_ascii_case(WAVES) {
            return Ok(AssetId::Waves);
        }

        let bytes = base58_decode(s).map_err(|e| CoreError::InvalidAssetId(e.to_string()))?;
        if bytes.len() != ASSET_ID_LENGTH {
            return Err(CoreError::InvalidAssetId(format!(
                "expected {} bytes, got {}",
                ASSET_ID_LENGTH,
                bytes.len()
            )));
        }
        let mut id = [0u8; ASSET_ID_LENGTH];
        id.copy_from_slice(&bytes);
        Ok(AssetId::Issued(id))
    }
}

// Node JSON uses `null` for the native asset.
impl Serialize for AssetId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.id_or_none().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AssetId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(AssetId::Waves),
            Some(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Asset descriptor as reported by a node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// The asset id
    pub asset_id: AssetId,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Number of decimal places in one whole unit
    pub decimals: u8,
    /// Issuer address
    #[serde(default)]
    pub issuer: Option<String>,
    /// Total issued quantity in smallest units
    #[serde(default)]
    pub quantity: Amount,
    /// Whether more can be issued
    #[serde(default)]
    pub reissuable: bool,
    /// Minimal fee in this asset when sponsorship is enabled
    #[serde(default)]
    pub min_sponsored_asset_fee: Option<Amount>,
}

impl Asset {
    /// The native WAVES asset, which no node reports details for.
    pub fn waves() -> Self {
        Self {
            asset_id: AssetId::Waves,
            name: WAVES.to_string(),
            description: String::new(),
            decimals: WAVES_DECIMALS,
            issuer: None,
            quantity: 0,
            reissuable: false,
            min_sponsored_asset_fee: None,
        }
    }

    /// Whether fees may be paid in this asset.
    pub fn is_sponsored(&self) -> bool {
        self.asset_id == AssetId::Waves || self.min_sponsored_asset_fee.is_some()
    }

    /// Renders a smallest-unit amount as a decimal string.
    pub fn format_amount(&self, amount: Amount) -> String {
        format_amount(amount, self.decimals)
    }

    /// Parses a decimal string into smallest units.
    pub fn parse_amount(&self, text: &str) -> Result<Amount> {
        parse_amount(text, self.decimals)
    }
}

/// Renders `amount` with `decimals` digits after the point.
pub fn format_amount(amount: Amount, decimals: u8) -> String {
    let decimals = decimals as usize;
    if decimals == 0 {
        return amount.to_string();
    }
    let digits = format!("{:0>width$}", amount, width = decimals + 1);
    let (whole, fraction) = digits.split_at(digits.len() - decimals);
    format!("{}.{}", whole, fraction)
}

/// Parses a decimal string with at most `decimals` fractional digits.
pub fn parse_amount(text: &str, decimals: u8) -> Result<Amount> {
    let invalid = || CoreError::Encoding(format!("invalid amount {:?}", text));

    let (whole, fraction) = match text.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (text, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if fraction.len() > decimals as usize {
        return Err(CoreError::Encoding(format!(
            "amount {:?} has more than {} decimals",
            text, decimals
        )));
    }
    if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }

    let digits = format!("{}{:0<width$}", whole, fraction, width = decimals as usize);
    let value: u128 = if digits.is_empty() {
        0
    } else {
        digits.parse().map_err(|_| invalid())?
    };
    Amount::try_from(value).map_err(|_| invalid())
}
