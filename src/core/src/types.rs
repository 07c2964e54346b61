//! Core types for the zap wallet.

use crate::encoding::{base58_decode_array, base58_encode};
use crate::errors::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};

/// Token amount in the smallest unit of its asset.
pub type Amount = u64;

/// Milliseconds since the Unix epoch.
pub type Timestamp = u64;

/// Length of a Curve25519 public key.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Length of a Curve25519 private key.
pub const PRIVATE_KEY_LENGTH: usize = 32;

/// Length of a Curve25519 signature.
pub const SIGNATURE_LENGTH: usize = 64;

/// A Curve25519 public key (Montgomery u-coordinate).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PublicKey(pub [u8; PUBLIC_KEY_LENGTH]);

/// Signature, represented as a 64-byte array.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature(pub [u8; SIGNATURE_LENGTH]);

impl PublicKey {
    /// Returns the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.0
    }
}

impl Signature {
    /// Returns the raw signature bytes.
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.0
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&base58_encode(&self.0))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&base58_encode(&self.0))
    }
}

impl FromStr for PublicKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        base58_decode_array(s)
            .map(PublicKey)
            .map_err(|e| CoreError::InvalidPublicKey(e.to_string()))
    }
}

impl FromStr for Signature {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        base58_decode_array(s).map(Signature)
    }
}

// Both keys and signatures travel as base58 strings in node JSON.
macro_rules! base58_serde {
    ($ty:ty, $expecting:expr) => {
        impl serde::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                struct Base58Visitor;

                impl<'de> serde::de::Visitor<'de> for Base58Visitor {
                    type Value = $ty;

                    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                        formatter.write_str($expecting)
                    }

                    fn visit_str<E>(self, v: &str) -> std::result::Result<Self::Value, E>
                    where
                        E: serde::de::Error,
                    {
                        v.parse().map_err(E::custom)
                    }
                }

                deserializer.deserialize_str(Base58Visitor)
            }
        }
    };
}

base58_serde!(PublicKey, "a base58 encoded 32-byte public key");
base58_serde!(Signature, "a base58 encoded 64-byte signature");

/// The Waves networks, each tagged by a chain id byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    /// Production network, chain id `'W'`
    Mainnet,
    /// Public test network, chain id `'T'`
    Testnet,
    /// Staging network, chain id `'S'`
    Stagenet,
}

impl Network {
    /// Returns the chain id byte used in addresses and aliases.
    pub fn chain_id(self) -> u8 {
        match self {
            Network::Mainnet => b'W',
            Network::Testnet => b'T',
            Network::Stagenet => b'S',
        }
    }

    /// Looks up a network by its chain id byte.
    pub fn from_chain_id(chain_id: u8) -> Option<Self> {
        match chain_id {
            b'W' => Some(Network::Mainnet),
            b'T' => Some(Network::Testnet),
            b'S' => Some(Network::Stagenet),
            _ => None,
        }
    }
}

impl Default for Network {
    fn default() -> Self {
        Network::Testnet
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Stagenet => "stagenet",
        };
        f.write_str(name)
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" | "w" => Ok(Network::Mainnet),
            "testnet" | "t" => Ok(Network::Testnet),
            "stagenet" | "s" => Ok(Network::Stagenet),
            other => Err(format!("unknown network: {}", other)),
        }
    }
}

/// Returns the current time in milliseconds since the Unix epoch.
pub fn current_timestamp() -> Timestamp {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as Timestamp)
        .unwrap_or_default()
}
