//! Network-tagged addresses and transfer recipients.

use crate::crypto::secure_hash;
use crate::encoding::{base58_decode, base58_encode};
use crate::errors::{CoreError, Result};
use crate::types::PublicKey;
use byteorder::{BigEndian, WriteBytesExt};
use std::fmt;
use std::str::FromStr;

/// Version byte of an address.
pub const ADDRESS_VERSION: u8 = 1;

/// Version byte of an alias.
pub const ALIAS_VERSION: u8 = 2;

/// Length of the public key hash inside an address.
pub const ADDRESS_HASH_LENGTH: usize = 20;

/// Length of the address checksum.
pub const ADDRESS_CHECKSUM_LENGTH: usize = 4;

/// Decoded address length: version, chain id, hash, checksum.
pub const ADDRESS_LENGTH: usize = 2 + ADDRESS_HASH_LENGTH + ADDRESS_CHECKSUM_LENGTH;

/// Alias names are between these lengths, inclusive.
pub const ALIAS_MIN_LENGTH: usize = 4;
pub const ALIAS_MAX_LENGTH: usize = 30;

const ALIAS_PREFIX: &str = "alias";

/// A 26-byte Waves address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    /// Derives the address of a public key on the given chain.
    pub fn from_public_key(public_key: &PublicKey, chain_id: u8) -> Self {
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes[0] = ADDRESS_VERSION;
        bytes[1] = chain_id;
        bytes[2..2 + ADDRESS_HASH_LENGTH]
            .copy_from_slice(&secure_hash(public_key.as_bytes())[..ADDRESS_HASH_LENGTH]);

        let checksum = checksum(&bytes[..ADDRESS_LENGTH - ADDRESS_CHECKSUM_LENGTH]);
        bytes[ADDRESS_LENGTH - ADDRESS_CHECKSUM_LENGTH..].copy_from_slice(&checksum);
        Address(bytes)
    }

    /// Parses decoded address bytes, checking version and checksum.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != ADDRESS_LENGTH {
            return Err(CoreError::InvalidAddress(format!(
                "expected {} bytes, got {}",
                ADDRESS_LENGTH,
                bytes.len()
            )));
        }
        if bytes[0] != ADDRESS_VERSION {
            return Err(CoreError::InvalidAddress(format!(
                "unknown address version {}",
                bytes[0]
            )));
        }

        let (body, actual) = bytes.split_at(ADDRESS_LENGTH - ADDRESS_CHECKSUM_LENGTH);
        if checksum(body) != actual {
            return Err(CoreError::InvalidAddress("checksum mismatch".to_string()));
        }

        let mut out = [0u8; ADDRESS_LENGTH];
        out.copy_from_slice(bytes);
        Ok(Address(out))
    }

    /// Returns the decoded address bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Returns the chain id the address belongs to.
    pub fn chain_id(&self) -> u8 {
        self.0[1]
    }
}

fn checksum(data: &[u8]) -> [u8; ADDRESS_CHECKSUM_LENGTH] {
    let mut out = [0u8; ADDRESS_CHECKSUM_LENGTH];
    out.copy_from_slice(&secure_hash(data)[..ADDRESS_CHECKSUM_LENGTH]);
    out
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&base58_encode(&self.0))
    }
}

impl FromStr for Address {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = base58_decode(s).map_err(|e| CoreError::InvalidAddress(e.to_string()))?;
        Address::from_bytes(&bytes)
    }
}

/// The receiving side of a transfer: an address or an alias bound to one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Recipient {
    Address(Address),
    Alias { chain_id: u8, name: String },
}

impl Recipient {
    /// Creates an alias recipient after validating the name.
    pub fn alias(chain_id: u8, name: &str) -> Result<Self> {
        validate_alias(chain_id, name)?;
        Ok(Recipient::Alias {
            chain_id,
            name: name.to_string(),
        })
    }

    /// Returns the chain id the recipient belongs to.
    pub fn chain_id(&self) -> u8 {
        match self {
            Recipient::Address(address) => address.chain_id(),
            Recipient::Alias { chain_id, .. } => *chain_id,
        }
    }

    /// Writes the recipient in its binary transaction form.
    pub fn write_bytes(&self, buf: &mut Vec<u8>) -> Result<()> {
        match self {
            Recipient::Address(address) => buf.extend_from_slice(address.as_bytes()),
            Recipient::Alias { chain_id, name } => {
                // The variant can be built without going through `alias`
                validate_alias(*chain_id, name).map_err(|e| CoreError::Encoding(e.to_string()))?;
                buf.push(ALIAS_VERSION);
                buf.push(*chain_id);
                buf.write_u16::<BigEndian>(name.len() as u16)
                    .map_err(|e| CoreError::Encoding(e.to_string()))?;
                buf.extend_from_slice(name.as_bytes());
            }
        }
        Ok(())
    }

    /// Reads a recipient from the front of `bytes`, returning it and the bytes consumed.
    pub fn read_bytes(bytes: &[u8]) -> Result<(Self, usize)> {
        match bytes.first() {
            Some(&ADDRESS_VERSION) => {
                let raw = bytes.get(..ADDRESS_LENGTH).ok_or_else(|| {
                    CoreError::Decode("truncated recipient address".to_string())
                })?;
                Ok((Recipient::Address(Address::from_bytes(raw)?), ADDRESS_LENGTH))
            }
            Some(&ALIAS_VERSION) => {
                let header = bytes
                    .get(..4)
                    .ok_or_else(|| CoreError::Decode("truncated alias header".to_string()))?;
                let len = u16::from_be_bytes([header[2], header[3]]) as usize;
                let raw = bytes
                    .get(4..4 + len)
                    .ok_or_else(|| CoreError::Decode("truncated alias name".to_string()))?;
                let name = std::str::from_utf8(raw)
                    .map_err(|e| CoreError::Decode(format!("alias is not UTF-8: {}", e)))?;
                Ok((Recipient::alias(header[1], name)?, 4 + len))
            }
            Some(other) => Err(CoreError::Decode(format!(
                "unknown recipient version {}",
                other
            ))),
            None => Err(CoreError::Decode("missing recipient".to_string())),
        }
    }
}

fn validate_alias(chain_id: u8, name: &str) -> Result<()> {
    if !chain_id.is_ascii_graphic() || chain_id == b':' {
        return Err(CoreError::InvalidAddress(format!(
            "alias chain id must be a printable ASCII character, got {:#04x}",
            chain_id
        )));
    }
    if name.len() < ALIAS_MIN_LENGTH || name.len() > ALIAS_MAX_LENGTH {
        return Err(CoreError::InvalidAddress(format!(
            "alias length must be between {} and {}, got {}",
            ALIAS_MIN_LENGTH,
            ALIAS_MAX_LENGTH,
            name.len()
        )));
    }
    if let Some(c) = name
        .chars()
        .find(|c| !matches!(c, '-' | '.' | '0'..='9' | '@' | '_' | 'a'..='z'))
    {
        return Err(CoreError::InvalidAddress(format!(
            "alias contains invalid character {:?}",
            c
        )));
    }
    Ok(())
}

impl From<Address> for Recipient {
    fn from(address: Address) -> Self {
        Recipient::Address(address)
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recipient::Address(address) => address.fmt(f),
            Recipient::Alias { chain_id, name } => {
                write!(f, "{}:{}:{}", ALIAS_PREFIX, *chain_id as char, name)
            }
        }
    }
}

impl FromStr for Recipient {
    type Err = CoreError;

    /// Accepts a base58 address or `alias:<chain>:<name>`.
    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.splitn(3, ':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(ALIAS_PREFIX), Some(chain), Some(name)) if chain.len() == 1 => {
                Recipient::alias(chain.as_bytes()[0], name)
            }
            (Some(ALIAS_PREFIX), _, _) => Err(CoreError::InvalidAddress(format!(
                "malformed alias {:?}",
                s
            ))),
            _ => s.parse().map(Recipient::Address),
        }
    }
}
