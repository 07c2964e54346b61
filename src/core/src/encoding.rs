//! Base58 and UTF-8 helpers.

use crate::errors::{CoreError, Result};

/// Encodes bytes as base58 using the Bitcoin alphabet.
///
/// Every leading zero byte becomes one leading `'1'`.
pub fn base58_encode(data: &[u8]) -> String {
    bs58::encode(data).into_string()
}

/// Decodes a base58 string using the Bitcoin alphabet.
pub fn base58_decode(data: &str) -> Result<Vec<u8>> {
    bs58::decode(data)
        .into_vec()
        .map_err(|e| CoreError::Decode(format!("invalid base58 input {:?}: {}", data, e)))
}

/// Decodes a base58 string that must hold exactly `N` bytes.
pub fn base58_decode_array<const N: usize>(data: &str) -> Result<[u8; N]> {
    let bytes = base58_decode(data)?;
    if bytes.len() != N {
        return Err(CoreError::Decode(format!(
            "expected {} bytes, got {}",
            N,
            bytes.len()
        )));
    }

    let mut out = [0u8; N];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Returns the UTF-8 bytes of a string.
pub fn utf8_bytes(text: &str) -> Vec<u8> {
    text.as_bytes().to_vec()
}

/// Turns seed text into seed bytes, either raw UTF-8 or base58-decoded.
pub fn seed_bytes(text: &str, is_base58: bool) -> Result<Vec<u8>> {
    if is_base58 {
        base58_decode(text)
    } else {
        Ok(utf8_bytes(text))
    }
}
