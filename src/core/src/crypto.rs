//! Hash functions and Curve25519 signatures used by Waves.
//!
//! Keys are X25519 (Montgomery) keys. Signatures follow the Curve25519
//! signature scheme: the Montgomery private scalar signs as an Ed25519 key
//! and the sign bit of the Edwards public key travels in the top bit of the
//! signature's last byte, so verifiers can recover the Edwards key from the
//! Montgomery one.

use crate::errors::{CoreError, Result};
use crate::types::{PRIVATE_KEY_LENGTH, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};
use blake2::digest::consts::U32;
use blake2::Blake2b;
use curve25519_dalek::edwards::EdwardsPoint;
use curve25519_dalek::montgomery::MontgomeryPoint;
use curve25519_dalek::scalar::Scalar;
use ed25519_dalek::{Verifier, VerifyingKey};
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256, Sha512};
use sha3::Keccak256;

type Blake2b256 = Blake2b<U32>;

/// Computes the BLAKE2b-256 hash of the input data.
pub fn blake2b256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Computes the Keccak-256 hash of the input data.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Computes the SHA-256 hash of the input data.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Keccak-256 over BLAKE2b-256, used for account seeds and addresses.
pub fn secure_hash(data: &[u8]) -> [u8; 32] {
    keccak256(&blake2b256(data))
}

fn sha512_scalar(parts: &[&[u8]]) -> Scalar {
    let mut hasher = Sha512::new();
    for part in parts {
        hasher.update(part);
    }
    let mut wide = [0u8; 64];
    wide.copy_from_slice(&hasher.finalize());
    Scalar::from_bytes_mod_order_wide(&wide)
}

/// Clamps 32 bytes into a Curve25519 private scalar.
pub fn clamp_private_key(mut key: [u8; PRIVATE_KEY_LENGTH]) -> [u8; PRIVATE_KEY_LENGTH] {
    key[0] &= 248;
    key[31] &= 127;
    key[31] |= 64;
    key
}

/// Computes the X25519 public key of a clamped private key.
pub fn public_key_from_private(private_key: &[u8; PRIVATE_KEY_LENGTH]) -> [u8; PUBLIC_KEY_LENGTH] {
    let scalar = Scalar::from_bytes_mod_order(*private_key);
    EdwardsPoint::mul_base(&scalar).to_montgomery().to_bytes()
}

/// Signs a message with fresh randomness from the OS.
pub fn sign(private_key: &[u8; PRIVATE_KEY_LENGTH], message: &[u8]) -> [u8; SIGNATURE_LENGTH] {
    let mut random = [0u8; 64];
    OsRng.fill_bytes(&mut random);
    sign_with_random(private_key, message, &random)
}

/// Signs a message, mixing the caller's 64 random bytes into the nonce.
pub fn sign_with_random(
    private_key: &[u8; PRIVATE_KEY_LENGTH],
    message: &[u8],
    random: &[u8; 64],
) -> [u8; SIGNATURE_LENGTH] {
    let a = Scalar::from_bytes_mod_order(*private_key);
    let public = EdwardsPoint::mul_base(&a).compress();
    let sign_bit = public.as_bytes()[31] & 0x80;

    // Domain-separated nonce, distinct from any plain Ed25519 nonce.
    let mut prefix = [0xFFu8; 32];
    prefix[0] = 0xFE;
    let r = sha512_scalar(&[&prefix, private_key, message, random]);
    let big_r = EdwardsPoint::mul_base(&r).compress();

    let k = sha512_scalar(&[big_r.as_bytes(), public.as_bytes(), message]);
    let s = r + k * a;

    let mut signature = [0u8; SIGNATURE_LENGTH];
    signature[..32].copy_from_slice(big_r.as_bytes());
    signature[32..].copy_from_slice(s.as_bytes());
    signature[63] |= sign_bit;
    signature
}

/// Verifies a Curve25519 signature against a Montgomery public key.
pub fn verify(
    public_key: &[u8; PUBLIC_KEY_LENGTH],
    message: &[u8],
    signature: &[u8; SIGNATURE_LENGTH],
) -> Result<()> {
    let sign_bit = (signature[63] & 0x80) >> 7;
    let edwards = MontgomeryPoint(*public_key)
        .to_edwards(sign_bit)
        .ok_or_else(|| CoreError::InvalidPublicKey("not a Curve25519 point".to_string()))?;
    let verifying_key = VerifyingKey::from_bytes(edwards.compress().as_bytes())
        .map_err(|e| CoreError::InvalidPublicKey(e.to_string()))?;

    let mut ed_signature = *signature;
    ed_signature[63] &= 0x7F;
    verifying_key
        .verify(message, &ed25519_dalek::Signature::from_bytes(&ed_signature))
        .map_err(|e| CoreError::SignatureVerification(e.to_string()))
}
