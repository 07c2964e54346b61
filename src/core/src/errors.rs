//! Error types for the core crate.

use thiserror::Error;

/// Errors that can occur in the core crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Error when base58 (or other textual) input cannot be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Error when a field exceeds the limits of the transaction format.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Error when signing a transaction that already carries a signature.
    #[error("Transaction is already signed")]
    AlreadySigned,

    /// Error when an operation needs a signature that is not there yet.
    #[error("Transaction is not signed")]
    NotSigned,

    /// Error when an address or alias is malformed.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Error when an asset identifier is malformed.
    #[error("Invalid asset id: {0}")]
    InvalidAssetId(String),

    /// Error when a public key is not a usable curve point.
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Error when a signature does not verify.
    #[error("Signature verification failed: {0}")]
    SignatureVerification(String),

    /// Error when an account signs a transaction built for another sender.
    #[error("Signer mismatch: transaction sender is {expected}, signer is {actual}")]
    SignerMismatch {
        /// The sender public key on the transaction
        expected: String,
        /// The public key of the signing account
        actual: String,
    },
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
