//! Error types for the CLI wallet.

use std::error::Error as StdError;
use std::fmt;
use zap_core::CoreError;

/// Errors that can occur in the CLI wallet.
#[derive(Debug)]
pub enum WalletError {
    /// Error from account, address or transaction handling.
    Core(CoreError),

    /// Error when a file operation fails.
    FileError(std::io::Error),

    /// Error when JSON serialization or deserialization fails.
    JsonError(serde_json::Error),

    /// Error when the node cannot be reached or the transport fails.
    NetworkError(String),

    /// Error when the node answers with an error or an unexpected body.
    NodeRequestFailed(String),

    /// Error when an amount is invalid.
    InvalidAmount(String),

    /// Error when the configuration is invalid.
    ConfigError(String),
}

impl fmt::Display for WalletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalletError::Core(e) => write!(f, "{}", e),
            WalletError::FileError(e) => write!(f, "File error: {}", e),
            WalletError::JsonError(e) => write!(f, "JSON error: {}", e),
            WalletError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            WalletError::NodeRequestFailed(msg) => write!(f, "Node request failed: {}", msg),
            WalletError::InvalidAmount(msg) => write!(f, "Invalid amount: {}", msg),
            WalletError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl StdError for WalletError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            WalletError::Core(e) => Some(e),
            WalletError::FileError(e) => Some(e),
            WalletError::JsonError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CoreError> for WalletError {
    fn from(error: CoreError) -> Self {
        WalletError::Core(error)
    }
}

impl From<std::io::Error> for WalletError {
    fn from(error: std::io::Error) -> Self {
        WalletError::FileError(error)
    }
}

impl From<serde_json::Error> for WalletError {
    fn from(error: serde_json::Error) -> Self {
        WalletError::JsonError(error)
    }
}

impl From<reqwest::Error> for WalletError {
    fn from(error: reqwest::Error) -> Self {
        WalletError::NetworkError(error.to_string())
    }
}
