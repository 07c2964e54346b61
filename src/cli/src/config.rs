//! Configuration for the CLI wallet.

use crate::errors::WalletError;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;
use zap_core::{AssetId, Network};

/// Asset id of zap on the test network.
pub const ZAP_ASSET_ID: &str = "35twb3NRL7cZwD1JjPHGzFLQ1P4gtUutTuFEXAg1f1hG";

/// Transfer fee in whole units of the fee asset.
pub const DEFAULT_FEE: &str = "0.1";

/// Public test network node.
pub const TESTNET_NODE: &str = "https://nodes-testnet.wavesnodes.com";

/// Configuration for the CLI wallet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    /// The node to connect to
    pub node: String,
    /// The network accounts and addresses belong to
    pub network: Network,
    /// The asset shown and sent
    pub asset_id: String,
    /// Fee for a transfer, in whole units of the fee asset
    pub fee: String,
    /// Asset the fee is paid in; defaults to `asset_id` (sponsored fee)
    pub fee_asset_id: Option<String>,
    /// Per-request timeout towards the node
    pub timeout_secs: u64,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            node: TESTNET_NODE.to_string(),
            network: Network::Testnet,
            asset_id: ZAP_ASSET_ID.to_string(),
            fee: DEFAULT_FEE.to_string(),
            fee_asset_id: None,
            timeout_secs: 30,
        }
    }
}

impl WalletConfig {
    /// Loads configuration from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, WalletError> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Saves configuration to a file.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), WalletError> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Loads `path` if given, else the default location if it exists, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, WalletError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match default_path() {
                Some(path) if path.exists() => Self::from_file(path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Parses the configured asset id.
    pub fn asset(&self) -> Result<AssetId, WalletError> {
        parse_asset(&self.asset_id)
    }

    /// Parses the configured fee asset id, falling back to the asset.
    pub fn fee_asset(&self) -> Result<AssetId, WalletError> {
        match &self.fee_asset_id {
            Some(id) => parse_asset(id),
            None => self.asset(),
        }
    }

    /// Returns the request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn parse_asset(id: &str) -> Result<AssetId, WalletError> {
    id.parse()
        .map_err(|e| WalletError::ConfigError(format!("asset id {:?}: {}", id, e)))
}

/// `<config dir>/zap/config.json`.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut dir| {
        dir.push("zap");
        dir.push("config.json");
        dir
    })
}
