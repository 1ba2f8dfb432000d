//! Configuration types for Minter

use serde::{Deserialize, Serialize};

use crate::{Address, Error, Network};

/// Chain JSON-RPC endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    /// Endpoint URL (e.g., "http://127.0.0.1:8545" or an Alchemy HTTPS URL)
    pub url: String,

    /// Bearer token for authenticated endpoints (optional)
    #[serde(default)]
    pub api_key: String,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8545".to_string(),
            api_key: String::new(),
        }
    }
}

/// Wallet provider endpoint. An empty URL means no wallet is available.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalletConfig {
    #[serde(default)]
    pub url: String,
}

impl WalletConfig {
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

/// Mint contract location
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContractConfig {
    #[serde(default)]
    pub address: String,
}

/// Block-explorer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Transaction URL template; `{hash}` is replaced with the tx hash
    pub tx_url_template: String,
}

impl ExplorerConfig {
    pub fn for_network(network: Network) -> Self {
        Self {
            tx_url_template: network.explorer_tx_template().to_string(),
        }
    }

    /// Build the explorer URL for a transaction hash.
    /// Templates without a `{hash}` placeholder get the hash appended.
    pub fn tx_url(&self, hash: &str) -> String {
        if self.tx_url_template.contains("{hash}") {
            self.tx_url_template.replace("{hash}", hash)
        } else {
            format!("{}{}", self.tx_url_template, hash)
        }
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self::for_network(Network::Mainnet)
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Chain read endpoint
    pub rpc: RpcConfig,

    /// Wallet provider endpoint
    #[serde(default)]
    pub wallet: WalletConfig,

    /// Mint contract
    #[serde(default)]
    pub contract: ContractConfig,

    /// Explorer URL settings
    #[serde(default)]
    pub explorer: ExplorerConfig,

    /// Network (mainnet or sepolia)
    pub network: Network,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            rpc: RpcConfig::default(),
            wallet: WalletConfig::default(),
            contract: ContractConfig::default(),
            explorer: ExplorerConfig::default(),
            network: Network::Mainnet,
        }
    }
}

impl AppConfig {
    /// Load configuration for the binary.
    ///
    /// Starts from the JSON file named by `MINTER_CONFIG` when set, defaults
    /// otherwise, then applies environment overrides.
    pub fn load() -> Result<Self, Error> {
        let base = match std::env::var("MINTER_CONFIG") {
            Ok(path) if !path.trim().is_empty() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        Ok(base.with_overrides(|key| std::env::var(key).ok()))
    }

    /// Overlay values from `lookup` onto this configuration.
    ///
    /// Recognized keys: `MINTER_NETWORK`, `MINTER_RPC_URL` (falls back to
    /// `ALCHEMY_API`), `MINTER_RPC_API_KEY`, `MINTER_WALLET_URL`,
    /// `CONTRACT_ADDRESS`, `MINTER_EXPLORER_TX_URL`.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(network) = get("MINTER_NETWORK") {
            match network.parse::<Network>() {
                Ok(n) => {
                    self.network = n;
                    self.explorer = ExplorerConfig::for_network(n);
                }
                Err(e) => tracing::warn!("Ignoring MINTER_NETWORK: {}", e),
            }
        }
        if let Some(url) = get("MINTER_RPC_URL").or_else(|| get("ALCHEMY_API")) {
            self.rpc.url = url;
        }
        if let Some(key) = get("MINTER_RPC_API_KEY") {
            self.rpc.api_key = key;
        }
        if let Some(url) = get("MINTER_WALLET_URL") {
            self.wallet.url = url;
        }
        if let Some(addr) = get("CONTRACT_ADDRESS") {
            self.contract.address = addr;
        }
        if let Some(template) = get("MINTER_EXPLORER_TX_URL") {
            self.explorer.tx_url_template = template;
        }

        self
    }

    /// Read a JSON configuration file
    pub fn from_file(path: &str) -> Result<Self, Error> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {}", path, e)))?;
        tracing::info!("Loaded configuration from {}", path);
        Self::from_json_str(&raw)
    }

    /// Parse a JSON configuration document
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Check the settings needed to talk to the mint contract
    pub fn validate(&self) -> Result<Address, Error> {
        if self.rpc.url.trim().is_empty() {
            return Err(Error::Config("RPC URL is empty".to_string()));
        }
        Address::parse(&self.contract.address)
            .map_err(|e| Error::Config(format!("contract address: {}", e)))
    }
}
