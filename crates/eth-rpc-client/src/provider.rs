//! Wallet and contract capability traits
//!
//! The mint session never talks to an endpoint directly; it is handed a
//! `WalletProvider` and a `ContractReader`. The HTTP implementations below are
//! what the binary wires in. Tests substitute in-memory doubles.

use std::future::Future;

use eth_tx::TxRequest;
use minter_core::{Address, RpcConfig, RpcError, TxHash, WalletConfig, WalletError};

use crate::RpcClient;

/// A wallet that holds accounts and signs on the user's behalf (EIP-1193 style)
pub trait WalletProvider {
    /// Whether a wallet is available at all
    fn is_present(&self) -> bool;

    /// Ask the user to authorize accounts. May prompt; may be rejected.
    fn request_accounts(&self) -> impl Future<Output = Result<Vec<Address>, WalletError>> + Send;

    /// Accounts already authorized for this client. Never prompts.
    fn authorized_accounts(
        &self,
    ) -> impl Future<Output = Result<Vec<Address>, WalletError>> + Send;

    /// Sign and broadcast a transaction, returning its hash
    fn send_transaction(
        &self,
        tx: &TxRequest,
    ) -> impl Future<Output = Result<TxHash, WalletError>> + Send;
}

/// Read-only access to the mint contract
pub trait ContractReader {
    /// Address of the contract being read
    fn contract(&self) -> &Address;

    /// Call `signature` (e.g. `totalSupply()`) with static `uint256` args and
    /// return the raw ABI-encoded result
    fn call(
        &self,
        signature: &str,
        args: &[u128],
    ) -> impl Future<Output = Result<Vec<u8>, RpcError>> + Send;
}

/// Wallet reached over a JSON-RPC endpoint (e.g. a desktop wallet's local RPC port)
#[derive(Clone)]
pub struct WalletClient {
    rpc: Option<RpcClient>,
}

impl WalletClient {
    /// Build from config; an unconfigured wallet URL yields an absent wallet
    pub fn from_config(config: &WalletConfig) -> Result<Self, RpcError> {
        if !config.is_configured() {
            return Ok(Self::absent());
        }
        let rpc = RpcClient::new(RpcConfig {
            url: config.url.clone(),
            api_key: String::new(),
        })?;
        Ok(Self { rpc: Some(rpc) })
    }

    pub fn absent() -> Self {
        Self { rpc: None }
    }

    fn rpc(&self) -> Result<&RpcClient, WalletError> {
        self.rpc.as_ref().ok_or(WalletError::NotPresent)
    }
}

/// Keep well-formed addresses, logging and dropping anything else
fn parse_accounts(raw: Vec<String>) -> Vec<Address> {
    raw.into_iter()
        .filter_map(|a| match Address::parse(&a) {
            Ok(addr) => Some(addr),
            Err(e) => {
                tracing::warn!("Ignoring wallet account: {}", e);
                None
            }
        })
        .collect()
}

impl WalletProvider for WalletClient {
    fn is_present(&self) -> bool {
        self.rpc.is_some()
    }

    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        let raw = self
            .rpc()?
            .request_accounts()
            .await
            .map_err(WalletError::from_rpc)?;
        Ok(parse_accounts(raw))
    }

    async fn authorized_accounts(&self) -> Result<Vec<Address>, WalletError> {
        let raw = self.rpc()?.accounts().await.map_err(WalletError::from_rpc)?;
        Ok(parse_accounts(raw))
    }

    async fn send_transaction(&self, tx: &TxRequest) -> Result<TxHash, WalletError> {
        self.rpc()?
            .send_transaction(tx)
            .await
            .map_err(WalletError::from_rpc)
    }
}

/// Mint contract read through `eth_call`
#[derive(Clone)]
pub struct ContractClient {
    rpc: RpcClient,
    contract: Address,
}

impl ContractClient {
    pub fn new(rpc: RpcClient, contract: Address) -> Self {
        Self { rpc, contract }
    }

    pub fn rpc(&self) -> &RpcClient {
        &self.rpc
    }
}

impl ContractReader for ContractClient {
    fn contract(&self) -> &Address {
        &self.contract
    }

    async fn call(&self, signature: &str, args: &[u128]) -> Result<Vec<u8>, RpcError> {
        let data = eth_tx::encode_call_hex(signature, args);
        self.rpc.eth_call(&self.contract, &data).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_wallet_is_absent() {
        let wallet = WalletClient::from_config(&WalletConfig::default()).unwrap();
        assert!(!wallet.is_present());
    }

    #[test]
    fn test_configured_wallet_is_present() {
        let wallet = WalletClient::from_config(&WalletConfig {
            url: "http://127.0.0.1:1248".to_string(),
        })
        .unwrap();
        assert!(wallet.is_present());
    }

    #[tokio::test]
    async fn test_absent_wallet_errors() {
        let wallet = WalletClient::absent();
        assert!(matches!(
            wallet.request_accounts().await,
            Err(WalletError::NotPresent)
        ));
        assert!(matches!(
            wallet.authorized_accounts().await,
            Err(WalletError::NotPresent)
        ));
    }

    #[test]
    fn test_parse_accounts_filters_garbage() {
        let accounts = parse_accounts(vec![
            "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed".to_string(),
            "not-an-address".to_string(),
        ]);
        assert_eq!(accounts.len(), 1);
    }
}
