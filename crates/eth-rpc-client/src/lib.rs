//! eth-rpc-client: JSON-RPC client for EVM nodes and wallet endpoints
//!
//! This crate provides a small async JSON-RPC 2.0 client over HTTP, the
//! `WalletProvider` / `ContractReader` capability traits consumed by the mint
//! session, and their HTTP-backed implementations.

pub mod capabilities;
pub mod provider;
pub mod queries;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use minter_core::{Address, BlockHeight, RpcConfig, RpcError, TxHash};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

/// Default timeout for RPC calls (30 seconds)
const RPC_REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Methods that wait on the user answering a wallet prompt. These are never
/// cut off locally: a signature given after a deadline would still be
/// broadcast by the wallet.
const PROMPTING_METHODS: &[&str] = &["eth_requestAccounts", "eth_sendTransaction"];

/// Local deadline for `method`, `None` when it waits on the user
fn request_timeout(method: &str) -> Option<std::time::Duration> {
    if PROMPTING_METHODS.contains(&method) {
        None
    } else {
        Some(RPC_REQUEST_TIMEOUT)
    }
}

pub use capabilities::{detect_capabilities, NodeCapabilities};
pub use provider::{ContractClient, ContractReader, WalletClient, WalletProvider};
pub use queries::{ReceiptStatus, TxReceipt};

/// Result type for RPC client operations
pub type Result<T> = std::result::Result<T, RpcError>;

/// JSON-RPC error object
#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

/// JSON-RPC response envelope
#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

impl RpcResponse {
    fn into_result<T: DeserializeOwned>(self) -> Result<T> {
        if let Some(err) = self.error {
            return Err(RpcError::ApiError {
                code: err.code,
                message: err.message,
            });
        }
        serde_json::from_value(self.result.unwrap_or(Value::Null))
            .map_err(|e| RpcError::ParseError(e.to_string()))
    }
}

/// Async JSON-RPC client bound to one endpoint
#[derive(Clone)]
pub struct RpcClient {
    http: reqwest::Client,
    config: RpcConfig,
    next_id: Arc<AtomicU64>,
}

impl RpcClient {
    /// Create a client for the configured endpoint. No request is made.
    pub fn new(config: RpcConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent("minter")
            .build()
            .map_err(|e| RpcError::Unreachable {
                url: format!("{}: {}", config.url, e),
            })?;

        Ok(Self {
            http,
            config,
            next_id: Arc::new(AtomicU64::new(1)),
        })
    }

    /// Get the current endpoint configuration
    pub fn config(&self) -> &RpcConfig {
        &self.config
    }

    /// Send a JSON-RPC request and deserialize its `result`
    pub async fn request<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });

        tracing::debug!(method, id, url = %self.config.url, "RPC request");

        let mut req = self.http.post(&self.config.url).json(&body);
        if !self.config.api_key.is_empty() {
            req = req.bearer_auth(&self.config.api_key);
        }

        let response: RpcResponse = timed_request(request_timeout(method), async {
            let resp = req.send().await.map_err(|e| self.transport_error(e))?;
            resp.json::<RpcResponse>()
                .await
                .map_err(|e| RpcError::ParseError(e.to_string()))
        })
        .await?;

        response.into_result()
    }

    fn transport_error(&self, e: reqwest::Error) -> RpcError {
        if e.is_connect() {
            RpcError::Unreachable {
                url: self.config.url.clone(),
            }
        } else {
            RpcError::ApiError {
                code: -1,
                message: e.to_string(),
            }
        }
    }

    /// `eth_chainId`
    pub async fn chain_id(&self) -> Result<u64> {
        let hex: String = self.request("eth_chainId", json!([])).await?;
        parse_u64_quantity(&hex)
    }

    /// `eth_blockNumber`
    pub async fn block_number(&self) -> Result<BlockHeight> {
        let hex: String = self.request("eth_blockNumber", json!([])).await?;
        parse_u64_quantity(&hex)
    }

    /// Check if the endpoint answers
    pub async fn is_online(&self) -> bool {
        self.block_number().await.is_ok()
    }

    /// `eth_call` against the latest block. Returns the raw return data.
    pub async fn eth_call(&self, to: &Address, data: &str) -> Result<Vec<u8>> {
        let hex: String = self
            .request(
                "eth_call",
                json!([{ "to": to.as_str(), "data": data }, "latest"]),
            )
            .await?;
        eth_tx::hex_to_bytes(&hex).map_err(|e| RpcError::ParseError(e.to_string()))
    }

    /// `eth_accounts` (already-authorized accounts, never prompts)
    pub async fn accounts(&self) -> Result<Vec<String>> {
        self.request("eth_accounts", json!([])).await
    }

    /// `eth_requestAccounts` (may prompt the user)
    pub async fn request_accounts(&self) -> Result<Vec<String>> {
        self.request("eth_requestAccounts", json!([])).await
    }

    /// `eth_sendTransaction`
    pub async fn send_transaction(&self, tx: &eth_tx::TxRequest) -> Result<TxHash> {
        let params = serde_json::to_value(tx).map_err(|e| RpcError::ParseError(e.to_string()))?;
        let hash: String = self.request("eth_sendTransaction", json!([params])).await?;
        Ok(TxHash::new(hash))
    }

    /// `eth_getTransactionReceipt`; `None` while the transaction is unmined
    pub async fn transaction_receipt(&self, hash: &TxHash) -> Result<Option<TxReceipt>> {
        self.request("eth_getTransactionReceipt", json!([hash.as_str()]))
            .await
    }
}

fn parse_u64_quantity(hex: &str) -> Result<u64> {
    let value = eth_tx::parse_quantity_hex(hex).map_err(|e| RpcError::ParseError(e.to_string()))?;
    u64::try_from(value).map_err(|_| RpcError::ParseError(format!("quantity {} overflows u64", hex)))
}

async fn timed_request<T>(
    timeout: Option<std::time::Duration>,
    fut: impl std::future::Future<Output = Result<T>>,
) -> Result<T> {
    match timeout {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| RpcError::Timeout {
                secs: limit.as_secs(),
            })?,
        None => fut.await,
    }
}
