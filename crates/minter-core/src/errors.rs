//! Error types for Minter

use thiserror::Error;

/// Core errors that can occur in Minter
#[derive(Debug, Error)]
pub enum Error {
    #[error("RPC error: {0}")]
    Rpc(#[from] RpcError),

    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// JSON-RPC transport and response errors
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("Endpoint unreachable at {url}")]
    Unreachable { url: String },

    #[error("RPC returned error {code}: {message}")]
    ApiError { code: i64, message: String },

    #[error("RPC request timed out after {secs}s")]
    Timeout { secs: u64 },

    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

/// EIP-1193 "user rejected request"
pub const USER_REJECTED_CODE: i64 = 4001;

/// Wallet provider errors
#[derive(Debug, Error)]
pub enum WalletError {
    #[error("No wallet provider available")]
    NotPresent,

    #[error("Wallet rejected the request: {message}")]
    Rejected { message: String },

    #[error("Wallet returned no accounts")]
    NoAccounts,

    #[error("Invalid address: {address}")]
    InvalidAddress { address: String },

    #[error("Wallet transport error: {0}")]
    Transport(#[from] RpcError),
}

impl WalletError {
    /// Map an RPC error from a wallet endpoint, recognizing user rejection.
    pub fn from_rpc(err: RpcError) -> Self {
        match err {
            RpcError::ApiError { code, message } if code == USER_REJECTED_CODE => {
                Self::Rejected { message }
            }
            other => Self::Transport(other),
        }
    }
}

/// Mint protocol errors
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Invalid quantity: {message}")]
    InvalidQuantity { message: String },

    #[error("Contract state unavailable: {reason}")]
    StateUnavailable { reason: String },

    #[error("Failed to decode contract response: {message}")]
    AbiDecode { message: String },
}

/// Result type alias for Minter operations
pub type Result<T> = std::result::Result<T, Error>;

impl ProtocolError {
    /// Get a stable machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidQuantity { .. } => "invalid_quantity",
            Self::StateUnavailable { .. } => "state_unavailable",
            Self::AbiDecode { .. } => "abi_decode",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_error_codes() {
        let err = ProtocolError::InvalidQuantity {
            message: "test".into(),
        };
        assert_eq!(err.error_code(), "invalid_quantity");

        let err = ProtocolError::AbiDecode {
            message: "short word".into(),
        };
        assert_eq!(err.error_code(), "abi_decode");
    }

    #[test]
    fn test_wallet_rejection_mapping() {
        let err = WalletError::from_rpc(RpcError::ApiError {
            code: USER_REJECTED_CODE,
            message: "User denied".into(),
        });
        assert!(matches!(err, WalletError::Rejected { .. }));

        let err = WalletError::from_rpc(RpcError::Timeout { secs: 30 });
        assert!(matches!(err, WalletError::Transport(RpcError::Timeout { .. })));
    }
}
