//! Endpoint capability detection
//!
//! Probes whether the RPC endpoint is reachable, which chain it serves and
//! how far it has synced.

use minter_core::Network;
use serde::{Deserialize, Serialize};

use crate::RpcClient;

/// Endpoint capabilities detected through probing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeCapabilities {
    /// Endpoint is reachable and responding
    pub is_online: bool,

    /// Chain id reported by `eth_chainId`
    pub chain_id: Option<u64>,

    /// Latest block number
    pub block_height: u64,
}

impl NodeCapabilities {
    fn offline() -> Self {
        Self {
            is_online: false,
            chain_id: None,
            block_height: 0,
        }
    }

    /// Check the endpoint serves the expected network.
    /// Unknown chain ids (endpoint did not answer) never match.
    pub fn matches_network(&self, network: Network) -> bool {
        self.chain_id == Some(network.chain_id())
    }
}

/// Detect endpoint capabilities by probing `eth_blockNumber` and `eth_chainId`
pub async fn detect_capabilities(client: &RpcClient) -> NodeCapabilities {
    let block_height = match client.block_number().await {
        Ok(h) => h,
        Err(e) => {
            tracing::warn!("RPC endpoint {} is offline: {}", client.config().url, e);
            return NodeCapabilities::offline();
        }
    };

    let chain_id = match client.chain_id().await {
        Ok(id) => Some(id),
        Err(e) => {
            tracing::warn!("eth_chainId failed: {}", e);
            None
        }
    };

    NodeCapabilities {
        is_online: true,
        chain_id,
        block_height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_match() {
        let caps = NodeCapabilities {
            is_online: true,
            chain_id: Some(1),
            block_height: 19_000_000,
        };
        assert!(caps.matches_network(Network::Mainnet));
        assert!(!caps.matches_network(Network::Sepolia));
    }

    #[test]
    fn test_offline_never_matches() {
        let caps = NodeCapabilities::offline();
        assert!(!caps.is_online);
        assert!(!caps.matches_network(Network::Mainnet));
    }

    #[test]
    fn test_capabilities_serialization() {
        let caps = NodeCapabilities {
            is_online: true,
            chain_id: Some(11_155_111),
            block_height: 5,
        };
        let json = serde_json::to_value(&caps).unwrap();
        assert_eq!(json["chainId"], 11_155_111);
        assert_eq!(json["blockHeight"], 5);
    }
}
