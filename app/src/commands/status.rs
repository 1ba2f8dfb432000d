use eth_rpc_client::{detect_capabilities, NodeCapabilities, WalletProvider};
use minter_core::{format_ether, AppConfig};
use nft_mint::CollectionInfo;
use serde::Serialize;

use crate::build_session;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusReport {
    rpc_url: String,
    network: String,
    endpoint: NodeCapabilities,
    network_matches: bool,
    wallet_present: bool,
    connected: bool,
    display_address: String,
    collection: Option<CollectionInfo>,
    mint_price_ether: Option<String>,
    latest_token_uris: Vec<String>,
}

/// How many recently minted tokens to list
const LATEST_TOKENS: u64 = 3;

/// Report endpoint health, wallet connection, and contract state
pub async fn status(config: &AppConfig) -> anyhow::Result<()> {
    let mut session = build_session(config)?;

    let endpoint = detect_capabilities(session.reader().rpc()).await;
    if endpoint.is_online && !endpoint.matches_network(config.network) {
        tracing::warn!(
            "Endpoint chain id {:?} does not match {} ({})",
            endpoint.chain_id,
            config.network,
            config.network.chain_id()
        );
    }

    let collection = match session.initialize().await {
        Ok(supply) => Some(nft_mint::fetch_collection(session.reader(), supply).await),
        Err(e) => {
            tracing::warn!("Contract state unavailable: {}", e);
            None
        }
    };

    let report = StatusReport {
        rpc_url: config.rpc.url.clone(),
        network: config.network.to_string(),
        network_matches: endpoint.matches_network(config.network),
        endpoint,
        wallet_present: session.wallet().is_present(),
        connected: session.connection().connected(),
        display_address: session.connection().display_address(),
        mint_price_ether: collection
            .as_ref()
            .map(|c| format_ether(c.supply.mint_price_wei)),
        latest_token_uris: collection
            .as_ref()
            .map(|c| c.latest_token_uris(LATEST_TOKENS))
            .unwrap_or_default(),
        collection,
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
