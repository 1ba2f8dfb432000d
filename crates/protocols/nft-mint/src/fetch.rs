//! Contract State Fetching
//!
//! Functions for reading supply and metadata state from the mint contract.

use eth_rpc_client::ContractReader;
use eth_tx::{decode_string, decode_u64, decode_uint256};
use minter_core::{ProtocolError, RpcError};

use crate::constants;
use crate::state::{CollectionInfo, SupplyState};

fn unavailable(method: &str, e: RpcError) -> ProtocolError {
    ProtocolError::StateUnavailable {
        reason: format!("{} failed: {}", method, e),
    }
}

fn decode_failed(method: &str, e: impl std::fmt::Display) -> ProtocolError {
    ProtocolError::AbiDecode {
        message: format!("{}: {}", method, e),
    }
}

async fn read_u64<R: ContractReader>(reader: &R, method: &str) -> Result<u64, ProtocolError> {
    let data = reader
        .call(method, &[])
        .await
        .map_err(|e| unavailable(method, e))?;
    decode_u64(&data).map_err(|e| decode_failed(method, e))
}

/// Read the free-tier threshold, falling back to the camelCase getter
async fn read_free_mint_amount<R: ContractReader>(reader: &R) -> Result<u64, ProtocolError> {
    match read_u64(reader, constants::FREE_MINT_AMOUNT).await {
        Ok(amount) => Ok(amount),
        Err(e) => {
            tracing::debug!("{}, trying {}", e, constants::FREE_MINT_AMOUNT_LEGACY);
            read_u64(reader, constants::FREE_MINT_AMOUNT_LEGACY).await
        }
    }
}

/// Read supply counters and price from the contract
pub async fn fetch_supply_state<R: ContractReader>(reader: &R) -> Result<SupplyState, ProtocolError> {
    let total_supply = read_u64(reader, constants::TOTAL_SUPPLY).await?;
    let max_supply = read_u64(reader, constants::MAX_SUPPLY).await?;
    let free_mint_amount = read_free_mint_amount(reader).await?;

    let data = reader
        .call(constants::MINT_PRICE, &[])
        .await
        .map_err(|e| unavailable(constants::MINT_PRICE, e))?;
    let mint_price_wei =
        decode_uint256(&data).map_err(|e| decode_failed(constants::MINT_PRICE, e))?;

    let state = SupplyState {
        total_supply,
        max_supply,
        free_mint_amount,
        mint_price_wei,
    };

    tracing::info!(
        contract = %reader.contract(),
        total_supply,
        max_supply,
        free_mint_amount,
        mint_price_wei = %mint_price_wei,
        "Loaded mint contract state"
    );

    Ok(state)
}

/// Read the metadata base URI
pub async fn fetch_base_token_uri<R: ContractReader>(reader: &R) -> Result<String, ProtocolError> {
    let data = reader
        .call(constants::BASE_TOKEN_URI, &[])
        .await
        .map_err(|e| unavailable(constants::BASE_TOKEN_URI, e))?;
    decode_string(&data).map_err(|e| decode_failed(constants::BASE_TOKEN_URI, e))
}

/// Attach the base URI to already-read supply state. A missing
/// `baseTokenURI()` is not an error.
pub async fn fetch_collection<R: ContractReader>(reader: &R, supply: SupplyState) -> CollectionInfo {
    let base_token_uri = match fetch_base_token_uri(reader).await {
        Ok(uri) => Some(uri),
        Err(e) => {
            tracing::warn!("Base token URI unavailable: {}", e);
            None
        }
    };

    CollectionInfo {
        contract: reader.contract().to_string(),
        supply,
        base_token_uri,
    }
}

/// Metadata location for one token
pub fn token_uri(base: &str, token_id: u64) -> String {
    format!("{}{}", base, token_id)
}

/// Token ids a mint of `quantity` receives when minted sequentially after
/// `total_supply` (ids start at 1)
pub fn next_token_ids(total_supply: u64, quantity: u64) -> impl Iterator<Item = u64> {
    (1..=quantity).map(move |i| total_supply.saturating_add(i))
}
