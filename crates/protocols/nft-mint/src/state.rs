//! Mint State Types
//!
//! Contract supply state and mint previews.

use minter_core::Wei;
use serde::{Deserialize, Serialize};

use crate::fetch::{next_token_ids, token_uri};

/// Supply counters and pricing read from the mint contract.
///
/// `total_supply <= max_supply` is enforced by the contract, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyState {
    pub total_supply: u64,
    pub max_supply: u64,
    /// Tokens mintable at zero cost before per-unit pricing applies
    pub free_mint_amount: u64,
    pub mint_price_wei: Wei,
}

impl SupplyState {
    pub fn remaining_supply(&self) -> u64 {
        self.max_supply.saturating_sub(self.total_supply)
    }
}

/// Supply state plus collection metadata location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionInfo {
    pub contract: String,
    pub supply: SupplyState,
    /// `None` when the contract does not expose `baseTokenURI()`
    pub base_token_uri: Option<String>,
}

impl CollectionInfo {
    /// Metadata URIs of the `count` most recently minted tokens, oldest first.
    /// Empty without a base URI.
    pub fn latest_token_uris(&self, count: u64) -> Vec<String> {
        let Some(base) = self.base_token_uri.as_deref() else {
            return Vec::new();
        };
        let count = count.min(self.supply.total_supply);
        next_token_ids(self.supply.total_supply - count, count)
            .map(|id| token_uri(base, id))
            .collect()
    }
}

/// Preview for minting a quantity of tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintPreview {
    pub quantity: u64,
    /// Tokens covered by the free tier
    pub free_quantity: u64,
    /// Tokens charged at the mint price
    pub paid_quantity: u64,
    /// Value to attach to the mint transaction
    pub value_wei: Wei,
    pub remaining_supply: u64,
    /// The contract will reject this mint
    pub exceeds_remaining_supply: bool,
}
