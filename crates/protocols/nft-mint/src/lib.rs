//! NFT Mint Protocol Implementation
//!
//! A collection contract whose first `FREE_MINT_AMOUNT` tokens are free and
//! every later token costs `mintPrice` wei. This crate reads that state,
//! prices a mint, and builds the payable `mint(uint256)` transaction.

pub mod calculator;
pub mod constants;
pub mod fetch;
pub mod state;
pub mod tx_builder;

// Re-exports
pub use calculator::{paid_quantity, payable_amount, preview_mint};
pub use fetch::{
    fetch_base_token_uri, fetch_collection, fetch_supply_state, next_token_ids, token_uri,
};
pub use state::{CollectionInfo, MintPreview, SupplyState};
pub use tx_builder::{build_mint_tx, mint_call_data};
