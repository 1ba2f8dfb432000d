//! Mint Contract Constants
//!
//! Canonical signatures of the contract methods the client calls.

/// Supply minted so far
pub const TOTAL_SUPPLY: &str = "totalSupply()";

/// Hard cap on supply
pub const MAX_SUPPLY: &str = "MAX_SUPPLY()";

/// Free-tier threshold. Older deployments expose the camelCase getter instead.
pub const FREE_MINT_AMOUNT: &str = "FREE_MINT_AMOUNT()";
pub const FREE_MINT_AMOUNT_LEGACY: &str = "freeMintAmount()";

/// Per-token price in wei once past the free tier
pub const MINT_PRICE: &str = "mintPrice()";

/// Metadata base URI; token URIs are `base + token_id`
pub const BASE_TOKEN_URI: &str = "baseTokenURI()";

/// Payable mint entry point
pub const MINT: &str = "mint(uint256)";
