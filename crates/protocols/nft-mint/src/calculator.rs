//! Mint Price Calculator
//!
//! Pure math for the payable amount. No async, no node.
//!
//! The first `free_mint_amount` tokens of the collection cost nothing; every
//! token after that costs `mint_price_wei`. A request that straddles the
//! boundary pays only for the part past it:
//!
//!   new_total <= free             -> 0
//!   total < free < new_total      -> (new_total - free) * price
//!   total >= free                 -> quantity * price

use minter_core::Wei;

use crate::state::{MintPreview, SupplyState};

/// Tokens in a request of `quantity` that fall past the free tier
pub fn paid_quantity(quantity: u64, supply: &SupplyState) -> u64 {
    let new_total = supply.total_supply.saturating_add(quantity);
    if new_total <= supply.free_mint_amount {
        0
    } else if supply.total_supply < supply.free_mint_amount {
        new_total - supply.free_mint_amount
    } else {
        quantity
    }
}

/// Value in wei that must accompany a mint of `quantity` tokens.
///
/// Returns 0 for `quantity == 0`. Saturates instead of wrapping.
pub fn payable_amount(quantity: u64, supply: &SupplyState) -> Wei {
    (paid_quantity(quantity, supply) as Wei).saturating_mul(supply.mint_price_wei)
}

/// Free/paid split and value for a prospective mint
pub fn preview_mint(quantity: u64, supply: &SupplyState) -> MintPreview {
    let paid = paid_quantity(quantity, supply);
    let remaining_supply = supply.remaining_supply();

    MintPreview {
        quantity,
        free_quantity: quantity - paid,
        paid_quantity: paid,
        value_wei: payable_amount(quantity, supply),
        remaining_supply,
        exceeds_remaining_supply: quantity > remaining_supply,
    }
}
