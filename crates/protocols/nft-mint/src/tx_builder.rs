//! Mint Transaction Builder
//!
//! Builds the wallet transaction request for a payable mint.
//!
//! # Mint Transaction Structure
//!
//! to:    mint contract
//! value: payable amount for the quantity (see `calculator`)
//! data:  mint(uint256 quantity)

use eth_tx::{encode_call, TxRequest};
use minter_core::{Address, ProtocolError};

use crate::calculator;
use crate::constants;
use crate::state::SupplyState;

/// Call data for `mint(quantity)`
pub fn mint_call_data(quantity: u64) -> Vec<u8> {
    encode_call(constants::MINT, &[quantity as u128])
}

/// Build a mint transaction request paying the calculated amount.
pub fn build_mint_tx(
    from: &Address,
    contract: &Address,
    quantity: u64,
    supply: &SupplyState,
) -> Result<TxRequest, ProtocolError> {
    if quantity == 0 {
        return Err(ProtocolError::InvalidQuantity {
            message: "Quantity must be at least 1".to_string(),
        });
    }

    let value = calculator::payable_amount(quantity, supply);

    Ok(TxRequest::contract_call(
        from.clone(),
        contract.clone(),
        value,
        &mint_call_data(quantity),
    ))
}
