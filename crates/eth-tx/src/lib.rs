//! eth-tx: Transaction building utilities for EVM chains
//!
//! Provides contract ABI encoding and the wallet transaction request structure.

pub mod abi;
pub mod tx_request;

pub use abi::*;
pub use tx_request::TxRequest;
