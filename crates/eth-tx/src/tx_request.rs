//! Transaction request structure
//!
//! The JSON object a wallet provider expects as the single parameter of
//! `eth_sendTransaction`. The wallet fills in nonce, gas and fee fields it is
//! not given, signs, and broadcasts.

use minter_core::{Address, Wei};
use serde::{Deserialize, Serialize};

use crate::abi::{bytes_to_hex, to_quantity_hex};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxRequest {
    pub from: Address,
    pub to: Address,
    /// Attached value in wei, JSON-RPC quantity encoded
    pub value: String,
    /// Call data, `0x`-prefixed hex
    pub data: String,
}

impl TxRequest {
    /// Contract call carrying `value` wei
    pub fn contract_call(from: Address, to: Address, value: Wei, data: &[u8]) -> Self {
        Self {
            from,
            to,
            value: to_quantity_hex(value),
            data: bytes_to_hex(data),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_call_json_shape() {
        let req = TxRequest::contract_call(
            Address::new("0x1111111111111111111111111111111111111111"),
            Address::new("0x2222222222222222222222222222222222222222"),
            200_000_000_000_000_000,
            &[0xa0, 0x71, 0x2d, 0x68],
        );

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["from"], "0x1111111111111111111111111111111111111111");
        assert_eq!(json["value"], "0x2c68af0bb140000");
        assert_eq!(json["data"], "0xa0712d68");
        assert!(json.get("gas").is_none());
    }

    #[test]
    fn test_zero_value() {
        let req = TxRequest::contract_call(
            Address::new("0x1111111111111111111111111111111111111111"),
            Address::new("0x2222222222222222222222222222222222222222"),
            0,
            &[],
        );
        assert_eq!(req.value, "0x0");
        assert_eq!(req.data, "0x");
    }
}
