//! Typed views over node query results

use serde::{Deserialize, Serialize};

/// Outcome recorded in a mined receipt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptStatus {
    Success,
    Reverted,
    /// Pre-Byzantium receipts carry no status field
    Unknown,
}

/// Subset of `eth_getTransactionReceipt` fields
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TxReceipt {
    pub transaction_hash: String,
    #[serde(default)]
    pub block_number: Option<String>,
    #[serde(default)]
    pub gas_used: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl TxReceipt {
    pub fn status(&self) -> ReceiptStatus {
        match self.status.as_deref() {
            Some("0x1") => ReceiptStatus::Success,
            Some("0x0") => ReceiptStatus::Reverted,
            _ => ReceiptStatus::Unknown,
        }
    }

    pub fn block_number(&self) -> Option<u64> {
        let hex = self.block_number.as_deref()?;
        let value = eth_tx::parse_quantity_hex(hex).ok()?;
        u64::try_from(value).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_parsing() {
        let receipt: TxReceipt = serde_json::from_str(
            r#"{
                "transactionHash": "0xabc",
                "blockNumber": "0x10d4f",
                "gasUsed": "0x5208",
                "status": "0x1",
                "logs": []
            }"#,
        )
        .unwrap();

        assert_eq!(receipt.status(), ReceiptStatus::Success);
        assert_eq!(receipt.block_number(), Some(68943));
    }

    #[test]
    fn test_reverted_and_legacy() {
        let reverted: TxReceipt =
            serde_json::from_str(r#"{"transactionHash":"0x1","status":"0x0"}"#).unwrap();
        assert_eq!(reverted.status(), ReceiptStatus::Reverted);
        assert_eq!(reverted.block_number(), None);

        let legacy: TxReceipt = serde_json::from_str(r#"{"transactionHash":"0x1"}"#).unwrap();
        assert_eq!(legacy.status(), ReceiptStatus::Unknown);
    }
}
