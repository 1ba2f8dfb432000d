//! Transaction confirmation watcher
//!
//! Polls for the receipt of a submitted mint until it is mined or the watch
//! times out. The mint status stays optimistic; this only reports what the
//! chain eventually did.

use std::future::Future;
use std::time::{Duration, Instant};

use eth_rpc_client::{ReceiptStatus, RpcClient, TxReceipt};
use minter_core::{RpcError, TxHash};
use serde::Serialize;

/// How often to poll for the receipt
const POLL_INTERVAL: Duration = Duration::from_secs(12);

/// Give up after this long
const TIMEOUT: Duration = Duration::from_secs(40 * 60); // 40 minutes

/// Anything that can look up a transaction receipt
pub trait ReceiptSource {
    fn receipt(
        &self,
        hash: &TxHash,
    ) -> impl Future<Output = Result<Option<TxReceipt>, RpcError>> + Send;
}

impl ReceiptSource for RpcClient {
    async fn receipt(&self, hash: &TxHash) -> Result<Option<TxReceipt>, RpcError> {
        self.transaction_receipt(hash).await
    }
}

#[derive(Debug, Clone, Copy)]
pub struct WatchSettings {
    pub poll_interval: Duration,
    pub timeout: Duration,
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            poll_interval: POLL_INTERVAL,
            timeout: TIMEOUT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum WatchOutcome {
    Confirmed { block: Option<u64> },
    Reverted { block: Option<u64> },
    Timeout,
}

impl WatchOutcome {
    fn from_receipt(receipt: &TxReceipt) -> Self {
        let block = receipt.block_number();
        match receipt.status() {
            ReceiptStatus::Reverted => Self::Reverted { block },
            ReceiptStatus::Success | ReceiptStatus::Unknown => Self::Confirmed { block },
        }
    }
}

/// Poll until the transaction is mined or `settings.timeout` elapses.
///
/// Lookup errors are logged and retried on the next tick.
pub async fn watch_receipt<S: ReceiptSource>(
    source: &S,
    hash: &TxHash,
    settings: WatchSettings,
) -> WatchOutcome {
    let started = Instant::now();

    loop {
        match source.receipt(hash).await {
            Ok(Some(receipt)) => {
                let outcome = WatchOutcome::from_receipt(&receipt);
                match &outcome {
                    WatchOutcome::Reverted { block } => {
                        tracing::warn!(tx_hash = %hash, ?block, "Mint transaction reverted")
                    }
                    _ => tracing::info!(tx_hash = %hash, "Mint transaction confirmed"),
                }
                return outcome;
            }
            Ok(None) => tracing::debug!(tx_hash = %hash, "Transaction not mined yet"),
            Err(e) => tracing::debug!(tx_hash = %hash, "Receipt lookup failed: {}", e),
        }

        if started.elapsed() >= settings.timeout {
            tracing::warn!(
                tx_hash = %hash,
                "Gave up waiting for confirmation after {}s",
                settings.timeout.as_secs()
            );
            return WatchOutcome::Timeout;
        }

        tokio::time::sleep(settings.poll_interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct ScriptedSource {
        replies: Mutex<VecDeque<Result<Option<TxReceipt>, RpcError>>>,
    }

    impl ScriptedSource {
        fn new(replies: Vec<Result<Option<TxReceipt>, RpcError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
            }
        }
    }

    impl ReceiptSource for ScriptedSource {
        async fn receipt(&self, _hash: &TxHash) -> Result<Option<TxReceipt>, RpcError> {
            self.replies.lock().unwrap().pop_front().unwrap_or(Ok(None))
        }
    }

    fn receipt(status: &str) -> TxReceipt {
        TxReceipt {
            transaction_hash: "0xab".to_string(),
            block_number: Some("0x64".to_string()),
            gas_used: None,
            status: Some(status.to_string()),
        }
    }

    fn fast() -> WatchSettings {
        WatchSettings {
            poll_interval: Duration::from_millis(1),
            timeout: Duration::from_millis(50),
        }
    }

    #[tokio::test]
    async fn test_confirmed_after_pending_and_error() {
        let source = ScriptedSource::new(vec![
            Ok(None),
            Err(RpcError::Timeout { secs: 30 }),
            Ok(Some(receipt("0x1"))),
        ]);

        let outcome = watch_receipt(&source, &TxHash::new("0xab"), fast()).await;
        assert_eq!(outcome, WatchOutcome::Confirmed { block: Some(100) });
    }

    #[tokio::test]
    async fn test_reverted() {
        let source = ScriptedSource::new(vec![Ok(Some(receipt("0x0")))]);
        let outcome = watch_receipt(&source, &TxHash::new("0xab"), fast()).await;
        assert_eq!(outcome, WatchOutcome::Reverted { block: Some(100) });
    }

    #[tokio::test]
    async fn test_timeout() {
        let source = ScriptedSource::new(vec![]);
        let outcome = watch_receipt(&source, &TxHash::new("0xab"), fast()).await;
        assert_eq!(outcome, WatchOutcome::Timeout);
    }
}
