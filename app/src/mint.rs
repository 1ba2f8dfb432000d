//! Mint session and transaction lifecycle
//!
//! `MintSession` owns the wallet connection, the last-read contract supply
//! state and the status of the current mint attempt. Supply counters are
//! re-read before every mint, since each successful mint moves them:
//!
//! ```text
//! NotMinting -> Pending{n} -> Success{tx} | Fail{error}
//! Success | Fail -> Pending{m}          (only via another mint call)
//! ```
//!
//! Submission is optimistic: a transaction hash from the wallet is treated as
//! success without waiting for the transaction to be mined.

use eth_rpc_client::{ContractReader, WalletProvider};
use minter_core::{Address, ExplorerConfig, ProtocolError, TxHash, WalletError};
use nft_mint::{MintPreview, SupplyState};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::broadcast;

use crate::connection::ConnectionState;

/// Shown for any wallet or transport failure during submission
pub const FAIL_SUBMISSION: &str = "Transaction was not submitted. Please try again.";

/// Internal-failure marker, distinct from user-facing provider errors
pub const FAIL_INTERNAL: &str = "dev";

const STATUS_CHANNEL_CAPACITY: usize = 16;

/// Status of the current mint attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum MintStatus {
    NotMinting,
    Pending { quantity: u64 },
    Success { tx_hash: TxHash, tx_hash_url: String },
    Fail { error: String },
}

impl MintStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotMinting => "not_minting",
            Self::Pending { .. } => "pending",
            Self::Success { .. } => "success",
            Self::Fail { .. } => "fail",
        }
    }
}

/// Reasons `mint` declines to start. The status is left untouched.
#[derive(Debug, Error)]
pub enum MintRejection {
    #[error("No wallet found. Install or configure a wallet to mint.")]
    NoWallet,

    #[error("Connect a wallet before minting.")]
    NotConnected,

    #[error("Quantity must be at least 1 (got {quantity}).")]
    InvalidQuantity { quantity: i64 },

    #[error("Mint contract state unavailable: {0}")]
    StateUnavailable(#[from] ProtocolError),
}

pub struct MintSession<W, R> {
    wallet: W,
    reader: R,
    explorer: ExplorerConfig,
    connection: ConnectionState,
    supply: Option<SupplyState>,
    status: MintStatus,
    events: broadcast::Sender<MintStatus>,
}

impl<W: WalletProvider, R: ContractReader> MintSession<W, R> {
    pub fn new(wallet: W, reader: R, explorer: ExplorerConfig) -> Self {
        let (events, _) = broadcast::channel(STATUS_CHANNEL_CAPACITY);
        Self {
            wallet,
            reader,
            explorer,
            connection: ConnectionState::new(),
            supply: None,
            status: MintStatus::NotMinting,
            events,
        }
    }

    /// Silent reconnect plus an initial contract read.
    ///
    /// A failed read is returned but leaves the session usable; `mint` reads
    /// again before submitting.
    pub async fn initialize(&mut self) -> Result<SupplyState, ProtocolError> {
        self.connection.reconnect(&self.wallet).await;
        self.refresh_supply().await
    }

    /// Reset and request wallet authorization. Failures are logged by the
    /// connection state and never affect the mint status.
    pub async fn connect(&mut self) -> Result<Address, WalletError> {
        self.connection.connect(&self.wallet).await
    }

    pub fn disconnect(&mut self) {
        self.connection.disconnect();
    }

    /// Re-read supply counters and price from the contract
    pub async fn refresh_supply(&mut self) -> Result<SupplyState, ProtocolError> {
        let supply = nft_mint::fetch_supply_state(&self.reader).await?;
        self.supply = Some(supply);
        Ok(supply)
    }

    pub fn connection(&self) -> &ConnectionState {
        &self.connection
    }

    pub fn supply(&self) -> Option<&SupplyState> {
        self.supply.as_ref()
    }

    pub fn status(&self) -> &MintStatus {
        &self.status
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Receive every status transition from now on
    pub fn subscribe(&self) -> broadcast::Receiver<MintStatus> {
        self.events.subscribe()
    }

    /// Whether a mint may be started (never while one is pending)
    pub fn can_mint(&self) -> bool {
        !self.status.is_pending()
    }

    /// Price split for `quantity` against the last-read supply state
    pub fn preview(&self, quantity: u64) -> Option<MintPreview> {
        self.supply
            .as_ref()
            .map(|s| nft_mint::preview_mint(quantity, s))
    }

    /// Attempt to mint `quantity` tokens.
    ///
    /// Environment and validation problems return `Err` without touching the
    /// status. Once the preconditions pass, the status moves to `Pending` and
    /// then to `Success` or `Fail`, which is returned.
    pub async fn mint(&mut self, quantity: i64) -> Result<&MintStatus, MintRejection> {
        if !self.wallet.is_present() {
            tracing::warn!("Mint requested without a wallet provider");
            return Err(MintRejection::NoWallet);
        }

        let from = self
            .connection
            .address()
            .cloned()
            .ok_or(MintRejection::NotConnected)?;

        if quantity < 1 {
            return Err(MintRejection::InvalidQuantity { quantity });
        }
        let quantity = quantity as u64;

        // Price against current counters; earlier mints may have moved them
        let supply = self.refresh_supply().await?;

        self.transition(MintStatus::Pending { quantity });

        let tx = match nft_mint::build_mint_tx(&from, self.reader.contract(), quantity, &supply) {
            Ok(tx) => tx,
            Err(e) => {
                tracing::error!("Failed to build mint transaction: {}", e);
                self.transition(MintStatus::Fail {
                    error: FAIL_INTERNAL.to_string(),
                });
                return Ok(&self.status);
            }
        };

        tracing::info!(
            from = %from.display_address(),
            quantity,
            value = %tx.value,
            "Submitting mint transaction"
        );

        let next = match self.wallet.send_transaction(&tx).await {
            Ok(hash) if hash.is_well_formed() => {
                let tx_hash_url = self.explorer.tx_url(hash.as_str());
                tracing::info!(tx_hash = %hash, "Mint transaction submitted");
                MintStatus::Success {
                    tx_hash: hash,
                    tx_hash_url,
                }
            }
            Ok(hash) => {
                tracing::error!(tx_hash = %hash, "Wallet returned a malformed transaction hash");
                MintStatus::Fail {
                    error: FAIL_INTERNAL.to_string(),
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "Mint submission failed");
                MintStatus::Fail {
                    error: FAIL_SUBMISSION.to_string(),
                }
            }
        };

        self.transition(next);
        Ok(&self.status)
    }

    fn transition(&mut self, next: MintStatus) {
        tracing::debug!("Mint status {} -> {}", self.status.as_str(), next.as_str());
        self.status = next.clone();
        // No subscribers is fine
        let _ = self.events.send(next);
    }
}
