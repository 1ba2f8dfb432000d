//! Wallet connection state
//!
//! Tracks whether a wallet account is connected. Connection problems are never
//! fatal: they are logged and the state simply stays disconnected.

use eth_rpc_client::WalletProvider;
use minter_core::{Address, WalletError};

/// The connected account, if any
#[derive(Clone, Debug, Default)]
pub struct ConnectionState {
    address: Option<Address>,
}

impl ConnectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connected(&self) -> bool {
        self.address.is_some()
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    /// Shortened address for display, empty when disconnected
    pub fn display_address(&self) -> String {
        self.address()
            .map(Address::display_address)
            .unwrap_or_default()
    }

    pub fn disconnect(&mut self) {
        if let Some(address) = self.address.take() {
            tracing::info!("Disconnected {}", address.display_address());
        }
    }

    /// Reset, then ask the wallet to authorize an account.
    ///
    /// Errors are logged as warnings and returned for callers that care; the
    /// state is left disconnected in every failure case.
    pub async fn connect<W: WalletProvider>(&mut self, wallet: &W) -> Result<Address, WalletError> {
        self.address = None;

        if !wallet.is_present() {
            tracing::warn!("No wallet provider available; install or configure a wallet to connect");
            return Err(WalletError::NotPresent);
        }

        let accounts = match wallet.request_accounts().await {
            Ok(accounts) => accounts,
            Err(e) => {
                tracing::warn!("Wallet connection failed: {}", e);
                return Err(e);
            }
        };

        self.adopt_first(accounts).inspect_err(|e| {
            tracing::warn!("Wallet connection failed: {}", e);
        })
    }

    /// Pick up an already-authorized account without prompting the user.
    ///
    /// Returns `None` (and stays disconnected) when the wallet is absent, has
    /// nothing authorized, or the lookup fails.
    pub async fn reconnect<W: WalletProvider>(&mut self, wallet: &W) -> Option<Address> {
        if !wallet.is_present() {
            tracing::debug!("No wallet provider; skipping silent reconnect");
            return None;
        }

        match wallet.authorized_accounts().await {
            Ok(accounts) => self.adopt_first(accounts).ok(),
            Err(e) => {
                tracing::warn!("Silent reconnect failed: {}", e);
                None
            }
        }
    }

    fn adopt_first(&mut self, accounts: Vec<Address>) -> Result<Address, WalletError> {
        let address = accounts.into_iter().next().ok_or(WalletError::NoAccounts)?;
        tracing::info!("Wallet connected: {}", address.display_address());
        self.address = Some(address.clone());
        Ok(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeWallet;

    #[tokio::test]
    async fn test_connect_success() {
        let wallet = FakeWallet::with_account();
        let mut conn = ConnectionState::new();

        let addr = conn.connect(&wallet).await.unwrap();
        assert!(conn.connected());
        assert_eq!(conn.address(), Some(&addr));
        assert_eq!(conn.display_address(), "0x5aAe...eAed");
    }

    #[tokio::test]
    async fn test_connect_without_provider() {
        let wallet = FakeWallet::absent();
        let mut conn = ConnectionState::new();

        assert!(matches!(
            conn.connect(&wallet).await,
            Err(WalletError::NotPresent)
        ));
        assert!(!conn.connected());
        assert_eq!(conn.display_address(), "");
    }

    #[tokio::test]
    async fn test_rejected_connect_resets_previous_account() {
        let mut conn = ConnectionState::new();
        conn.connect(&FakeWallet::with_account()).await.unwrap();
        assert!(conn.connected());

        let rejecting = FakeWallet::rejecting_accounts();
        assert!(matches!(
            conn.connect(&rejecting).await,
            Err(WalletError::Rejected { .. })
        ));
        assert!(!conn.connected());
    }

    #[tokio::test]
    async fn test_connect_with_no_accounts() {
        let mut conn = ConnectionState::new();
        let wallet = FakeWallet::with_accounts(vec![]);
        assert!(matches!(
            conn.connect(&wallet).await,
            Err(WalletError::NoAccounts)
        ));
        assert!(!conn.connected());
    }

    #[tokio::test]
    async fn test_silent_reconnect() {
        let wallet = FakeWallet::with_account().authorized(true);
        let mut conn = ConnectionState::new();
        assert!(conn.reconnect(&wallet).await.is_some());
        assert!(conn.connected());
        assert_eq!(wallet.prompts(), 0);

        let wallet = FakeWallet::with_account().authorized(false);
        let mut conn = ConnectionState::new();
        assert!(conn.reconnect(&wallet).await.is_none());
        assert!(!conn.connected());
    }

    #[tokio::test]
    async fn test_disconnect() {
        let mut conn = ConnectionState::new();
        conn.connect(&FakeWallet::with_account()).await.unwrap();
        conn.disconnect();
        assert!(!conn.connected());
        assert_eq!(conn.address(), None);
    }
}
