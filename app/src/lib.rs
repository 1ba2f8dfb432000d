//! Minter application library

pub mod commands;
pub mod connection;
pub mod mint;
pub mod tx_watcher;

#[cfg(test)]
mod testing;

use eth_rpc_client::{ContractClient, RpcClient, WalletClient};
use minter_core::AppConfig;
use tracing_subscriber::EnvFilter;

use commands::Command;
use mint::MintSession;

/// Session wired to the HTTP wallet and contract clients
pub type AppSession = MintSession<WalletClient, ContractClient>;

/// Build a session from configuration. No network calls are made.
pub fn build_session(config: &AppConfig) -> minter_core::Result<AppSession> {
    let contract = config.validate()?;
    let rpc = RpcClient::new(config.rpc.clone())?;
    let wallet = WalletClient::from_config(&config.wallet)?;

    tracing::info!(
        rpc = %config.rpc.url,
        contract = %contract,
        wallet = config.wallet.is_configured(),
        "Session configured"
    );

    Ok(MintSession::new(
        wallet,
        ContractClient::new(rpc, contract),
        config.explorer.clone(),
    ))
}

/// Install the global tracing subscriber (`RUST_LOG` overrides the default)
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("minter=debug,minter_lib=debug,info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run a parsed command against the loaded configuration
pub async fn run(command: Command) -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    tracing::info!("Starting Minter on {}", config.network);

    match command {
        Command::Status => commands::status(&config).await,
        Command::Mint { quantity, watch } => commands::mint(&config, quantity, watch).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eth_rpc_client::WalletProvider;

    #[test]
    fn test_build_session_requires_contract() {
        assert!(build_session(&AppConfig::default()).is_err());
    }

    #[test]
    fn test_build_session_without_wallet() {
        let mut config = AppConfig::default();
        config.contract.address = testing::CONTRACT.to_string();

        let session = build_session(&config).unwrap();
        assert!(!session.wallet().is_present());
        assert!(!session.connection().connected());
        assert_eq!(session.status(), &mint::MintStatus::NotMinting);
    }
}
