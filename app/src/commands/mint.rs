use minter_core::{format_ether, AppConfig};

use crate::build_session;
use crate::mint::MintStatus;
use crate::tx_watcher::{watch_receipt, WatchSettings};

/// Connect (silently if possible), then submit a mint of `quantity` tokens.
///
/// Rejections are printed as guidance; they are not process errors.
pub async fn mint(config: &AppConfig, quantity: i64, watch: bool) -> anyhow::Result<()> {
    let mut session = build_session(config)?;

    if let Err(e) = session.initialize().await {
        tracing::warn!("Contract state unavailable: {}", e);
    }

    if !session.connection().connected() {
        // Failure is already logged; mint() below reports what the user must do
        let _ = session.connect().await;
    }

    if quantity > 0 {
        if let Some(preview) = session.preview(quantity as u64) {
            println!(
                "Minting {} ({} free, {} paid) for {} ETH",
                preview.quantity,
                preview.free_quantity,
                preview.paid_quantity,
                format_ether(preview.value_wei)
            );
            if preview.exceeds_remaining_supply {
                tracing::warn!(
                    "Only {} tokens remain; the contract will likely reject this mint",
                    preview.remaining_supply
                );
            }
        }
    }

    let status = match session.mint(quantity).await {
        Ok(status) => status.clone(),
        Err(rejection) => {
            println!("{}", rejection);
            return Ok(());
        }
    };

    println!("{}", serde_json::to_string_pretty(&status)?);

    if let MintStatus::Success { tx_hash, .. } = &status {
        if watch {
            let outcome =
                watch_receipt(session.reader().rpc(), tx_hash, WatchSettings::default()).await;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
    }

    Ok(())
}
