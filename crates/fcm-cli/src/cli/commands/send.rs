//! Shared send path for `notify` and `message`.

use anyhow::{bail, Result};
use fcm_core::config::FcmConfig;
use fcm_core::{FcmClient, HttpMessage, TokenDb};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Send `message` through a client built from `cfg`, with the token db as store.
/// Ctrl-C cancels the send; store updates already made are kept.
pub async fn send_message(db: &TokenDb, cfg: &FcmConfig, message: &HttpMessage) -> Result<()> {
    if message.registration_ids.is_empty() {
        bail!("no recipients: register tokens with `fcm add` first");
    }

    let client = FcmClient::from_config(cfg, Arc::new(db.clone()))?;
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, cancelling send");
            on_interrupt.cancel();
        }
    });

    let total = message.registration_ids.len();
    let result = client.send(message, &cancel).await;
    ctrl_c.abort();

    match result {
        Ok(resp) => {
            println!(
                "Sent to {total} token(s): multicast {} ({} ok, {} failed, {} canonical)",
                resp.multicast_id, resp.success, resp.failure, resp.canonical_ids
            );
            Ok(())
        }
        Err(err) => {
            for token in err.pending_tokens() {
                eprintln!("unconfirmed: {token}");
            }
            Err(err.into())
        }
    }
}
