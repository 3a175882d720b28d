//! `fcm message <file.json>` – send a full message read from disk.

use anyhow::{Context, Result};
use fcm_core::config::FcmConfig;
use fcm_core::{HttpMessage, TokenDb};
use std::path::Path;

use super::send::send_message;

pub async fn run_message(db: &TokenDb, cfg: &FcmConfig, path: &Path) -> Result<()> {
    let message = read_message(path)?;
    let message = if message.registration_ids.is_empty() {
        message.with_recipients(db.list_tokens().await?)
    } else {
        message
    };
    send_message(db, cfg, &message).await
}

pub(crate) fn read_message(path: &Path) -> Result<HttpMessage> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read message {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("failed to parse message {}", path.display()))
}
