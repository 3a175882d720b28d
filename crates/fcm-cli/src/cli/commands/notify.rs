//! `fcm notify --title T --body B [--data k=v]...` – notify every registered token.

use anyhow::Result;
use fcm_core::config::FcmConfig;
use fcm_core::{Data, HttpMessage, Notification, TokenDb};

use super::send::send_message;

pub async fn run_notify(
    db: &TokenDb,
    cfg: &FcmConfig,
    title: &str,
    body: &str,
    data: Vec<(String, String)>,
) -> Result<()> {
    let tokens = db.list_tokens().await?;
    let message = HttpMessage::new(
        tokens,
        data_payload(data),
        Some(Notification::simple(title, body)),
    );
    send_message(db, cfg, &message).await
}

/// `None` when no `--data` was given so the field is left out of the request.
pub(crate) fn data_payload(pairs: Vec<(String, String)>) -> Option<Data> {
    if pairs.is_empty() {
        return None;
    }
    Some(
        pairs
            .into_iter()
            .map(|(k, v)| (k, serde_json::Value::String(v)))
            .collect(),
    )
}
