//! `fcm remove <token>` – unregister a device token.

use anyhow::Result;
use fcm_core::TokenDb;

pub async fn run_remove(db: &TokenDb, token: &str) -> Result<()> {
    if db.remove_token(token).await? {
        println!("Removed token {token}");
    } else {
        tracing::debug!(%token, "remove: token not registered");
        println!("Token {token} was not registered");
    }
    Ok(())
}
