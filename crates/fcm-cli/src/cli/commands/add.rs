//! `fcm add <token>` – register a device token.

use anyhow::Result;
use fcm_core::TokenDb;

pub async fn run_add(db: &TokenDb, token: &str) -> Result<()> {
    if db.add_token(token).await? {
        println!("Added token {token}");
    } else {
        println!("Token {token} is already registered");
    }
    Ok(())
}
