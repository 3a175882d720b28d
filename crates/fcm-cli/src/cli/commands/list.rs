//! `fcm list` – show registered tokens.

use anyhow::Result;
use fcm_core::TokenDb;

pub async fn run_list(db: &TokenDb) -> Result<()> {
    let tokens = db.list_tokens().await?;
    if tokens.is_empty() {
        println!("No tokens registered.");
    } else {
        for token in &tokens {
            println!("{token}");
        }
        println!("{} token(s)", tokens.len());
    }
    Ok(())
}
