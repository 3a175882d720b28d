//! Token registry: the collaborator a send reconciles per-recipient results against.
//!
//! The engine only needs two mutations, `rename` and `delete`. `TokenDb` keeps
//! tokens in SQLite (sqlx); `MemStore` keeps them in memory. Both are safe to
//! share between concurrent sends.

mod db;
mod memory;
mod tokens;

#[cfg(test)]
mod tests;

use async_trait::async_trait;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

pub use db::TokenDb;
pub use memory::MemStore;

/// Errors returned by a token store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The token to rename is not registered.
    #[error("token not found: {0}")]
    NotFound(String),

    #[error("token database: {0}")]
    Db(#[from] sqlx::Error),

    #[error("store operation cancelled")]
    Cancelled,
}

/// Mutations a send applies while reconciling results.
#[async_trait]
pub trait Store: Send + Sync {
    /// Replace `old` with the canonical `new` token.
    async fn rename(&self, cancel: &CancellationToken, old: &str, new: &str)
        -> Result<(), StoreError>;

    /// Unregister `token` (app removed from the device, or an unrecoverable error).
    async fn delete(&self, cancel: &CancellationToken, token: &str) -> Result<(), StoreError>;
}
