//! Errors surfaced by a multicast send.

use thiserror::Error;

use crate::store::StoreError;
use crate::transport::TransportError;

/// Why a send did not complete.
///
/// Per-recipient terminal failures (`NotRegistered` etc.) are not errors; they
/// unregister the token and the send still succeeds.
#[derive(Debug, Error)]
pub enum SendError {
    /// HTTP 400: the server could not parse the request JSON.
    #[error("bad request: invalid JSON payload (HTTP 400)")]
    BadRequest,

    /// HTTP 401: the API key was rejected.
    #[error("unauthorized: API key rejected (HTTP 401)")]
    Unauthorized,

    /// The HTTP exchange itself failed. Not retried here.
    #[error("error sending request to FCM HTTP server: {0}")]
    Transport(#[source] TransportError),

    /// A 200 response whose body is not a multicast result.
    #[error("invalid response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The result list cannot be paired positionally with the tokens sent.
    #[error("response has {received} results for {sent} tokens sent")]
    ResultCountMismatch { sent: usize, received: usize },

    /// A store rename/delete failed during reconciliation.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Attempt budget spent while recipients still needed a retry.
    #[error("exhausted retry attempts after {attempts} attempts; {} tokens unconfirmed", .pending.len())]
    Exhausted { attempts: u32, pending: Vec<String> },

    /// The caller cancelled the send.
    #[error("send cancelled")]
    Cancelled,
}

impl SendError {
    /// Tokens that were never confirmed, if the send gave up on them.
    pub fn pending_tokens(&self) -> &[String] {
        match self {
            SendError::Exhausted { pending, .. } => pending,
            _ => &[],
        }
    }
}
