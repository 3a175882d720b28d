//! Per-recipient reconciliation of an accepted multicast response.
//!
//! `results[i]` answers `sent[i]`. Canonical ids rename tokens in the store,
//! unrecoverable errors delete them, and transient errors are collected (in
//! order) for the next attempt.

use tokio_util::sync::CancellationToken;

use crate::message::BatchResponse;
use crate::retry::{classify_result, RecipientOutcome, SendError};
use crate::store::Store;

/// Apply `response` to `store` and return the tokens to retry.
///
/// A response with no failures and no canonical ids is not inspected at all.
/// The first store error aborts the pass and is returned unchanged; mutations
/// already applied stay applied.
pub async fn reconcile(
    store: &dyn Store,
    cancel: &CancellationToken,
    sent: &[String],
    response: &BatchResponse,
) -> Result<Vec<String>, SendError> {
    if response.is_clean() {
        return Ok(Vec::new());
    }

    if response.results.len() != sent.len() {
        return Err(SendError::ResultCountMismatch {
            sent: sent.len(),
            received: response.results.len(),
        });
    }

    let mut retry = Vec::new();
    for (token, result) in sent.iter().zip(&response.results) {
        match classify_result(result) {
            RecipientOutcome::Delivered { .. } => {}
            RecipientOutcome::Renamed { new_token, .. } => {
                tracing::info!(old = %token, new = %new_token, "updating canonical token");
                store.rename(cancel, token, new_token).await?;
            }
            RecipientOutcome::Retry { reason } => {
                tracing::debug!(%token, reason, "recipient will be retried");
                retry.push(token.clone());
            }
            RecipientOutcome::Terminal { reason } => {
                tracing::info!(%token, reason, "unregistering token");
                store.delete(cancel, token).await?;
            }
        }
    }

    Ok(retry)
}
