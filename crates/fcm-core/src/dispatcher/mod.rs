//! Multicast send loop: send, reconcile, back off, narrow, repeat.
//!
//! One `send` is a sequential loop owning its own `BackoffState`. It suspends in
//! exactly two places, the transport exchange and the backoff wait, and both
//! race the caller's cancellation token. Store mutations already applied are
//! not undone on cancellation.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;

use crate::clock::{Clock, Delay, SystemClock, TokioDelay};
use crate::config::FcmConfig;
use crate::message::{BatchResponse, HttpMessage};
use crate::reconcile::reconcile;
use crate::retry::{
    classify_status, parse_retry_after, BackoffState, RetryDecision, RetryPolicy, SendError,
    StatusClass,
};
use crate::store::Store;
use crate::transport::{CurlTransport, Transport};


/// Client for the FCM legacy multicast API.
///
/// Cheap to share: every collaborator is behind an `Arc` and `send` takes `&self`,
/// so concurrent sends only share the store.
#[derive(Clone)]
pub struct FcmClient {
    transport: Arc<dyn Transport>,
    store: Arc<dyn Store>,
    policy: RetryPolicy,
    clock: Arc<dyn Clock>,
    delay: Arc<dyn Delay>,
}

impl FcmClient {
    /// Client with the system clock and tokio timer.
    pub fn new(transport: Arc<dyn Transport>, store: Arc<dyn Store>, policy: RetryPolicy) -> Self {
        Self {
            transport,
            store,
            policy,
            clock: Arc::new(SystemClock),
            delay: Arc::new(TokioDelay),
        }
    }

    /// Curl transport and retry policy taken from `cfg`.
    pub fn from_config(cfg: &FcmConfig, store: Arc<dyn Store>) -> anyhow::Result<Self> {
        let transport = CurlTransport::from_config(cfg)?;
        Ok(Self::new(Arc::new(transport), store, cfg.retry_policy()))
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_delay(mut self, delay: Arc<dyn Delay>) -> Self {
        self.delay = delay;
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Send `message`, retrying transient failures with backoff and reconciling
    /// every recipient result against the store.
    ///
    /// Returns the decoded response of the last attempt.
    pub async fn send(
        &self,
        message: &HttpMessage,
        cancel: &CancellationToken,
    ) -> Result<BatchResponse, SendError> {
        let mut state = BackoffState::new(&self.policy);
        let mut batch = message.clone();

        loop {
            let resp = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(SendError::Cancelled),
                r = self.transport.send(&batch) => r.map_err(SendError::Transport)?,
            };
            let hint = parse_retry_after(resp.retry_after.as_deref(), self.clock.now());

            let pending = match classify_status(resp.status) {
                StatusClass::BadRequest => return Err(SendError::BadRequest),
                StatusClass::Unauthorized => return Err(SendError::Unauthorized),
                StatusClass::Accepted => {
                    let decoded: BatchResponse =
                        serde_json::from_slice(&resp.body).map_err(SendError::Decode)?;
                    let retry = reconcile(
                        self.store.as_ref(),
                        cancel,
                        &batch.registration_ids,
                        &decoded,
                    )
                    .await?;
                    if retry.is_empty() {
                        tracing::debug!(
                            attempt = state.attempt,
                            success = decoded.success,
                            "multicast send complete"
                        );
                        return Ok(decoded);
                    }
                    retry
                }
                StatusClass::Transient(code) => {
                    tracing::warn!(
                        status = code,
                        attempt = state.attempt,
                        "transient server status"
                    );
                    batch.registration_ids.clone()
                }
            };

            let attempt = state.attempt;
            match self.policy.decide(hint, &mut state) {
                RetryDecision::Exhausted => {
                    tracing::warn!(
                        attempts = attempt,
                        pending = pending.len(),
                        "exhausted retry attempts"
                    );
                    return Err(SendError::Exhausted {
                        attempts: attempt,
                        pending,
                    });
                }
                RetryDecision::RetryAfter(wait) => {
                    tracing::warn!(
                        pending = pending.len(),
                        "attempt {} of {} incomplete, retrying in {:?}",
                        attempt,
                        self.policy.max_attempts,
                        wait
                    );
                    tracing::debug!("retrying registration ids: {:?}", pending);
                    batch.registration_ids = pending;
                    tokio::select! {
                        biased;
                        _ = cancel.cancelled() => return Err(SendError::Cancelled),
                        _ = self.delay.sleep(wait) => {}
                    }
                }
            }
        }
    }
}
