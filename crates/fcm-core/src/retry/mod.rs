//! Retry and backoff policy.
//!
//! This module encapsulates status/reason classification, Retry-After parsing
//! and the exponential backoff state machine so the dispatcher only has to
//! sequence attempts.

mod classify;
mod error;
mod policy;
mod retry_after;

pub use classify::{
    classify_result, classify_status, is_retryable_reason, RecipientOutcome, StatusClass,
    RETRYABLE_REASONS,
};
pub use error::SendError;
pub use policy::{BackoffState, RetryDecision, RetryPolicy};
pub use retry_after::parse_retry_after;
