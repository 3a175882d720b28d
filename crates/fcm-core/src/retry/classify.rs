//! Classify top-level HTTP status and per-recipient results for retry decisions.

use crate::message::RecipientResult;

/// Per-recipient error reasons that are worth another attempt.
pub const RETRYABLE_REASONS: &[&str] = &["Unavailable", "InternalServerError"];

/// Top-level outcome of one multicast exchange, by HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 200: body carries per-recipient results.
    Accepted,
    /// 400: the request JSON was rejected. Not retried.
    BadRequest,
    /// 401: the API key was rejected. Not retried.
    Unauthorized,
    /// Anything else; the whole batch is retried with backoff.
    Transient(u16),
}

/// Classify an HTTP status code.
pub fn classify_status(code: u16) -> StatusClass {
    match code {
        200 => StatusClass::Accepted,
        400 => StatusClass::BadRequest,
        401 => StatusClass::Unauthorized,
        other => StatusClass::Transient(other),
    }
}

pub fn is_retryable_reason(reason: &str) -> bool {
    RETRYABLE_REASONS.contains(&reason)
}

/// What to do with one recipient of an accepted batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipientOutcome<'a> {
    Delivered { message_id: &'a str },
    /// Delivered, and the server issued a canonical replacement token.
    Renamed { message_id: &'a str, new_token: &'a str },
    Retry { reason: &'a str },
    /// Unrecoverable (e.g. `NotRegistered`); the token gets unregistered.
    Terminal { reason: &'a str },
}

/// Classify one result entry. Empty strings count as absent.
pub fn classify_result(result: &RecipientResult) -> RecipientOutcome<'_> {
    if let Some(message_id) = non_empty(&result.message_id) {
        return match non_empty(&result.registration_id) {
            Some(new_token) => RecipientOutcome::Renamed {
                message_id,
                new_token,
            },
            None => RecipientOutcome::Delivered { message_id },
        };
    }

    let reason = non_empty(&result.error).unwrap_or("");
    if is_retryable_reason(reason) {
        RecipientOutcome::Retry { reason }
    } else {
        RecipientOutcome::Terminal { reason }
    }
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|s| !s.is_empty())
}
