use std::time::Duration;

use crate::config::RetryConfig;

/// Decision returned by the retry policy once an attempt left work behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Attempt budget is spent; stop and report exhaustion.
    Exhausted,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Exponential backoff bounds plus the attempt budget.
///
/// Immutable for the lifetime of a client; each send owns its own [`BackoffState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Floor for every wait, and the starting point of the exponential curve.
    pub min_backoff: Duration,
    /// Ceiling for computed waits. Server hints may exceed it.
    pub max_backoff: Duration,
    /// Maximum number of attempts (including the first).
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            min_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(10),
            max_attempts: 5,
        }
    }
}

/// Seconds to `Duration`, saturating: NaN and negatives become zero, values too
/// large for a `Duration` become `Duration::MAX`.
fn secs_saturating(secs: f64) -> Duration {
    if secs.is_nan() || secs <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(cfg: &RetryConfig) -> Self {
        Self {
            min_backoff: secs_saturating(cfg.min_backoff_secs),
            max_backoff: secs_saturating(cfg.max_backoff_secs),
            max_attempts: cfg.max_attempts.max(1),
        }
    }
}

/// Per-send backoff state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffState {
    /// Last computed (non-hinted) wait.
    pub current: Duration,
    /// 1-based number of the attempt in flight.
    pub attempt: u32,
}

impl BackoffState {
    pub fn new(policy: &RetryPolicy) -> Self {
        Self {
            current: policy.min_backoff,
            attempt: 1,
        }
    }
}

impl RetryPolicy {
    /// Wait before the next attempt.
    ///
    /// A server hint wins, floored at `min_backoff` but never capped, and it leaves
    /// the exponential curve untouched. Without a hint the current interval doubles,
    /// is clamped into `[min_backoff, max_backoff]` and becomes the new current.
    pub fn next_delay(&self, hint: Option<Duration>, state: &mut BackoffState) -> Duration {
        if let Some(hint) = hint {
            return hint.max(self.min_backoff);
        }
        let doubled = state.current.saturating_mul(2);
        let delay = doubled.min(self.max_backoff).max(self.min_backoff);
        state.current = delay;
        delay
    }

    /// Called after an attempt that still has recipients to retry.
    ///
    /// Returns `Exhausted` when the attempt just made was the last one allowed;
    /// otherwise advances `state.attempt` and returns the wait.
    pub fn decide(&self, hint: Option<Duration>, state: &mut BackoffState) -> RetryDecision {
        if state.attempt >= self.max_attempts {
            return RetryDecision::Exhausted;
        }
        let delay = self.next_delay(hint, state);
        state.attempt += 1;
        RetryDecision::RetryAfter(delay)
    }
}
