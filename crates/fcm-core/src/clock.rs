//! Time capabilities injected into the client: wall clock and inter-attempt delay.
//!
//! Both are plain trait objects owned by the client so concurrent sends never
//! share mutable time state, and tests can pin "now" or record sleeps.

use async_trait::async_trait;
use std::time::{Duration, SystemTime};

/// Source of "now" for Retry-After date arithmetic.
pub trait Clock: Send + Sync {
    fn now(&self) -> SystemTime;
}

/// The real wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Waits between attempts. Cancellation is handled by the caller racing this future.
#[async_trait]
pub trait Delay: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Sleeps on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

#[async_trait]
impl Delay for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
