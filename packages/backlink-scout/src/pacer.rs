//! Minimum spacing between successive calls to one API.

use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::time::Duration;

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Lets one call through per `spacing`. A zero spacing turns pacing off.
pub struct Pacer {
    limiter: Option<DirectRateLimiter>,
}

impl Pacer {
    pub fn new(spacing: Duration) -> Self {
        Self {
            limiter: Quota::with_period(spacing).map(RateLimiter::direct),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.limiter.is_some()
    }

    /// Wait until the next call may go out.
    pub async fn wait(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }
}
