//! Backoff for read queries.

use std::time::Duration;

use crate::shopify::ShopifyError;

/// Retry policy for upstream reads.
///
/// Mutations are never retried: a timed-out `cartLinesAdd` may already have
/// been applied upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first.
    pub max_attempts: u32,
    /// Delay before the first retry; doubled on each further retry.
    pub base_delay: Duration,
    /// Upper bound for a single delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::with_retries(0)
    }
}

impl RetryPolicy {
    /// Policy allowing `retries` extra attempts after the first.
    #[must_use]
    pub const fn with_retries(retries: u32) -> Self {
        Self {
            max_attempts: retries.saturating_add(1),
            base_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(2),
        }
    }

    /// Delay before the next attempt, or `None` to give up.
    ///
    /// `attempt` is the 1-based number of the attempt that just failed. A
    /// `Retry-After` wait from upstream replaces the backoff; one longer
    /// than `max_delay` ends the retries.
    #[must_use]
    pub fn next_delay(&self, error: &ShopifyError, attempt: u32, is_query: bool) -> Option<Duration> {
        if !is_query || attempt >= self.max_attempts || !error.is_retryable() {
            return None;
        }

        if let Some(wait) = error.retry_after() {
            return (wait <= self.max_delay).then_some(wait);
        }

        let factor = 2_u32.saturating_pow(attempt.saturating_sub(1));
        Some(self.base_delay.saturating_mul(factor).min(self.max_delay))
    }
}
