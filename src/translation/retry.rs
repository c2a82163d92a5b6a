/*!
 * Retry policy for failed batch calls.
 *
 * The observed source behavior is best-effort: one attempt, fall back to
 * the original text. The policy keeps that as the default while letting
 * callers raise the attempt count with exponential backoff.
 */

use std::time::Duration;

use crate::app_config::RunConfig;

/// How many times a failed batch call is re-attempted, and how fast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts per batch, including the first (minimum 1)
    pub max_attempts: u32,
    /// Base backoff in milliseconds, doubled per failed attempt
    pub backoff_base_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            backoff_base_ms: 1000,
        }
    }
}

impl RetryPolicy {
    /// Derive the policy from a run configuration
    pub fn from_run_config(config: &RunConfig) -> Self {
        Self {
            max_attempts: config.retry_count.saturating_add(1).max(1),
            backoff_base_ms: config.retry_backoff_ms,
        }
    }

    /// Delay to wait after the given failed attempt (1-based)
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        Duration::from_millis(self.backoff_base_ms.saturating_mul(1u64 << exponent))
    }
}
