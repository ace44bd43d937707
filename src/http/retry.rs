use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, RETRY_AFTER};

/// Statuses that are retried while budget remains.
pub const RETRYABLE_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_BACKOFF_FACTOR: Duration = Duration::from_millis(300);
pub const MAX_BACKOFF: Duration = Duration::from_secs(120);

/// Retry budget and exponential backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff_factor: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_factor: DEFAULT_BACKOFF_FACTOR,
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub const fn new(max_retries: u32, backoff_factor: Duration) -> Self {
        Self {
            max_retries,
            backoff_factor,
        }
    }

    /// A policy that makes exactly one attempt.
    #[must_use]
    pub const fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    /// Total attempts allowed, the first one included.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    #[must_use]
    pub fn should_retry_status(status: StatusCode) -> bool {
        RETRYABLE_STATUSES.contains(&status.as_u16())
    }

    #[must_use]
    pub fn should_retry_error(err: &reqwest::Error) -> bool {
        err.is_connect() || err.is_timeout()
    }

    /// Sleep before retry `retry` (1-based): nothing before the first retry,
    /// then `factor * 2^(retry-1)`, capped at [`MAX_BACKOFF`].
    #[must_use]
    pub fn backoff(&self, retry: u32) -> Duration {
        if retry <= 1 {
            return Duration::ZERO;
        }
        let exponent = retry.saturating_sub(1);
        let multiplier = 1_u32.checked_shl(exponent).unwrap_or(u32::MAX);
        self.backoff_factor
            .saturating_mul(multiplier)
            .min(MAX_BACKOFF)
    }

    /// Backoff for a retryable response: a `Retry-After` header in seconds
    /// on 429/503 replaces the computed delay.
    #[must_use]
    pub fn backoff_for_response(&self, retry: u32, status: StatusCode, headers: &HeaderMap) -> Duration {
        if matches!(
            status,
            StatusCode::TOO_MANY_REQUESTS | StatusCode::SERVICE_UNAVAILABLE
        ) && let Some(delay) = retry_after(headers)
        {
            return delay.min(MAX_BACKOFF);
        }
        self.backoff(retry)
    }
}

/// Parses a `Retry-After` header given in whole seconds. HTTP-date values are
/// ignored.
fn retry_after(headers: &HeaderMap) -> Option<Duration> {
    let value = headers.get(RETRY_AFTER)?.to_str().ok()?;
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}
