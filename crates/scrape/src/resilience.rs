//! Retry support for listing sources
//!
//! Both sites flake in the same ways (timeouts, transient 5xx, pages that
//! render empty), so sources share one bounded-retry loop with exponential
//! backoff.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::SourceError;

/// Default request timeout
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default max retries for transient failures
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default base delay for exponential backoff
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 1000;

/// Retry configuration for a source
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum retry attempts after the first failure
    pub max_retries: u32,
    /// Base delay for exponential backoff (doubles each retry)
    pub retry_base_delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_base_delay_ms: DEFAULT_RETRY_BASE_DELAY_MS,
        }
    }
}

impl RetryPolicy {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get retry delay for attempt N (exponential backoff)
    pub fn retry_delay(&self, attempt: u32) -> Duration {
        let delay_ms = self.retry_base_delay_ms * (1 << attempt.min(6)); // cap at 64x
        Duration::from_millis(delay_ms)
    }
}

/// Run a fetch operation, retrying transient failures with backoff
///
/// Non-retryable errors surface immediately. Retryable ones are tried
/// `max_retries` more times before giving up with
/// [`SourceError::Exhausted`].
pub async fn fetch_with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    source: &'static str,
    mut operation: F,
) -> Result<T, SourceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SourceError>>,
{
    let mut last_error = None;

    for attempt in 0..=policy.max_retries {
        if attempt > 0 {
            let delay = policy.retry_delay(attempt - 1);
            debug!(
                source,
                attempt,
                delay_ms = delay.as_millis(),
                "retrying after delay"
            );
            tokio::time::sleep(delay).await;
        }

        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if !e.is_retryable() => return Err(e),
            Err(e) => {
                if attempt < policy.max_retries {
                    warn!(source, attempt, error = %e, "fetch failed, will retry");
                }
                last_error = Some(e.to_string());
            }
        }
    }

    Err(SourceError::Exhausted {
        source_name: source,
        attempts: policy.max_retries + 1,
        last_error: last_error.unwrap_or_else(|| "unknown error".to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Policy with millisecond delays so tests finish quickly
    fn fast_policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            timeout_secs: 1,
            max_retries,
            retry_base_delay_ms: 1,
        }
    }

    #[test]
    fn test_retry_delay_doubles() {
        let policy = RetryPolicy {
            retry_base_delay_ms: 100,
            ..RetryPolicy::default()
        };
        assert_eq!(policy.retry_delay(0), Duration::from_millis(100));
        assert_eq!(policy.retry_delay(1), Duration::from_millis(200));
        assert_eq!(policy.retry_delay(2), Duration::from_millis(400));
    }

    #[test]
    fn test_retry_delay_is_capped() {
        let policy = RetryPolicy {
            retry_base_delay_ms: 100,
            ..RetryPolicy::default()
        };
        assert_eq!(policy.retry_delay(10), Duration::from_millis(6400));
    }

    #[tokio::test]
    async fn test_success_needs_no_retry() {
        let mut calls = 0;
        let result = fetch_with_retry(&fast_policy(3), "test", || {
            calls += 1;
            async { Ok(42) }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn test_recovers_after_transient_failure() {
        let mut calls = 0;
        let result = fetch_with_retry(&fast_policy(3), "test", || {
            calls += 1;
            let n = calls;
            async move {
                if n == 1 {
                    Err(SourceError::empty("test"))
                } else {
                    Ok(n)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls, 2);
    }

    #[tokio::test]
    async fn test_retryable_failures_exhaust_attempts() {
        let mut calls = 0;
        let result: Result<u32, SourceError> = fetch_with_retry(&fast_policy(3), "test", || {
            calls += 1;
            async { Err(SourceError::empty("test")) }
        })
        .await;

        assert!(matches!(
            result,
            Err(SourceError::Exhausted { attempts: 4, .. })
        ));
        assert_eq!(calls, 4);
    }

    #[tokio::test]
    async fn test_permanent_error_stops_immediately() {
        let mut calls = 0;
        let result: Result<u32, SourceError> = fetch_with_retry(&fast_policy(3), "test", || {
            calls += 1;
            async { Err(SourceError::Init("bad client".into())) }
        })
        .await;

        assert!(matches!(result, Err(SourceError::Init(_))));
        assert_eq!(calls, 1);
    }
}
