//! Exponential back-off for transient registry failures.
//!
//! [`retry_with_backoff`] wraps one page request. Only errors whose
//! [`RegistryError::kind`] is [`ErrorKind::Transient`] are retried; fatal and
//! parse errors are returned on the first occurrence.

use std::future::Future;
use std::time::Duration;

use crate::error::{ErrorKind, RegistryError};

/// Retry schedule for a single request.
///
/// The wait before retry `n` (1-based) is `base_delay * 2^(n-1)`, capped at
/// `max_delay`. `max_attempts` counts the first try, so `1` disables retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(8),
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no waiting. Handy in tests.
    #[must_use]
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Delay before the `retry`-th retry (1-based).
    #[must_use]
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 1u32 << retry.saturating_sub(1).min(20);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// Runs `operation` until it succeeds, fails non-transiently, or the policy's
/// attempts are used up. The last error is returned unchanged.
///
/// # Back-off schedule (default policy)
///
/// | Attempt | Sleep before it |
/// |---------|-----------------|
/// | 1       | none            |
/// | 2       | 0.5 s           |
/// | 3       | 1 s             |
///
/// Later retries continue doubling up to the 8 s cap.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    policy: RetryPolicy,
    mut operation: F,
) -> Result<T, RegistryError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, RegistryError>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if err.kind() != ErrorKind::Transient || attempt >= max_attempts {
                    return Err(err);
                }
                let delay = policy.delay_for(attempt);
                tracing::warn!(
                    attempt,
                    max_attempts,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "transient registry error, retrying after back-off"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}
