//! Bounded exponential backoff for adapter calls
//!
//! Every registrar/provider call crossing a network boundary goes through
//! [`RetryPolicy::run`]. Classification comes from
//! [`crate::Error::is_retryable`]: fatal errors propagate immediately,
//! transient ones wait `base * 2^attempt` (capped) and retry. The backoff
//! sleep blocks the single execution path; nothing is retried concurrently
//! with itself.

use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::EngineConfig;
use crate::error::{Error, Result};

/// Retry policy with bounded exponential backoff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum attempts (first call included)
    pub max_attempts: usize,
    /// Wait before the first retry
    pub base_delay: Duration,
    /// Upper bound on any single wait
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// Build a policy from engine configuration
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            max_attempts: config.max_retry_attempts,
            base_delay: Duration::from_secs(config.retry_base_delay_secs),
            max_delay: Duration::from_secs(config.retry_max_delay_secs),
        }
    }

    /// Backoff delay before retry number `attempt` (0-based):
    /// `min(base * 2^attempt, max_delay)`
    pub fn delay_for(&self, attempt: usize) -> Duration {
        let factor = 1u32.checked_shl(attempt as u32).unwrap_or(u32::MAX);
        self.base_delay
            .checked_mul(factor)
            .map(|d| d.min(self.max_delay))
            .unwrap_or(self.max_delay)
    }

    /// Run `call` under this policy
    ///
    /// `operation` names the call in logs and in the terminal
    /// [`Error::RetryExhausted`]. Fatal errors propagate on first sight.
    pub async fn run<T, F, Fut>(&self, operation: &str, mut call: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut last_error: Option<Error> = None;

        for attempt in 0..self.max_attempts {
            if attempt > 0 {
                let delay = self.delay_for(attempt - 1);
                debug!(
                    operation,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "Backing off before retry"
                );
                tokio::time::sleep(delay).await;
            }

            match call().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() => {
                    warn!(operation, attempt, error = %e, "Transient failure, will retry");
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(Error::RetryExhausted {
            operation: operation.to_string(),
            attempts: self.max_attempts,
            message: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown error".to_string()),
        })
    }
}
