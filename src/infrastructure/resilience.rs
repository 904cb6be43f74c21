//! Per-call timeouts and bounded retries for external calls

use std::future::Future;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::warn;
use validator::Validate;

use crate::domain::DomainError;

/// Exponential backoff for transient failures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    #[validate(range(max = 10))]
    pub max_retries: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    #[validate(range(min = 1.0, max = 10.0))]
    pub backoff_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_delay_ms: 200,
            max_delay_ms: 5000,
            backoff_multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Delay before retry number `attempt` (0-indexed)
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay = self.initial_delay_ms as f64 * self.backoff_multiplier.powi(attempt as i32);
        Duration::from_millis(delay.min(self.max_delay_ms as f64) as u64)
    }
}

/// Runs an operation under a timeout, retrying transient failures
#[derive(Debug, Clone)]
pub struct CallGuard {
    retry: RetryPolicy,
    call_timeout: Option<Duration>,
}

impl CallGuard {
    pub fn new(retry: RetryPolicy, call_timeout: Option<Duration>) -> Self {
        Self {
            retry,
            call_timeout,
        }
    }

    /// No timeout and no retries
    pub fn passthrough() -> Self {
        Self::new(RetryPolicy::none(), None)
    }

    pub async fn run<T, F, Fut>(&self, operation: &str, mut call: F) -> Result<T, DomainError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, DomainError>>,
    {
        let mut attempt = 0;

        loop {
            let result = match self.call_timeout {
                Some(limit) => match timeout(limit, call()).await {
                    Ok(result) => result,
                    Err(_) => Err(DomainError::timeout(operation, limit.as_millis() as u64)),
                },
                None => call().await,
            };

            match result {
                Err(e) if e.is_transient() && attempt < self.retry.max_retries => {
                    let delay = self.retry.delay_for_attempt(attempt);
                    warn!(
                        operation,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Transient failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                other => return other,
            }
        }
    }
}
