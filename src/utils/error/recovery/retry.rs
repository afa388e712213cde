//! Retry mechanism with exponential backoff

use super::types::{RetryConfig, Retryable};
use std::time::Duration;
use tracing::{debug, error};

/// Retry mechanism with exponential backoff
///
/// Attempts run strictly one after another: the next attempt only starts
/// once the previous one has returned and the backoff delay has elapsed.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    /// Create a new retry policy
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// Get current configuration
    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Execute a function with retry logic
    ///
    /// Errors that are not [`Retryable::is_retryable`] are returned at once.
    /// Retryable errors are retried until `max_attempts` is reached, after
    /// which the last error is returned.
    pub async fn call<F, Fut, R, E>(&self, mut f: F) -> std::result::Result<R, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: std::future::Future<Output = std::result::Result<R, E>>,
        E: Retryable + std::fmt::Display,
    {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;

            match f(attempt).await {
                Ok(result) => {
                    if attempt > 1 {
                        debug!("Retry succeeded on attempt {}", attempt);
                    }
                    return Ok(result);
                }
                Err(error) if !error.is_retryable() => {
                    debug!("Attempt {} failed with terminal error: {}", attempt, error);
                    return Err(error);
                }
                Err(error) => {
                    if attempt >= max_attempts {
                        error!("Retry failed after {} attempts: {}", attempt, error);
                        return Err(error);
                    }

                    let delay = error
                        .retry_after()
                        .map(|suggested| suggested.min(self.config.max_delay()))
                        .unwrap_or_else(|| self.jittered(self.config.delay_for_attempt(attempt)));

                    debug!(
                        "Attempt {} failed: {}, retrying in {:?}",
                        attempt, error, delay
                    );

                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    fn jittered(&self, delay: Duration) -> Duration {
        if !self.config.jitter {
            return delay;
        }
        let jitter_factor = 0.1;
        let jitter = delay.as_millis() as f64 * jitter_factor * (rand::random::<f64>() - 0.5);
        Duration::from_millis((delay.as_millis() as f64 + jitter).max(0.0) as u64)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(RetryConfig::default())
    }
}
