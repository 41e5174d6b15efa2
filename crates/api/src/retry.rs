use anyhow::Result;
use async_trait::async_trait;
use extract::LanguageModel;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::config::RetryConfig;
use crate::metrics::{Metrics, TimedOperation};

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_retries: usize,
    initial_backoff: Duration,
    max_backoff: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: usize, initial_backoff_ms: u64, max_backoff_ms: u64) -> Self {
        Self {
            max_retries,
            initial_backoff: Duration::from_millis(initial_backoff_ms),
            max_backoff: Duration::from_millis(max_backoff_ms),
        }
    }

    pub fn max_retries(&self) -> usize {
        self.max_retries
    }

    /// Retry a future with exponential backoff
    pub async fn retry<F, Fut, T, E>(&self, operation_name: &str, mut f: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let mut attempt = 0;
        let mut backoff = self.initial_backoff;

        loop {
            match f().await {
                Ok(result) => {
                    if attempt > 0 {
                        info!(
                            operation = operation_name,
                            attempts = attempt + 1,
                            "Operation succeeded after retries"
                        );
                    }
                    return Ok(result);
                }
                Err(e) => {
                    attempt += 1;
                    if attempt > self.max_retries {
                        warn!(
                            operation = operation_name,
                            attempts = attempt,
                            error = %e,
                            "Operation failed after max retries"
                        );
                        return Err(e);
                    }

                    warn!(
                        operation = operation_name,
                        attempt = attempt,
                        max_retries = self.max_retries,
                        backoff_ms = backoff.as_millis(),
                        error = %e,
                        "Operation failed, retrying"
                    );

                    sleep(backoff).await;
                    backoff = std::cmp::min(backoff * 2, self.max_backoff);
                }
            }
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        Self::new(config.max_retries, config.initial_backoff_ms, config.max_backoff_ms)
    }
}

/// A [`LanguageModel`] that retries failed calls and records every attempt.
pub struct ResilientModel {
    inner: Arc<dyn LanguageModel>,
    policy: RetryPolicy,
    metrics: Arc<Metrics>,
}

impl ResilientModel {
    pub fn new(inner: Arc<dyn LanguageModel>, policy: RetryPolicy, metrics: Arc<Metrics>) -> Self {
        Self {
            inner,
            policy,
            metrics,
        }
    }
}

#[async_trait]
impl LanguageModel for ResilientModel {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let inner = &self.inner;
        let metrics = &self.metrics;

        self.policy
            .retry(inner.name(), || async move {
                let timer = TimedOperation::start();
                let result = inner.generate(prompt).await;
                metrics.record_model_call(timer.elapsed(), result.is_ok());
                result
            })
            .await
    }
}
