//! Bounded exponential backoff for calls that cross the process boundary.

use std::future::Future;
use std::time::Duration;

use cps_core::Config;
use tracing::warn;

use crate::error::ReportResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
  /// Retries after the first attempt
  pub max_retries: u32,
  /// Delay before the first retry; doubles on every further retry
  pub initial_delay_ms: u64,
}

impl Default for RetryPolicy {
  fn default() -> Self {
    Self { max_retries: 5, initial_delay_ms: 500 }
  }
}

impl RetryPolicy {
  pub fn from_config(config: &Config) -> Self {
    Self { max_retries: config.max_retries, initial_delay_ms: config.retry_delay_ms }
  }

  /// Delay before retry number `retry` (1-based)
  pub fn delay_for(&self, retry: u32) -> Duration {
    let factor = 1u64.checked_shl(retry.saturating_sub(1)).unwrap_or(u64::MAX);
    Duration::from_millis(self.initial_delay_ms.saturating_mul(factor))
  }
}

/// Run `op` until it succeeds or the policy is exhausted, returning the last error
pub async fn retry_with_backoff<T, F, Fut>(policy: &RetryPolicy, label: &str, mut op: F) -> ReportResult<T>
where
  F: FnMut() -> Fut,
  Fut: Future<Output = ReportResult<T>>,
{
  let mut retry = 0;
  loop {
    match op().await {
      Ok(value) => return Ok(value),
      Err(e) if retry < policy.max_retries => {
        retry += 1;
        let delay = policy.delay_for(retry);
        warn!("{} failed ({}), retry {}/{} in {:?}", label, e, retry, policy.max_retries, delay);
        tokio::time::sleep(delay).await;
      }
      Err(e) => {
        warn!("{} failed after {} attempt(s): {}", label, retry + 1, e);
        return Err(e);
      }
    }
  }
}
