// src/error_recovery.rs
//! Bounded retry with a fixed pause for transient transport failures.

use crate::constants::{PAGE_FETCH_MAX_ATTEMPTS, PAGE_FETCH_RETRY_DELAY};
use crate::error::TestRailError;
use std::time::Duration;

/// How often, and how patiently, a single operation is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Pause between consecutive attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: PAGE_FETCH_MAX_ATTEMPTS,
            delay: PAGE_FETCH_RETRY_DELAY,
        }
    }
}

/// Runs `operation` until it succeeds, fails with a non-transient error, or
/// uses up `policy.max_attempts`. `sleep` is called between attempts.
///
/// The error of the final attempt is returned unchanged.
pub fn retry_with_backoff<T, F>(
    mut operation: F,
    policy: &RetryPolicy,
    sleep: &dyn Fn(Duration),
) -> Result<T, TestRailError>
where
    F: FnMut() -> Result<T, TestRailError>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation() {
            Ok(result) => return Ok(result),
            Err(e) if e.is_transient() && attempt < max_attempts => {
                log::warn!(
                    "Attempt {}/{} failed ({}), retrying after {:?}",
                    attempt,
                    max_attempts,
                    e,
                    policy.delay
                );
                sleep(policy.delay);
                attempt += 1;
            }
            Err(e) => {
                if e.is_transient() {
                    log::error!("Giving up after {} attempts: {}", attempt, e);
                }
                return Err(e);
            }
        }
    }
}
