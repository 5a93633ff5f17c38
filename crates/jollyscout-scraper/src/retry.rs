//! Retry with exponential backoff for the results-wait stage.
//!
//! Only a navigation timeout is worth retrying — the page may simply have
//! been slow to render. Form-interaction failures are structural and are
//! propagated immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::ScrapeError;

/// Returns `true` if `err` represents a transient condition that should be
/// retried after a backoff delay.
fn is_retriable(err: &ScrapeError) -> bool {
    matches!(err, ScrapeError::NavigationTimeout { .. })
}

/// Executes `operation` with exponential backoff retries on transient errors.
///
/// On success the result is returned immediately. On a retriable error the
/// function sleeps for `backoff_base_secs * 2^attempt` seconds and tries
/// again, up to `max_retries` additional attempts after the first try. If
/// all retries are exhausted the last error is returned. Non-retriable
/// errors are returned immediately without sleeping.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, ScrapeError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScrapeError>>,
{
    let mut last_err;
    let mut attempt = 0u32;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                last_err = err;
            }
        }

        // Exponential backoff: base * 2^attempt seconds, capped against overflow.
        let delay_secs = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs,
            error = %last_err,
            "results wait timed out — retrying after backoff"
        );
        tokio::time::sleep(Duration::from_secs(delay_secs)).await;
        attempt += 1;
    }
}
