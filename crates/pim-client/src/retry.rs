//! Exponential back-off for calls to the PIM backend.
//!
//! Rate limiting, network failures and 5xx responses are retried. Any other
//! 4xx means the request itself is wrong and is returned on the first try.

use std::future::Future;
use std::time::Duration;

use crate::error::ClientError;

const MAX_DELAY_MS: u64 = 60_000;

pub(crate) fn is_retriable(err: &ClientError) -> bool {
    match err {
        ClientError::RateLimited { .. } => true,
        ClientError::UnexpectedStatus { status, .. } => (500..600).contains(status),
        ClientError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        ClientError::Deserialize { .. }
        | ClientError::NotFound { .. }
        | ClientError::InvalidBaseUrl { .. }
        | ClientError::MissingId(_)
        | ClientError::UnknownApproval(_)
        | ClientError::Workflow(_) => false,
    }
}

/// Delay before retry number `attempt` (1-based), before jitter.
///
/// `backoff_base_secs * 2^(attempt-1)`, raised to the server's `Retry-After`
/// on a 429, and capped at 60 s.
fn base_delay_ms(backoff_base_secs: u64, attempt: u32, err: &ClientError) -> u64 {
    let computed = backoff_base_secs
        .saturating_mul(1_000)
        .saturating_mul(1u64 << attempt.saturating_sub(1).min(10));
    let floor = match err {
        ClientError::RateLimited {
            retry_after_secs, ..
        } => retry_after_secs.saturating_mul(1_000),
        _ => 0,
    };
    computed.max(floor).min(MAX_DELAY_MS)
}

/// Runs `operation`, retrying transient failures up to `max_retries` times.
///
/// | Retry | Sleep (base = 1 s)     |
/// |-------|------------------------|
/// | 1     | 1 s ± 25 % jitter      |
/// | 2     | 2 s ± 25 % jitter      |
/// | 3     | 4 s ± 25 % jitter      |
///
/// The last error is returned once retries are exhausted.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, ClientError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ClientError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let capped = base_delay_ms(backoff_base_secs, attempt, &err);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient PIM backend error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
