//! Retry with exponential backoff for the storefront read endpoints.
//!
//! Only idempotent reads (listing, search, cart read) go through
//! [`retry_with_backoff`]. Cart mutations are sent exactly once.

use std::future::Future;
use std::time::Duration;

use crate::error::ClientError;

/// Upper bound for a single backoff sleep.
const MAX_DELAY_MS: u64 = 30_000;

/// Returns `true` if `err` represents a transient condition worth retrying.
///
/// Retriable: 429, network failures (timeout/connect), and 5xx statuses.
/// Everything else is returned to the caller immediately.
pub(crate) fn is_retriable(err: &ClientError) -> bool {
    match err {
        ClientError::RateLimited { .. } => true,
        ClientError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        ClientError::UnexpectedStatus { status, .. } => *status >= 500,
        ClientError::NotFound { .. }
        | ClientError::Deserialize { .. }
        | ClientError::Normalization { .. }
        | ClientError::InvalidBaseUrl { .. } => false,
    }
}

/// Executes `operation`, retrying transient failures up to `max_retries`
/// additional times.
///
/// | Attempt | Sleep before next attempt          |
/// |---------|------------------------------------|
/// | 1       | `base_ms` × 2⁰ ± 25 % jitter       |
/// | 2       | `base_ms` × 2¹ ± 25 % jitter       |
/// | 3       | `base_ms` × 2² ± 25 % jitter       |
///
/// Sleeps are capped at 30 s. With `max_retries = 0` the operation runs once.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
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
                let delay_ms = backoff_delay_ms(backoff_base_ms, attempt);
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient storefront API error, retrying after backoff"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

/// Jittered exponential delay for the given 1-based retry attempt.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn backoff_delay_ms(base_ms: u64, attempt: u32) -> u64 {
    let computed = base_ms.saturating_mul(1u64 << attempt.saturating_sub(1).min(20));
    let capped = computed.min(MAX_DELAY_MS);
    (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;

    fn rate_limited() -> ClientError {
        ClientError::RateLimited {
            host: "api.brewmart.test".to_owned(),
            retry_after_secs: 0,
        }
    }

    #[test]
    fn server_errors_are_retriable() {
        assert!(is_retriable(&ClientError::UnexpectedStatus {
            status: 503,
            url: "u".to_owned()
        }));
        assert!(!is_retriable(&ClientError::UnexpectedStatus {
            status: 400,
            url: "u".to_owned()
        }));
        assert!(!is_retriable(&ClientError::NotFound { url: "u".to_owned() }));
    }

    #[test]
    fn backoff_is_capped() {
        assert!(backoff_delay_ms(10_000, 12) <= MAX_DELAY_MS * 5 / 4);
        assert_eq!(backoff_delay_ms(0, 3), 0);
    }

    #[tokio::test]
    async fn succeeds_immediately_on_first_try() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_backoff(3, 0, || {
            let cc = Arc::clone(&cc);
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, ClientError>(42)
            }
        })
        .await;
        assert_eq!(result.unwrap(), 42);
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn retries_on_rate_limited_then_succeeds() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_backoff(3, 0, || {
            let cc = Arc::clone(&cc);
            async move {
                let n = cc.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(rate_limited())
                } else {
                    Ok::<u32, ClientError>(99)
                }
            }
        })
        .await;
        assert_eq!(result.unwrap(), 99);
        assert_eq!(call_count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn zero_retries_runs_once() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_backoff(0, 0, || {
            let cc = Arc::clone(&cc);
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                Err::<u32, ClientError>(rate_limited())
            }
        })
        .await;
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(ClientError::RateLimited { .. })));
    }

    #[tokio::test]
    async fn does_not_retry_deserialize_error() {
        let call_count = Arc::new(AtomicU32::new(0));
        let cc = Arc::clone(&call_count);
        let result = retry_with_backoff(3, 0, || {
            let cc = Arc::clone(&cc);
            async move {
                cc.fetch_add(1, Ordering::SeqCst);
                let e = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
                Err::<u32, ClientError>(ClientError::Deserialize {
                    context: "test".to_owned(),
                    source: e,
                })
            }
        })
        .await;
        assert_eq!(call_count.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(ClientError::Deserialize { .. })));
    }
}
