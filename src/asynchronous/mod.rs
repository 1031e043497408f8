use crate::config::RetryConfig;
use crate::error::{AttemptFailure, RetryError};
use log::{info, warn};
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tokio_util::sync::CancellationToken;

/// Retries a given asynchronous operation based on the specified retry configuration.
///
/// Attempts are strictly sequential: an attempt's failure is fully recorded
/// before the next attempt begins, and a success returns immediately without
/// spending the remaining budget. Only the final attempt's failure is
/// surfaced; intermediate failures are absorbed.
///
/// The executor cannot make a non-idempotent operation safe to repeat: a
/// retried write may reach the backend more than once. Supplying an
/// operation that tolerates re-invocation is the caller's responsibility.
///
/// # Arguments
/// * `operation` - A closure that returns a `Future` resolving to a `Result<T, E>`. The function will retry this operation if it fails.
/// * `retry_config` - A reference to `RetryConfig` specifying the attempt budget, delay policy, per-attempt timeout and retry condition.
///
/// # Returns
/// * `Ok(T)` if the operation succeeds within the allowed attempts.
/// * `Err(RetryError::InvalidConfiguration)` if the budget is zero; the operation is never invoked.
/// * `Err(RetryError::Exhausted)` if every permitted attempt failed, wrapping the final attempt's failure.
/// * `Err(RetryError::NonRetryable)` if the configured retry condition rejected an attempt's error.
///
/// # Example
/// ```no_run
/// use tokio::time::Duration;
/// use reqwest::Client;
/// use retry_exec::asynchronous::retry;
/// use retry_exec::config::RetryConfig;
///
/// async fn fetch_url() -> Result<String, reqwest::Error> {
///     let client = Client::new();
///     let response = client.get("https://example.com")
///             .send()
///             .await?;
///     Ok(response.status().is_success().to_string())
/// }
///
/// #[tokio::main]
/// async fn main() {
///   let retry_config = RetryConfig::default();
///
///   let result = retry(fetch_url, &retry_config).await;
///   match result {
///     Ok(output) => println!("Operation succeeded: {}", output),
///     Err(err) => println!("Operation failed: {}", err),
///   }
/// }
/// ```
/// # Notes
/// - The function logs warnings for failed attempts and final failure.
pub async fn retry<F, Fut, T, E>(
    operation: F,
    retry_config: &RetryConfig<E>,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    run(operation, retry_config, None).await
}

/// Retries an asynchronous operation like [`retry`], abandoning the call
/// when the given token is cancelled.
///
/// Cancellation is checked before every attempt and raced against the
/// inter-attempt delay, so a cancel issued during a long backoff takes
/// effect without waiting the delay out. A cancelled call returns the
/// distinct [`RetryError::Cancelled`], never a partial result. An attempt
/// already in flight is left to settle; its outcome is discarded.
///
/// # Example
/// ```
/// use retry_exec::asynchronous::retry_cancellable;
/// use retry_exec::config::RetryConfig;
/// use tokio_util::sync::CancellationToken;
///
/// #[tokio::main]
/// async fn main() {
///     let config = RetryConfig::<String>::default();
///     let token = CancellationToken::new();
///     token.cancel();
///
///     let result: Result<(), _> =
///         retry_cancellable(|| async { Ok(()) }, &config, &token).await;
///     assert!(result.unwrap_err().is_cancelled());
/// }
/// ```
pub async fn retry_cancellable<F, Fut, T, E>(
    operation: F,
    retry_config: &RetryConfig<E>,
    cancel: &CancellationToken,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    run(operation, retry_config, Some(cancel)).await
}

async fn run<F, Fut, T, E>(
    mut operation: F,
    retry_config: &RetryConfig<E>,
    cancel: Option<&CancellationToken>,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    retry_config.validate()?;

    let mut attempts = 0;

    loop {
        if let Some(token) = cancel {
            if token.is_cancelled() {
                warn!("Operation cancelled after {} attempts.", attempts);
                return Err(RetryError::Cancelled);
            }
        }

        attempts += 1;

        match attempt_once(&mut operation, retry_config.attempt_timeout).await {
            Ok(output) => {
                info!("Operation succeeded after {} attempts", attempts);
                return Ok(output);
            }
            Err(failure) if attempts < retry_config.max_attempts => {
                if let AttemptFailure::Failed(err) = failure {
                    let should_retry = retry_config.retry_condition.map_or(true, |f| f(&err));
                    if !should_retry {
                        warn!(
                            "Operation failed (attempt {}/{}), not retryable, giving up.",
                            attempts, retry_config.max_attempts
                        );
                        return Err(RetryError::NonRetryable { error: err });
                    }
                }

                let delay = crate::strategies::apply_jitter(
                    retry_config
                        .strategy
                        .calculate_delay(retry_config.delay, attempts),
                    retry_config.max_jitter,
                );
                warn!(
                    "Operation failed (attempt {}/{}), retrying after {:?}...",
                    attempts, retry_config.max_attempts, delay
                );
                if !delay.is_zero() {
                    match cancel {
                        Some(token) => {
                            tokio::select! {
                                _ = token.cancelled() => {
                                    warn!("Operation cancelled after {} attempts.", attempts);
                                    return Err(RetryError::Cancelled);
                                }
                                _ = sleep(delay) => {}
                            }
                        }
                        None => sleep(delay).await,
                    }
                }
            }
            Err(failure) => {
                warn!("Operation failed after {} attempts, giving up.", attempts);
                return Err(RetryError::Exhausted {
                    attempts,
                    last: failure,
                });
            }
        }
    }
}

/// Runs one attempt, applying the per-attempt time limit when configured.
async fn attempt_once<F, Fut, T, E>(
    operation: &mut F,
    limit: Option<Duration>,
) -> Result<T, AttemptFailure<E>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    match limit {
        Some(limit) => match timeout(limit, operation()).await {
            Ok(settled) => settled.map_err(AttemptFailure::Failed),
            Err(_) => Err(AttemptFailure::TimedOut { limit }),
        },
        None => operation().await.map_err(AttemptFailure::Failed),
    }
}
