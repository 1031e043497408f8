use crate::asynchronous::retry;
use crate::config::RetryConfig;
use thiserror::Error;

/// The completion state a query endpoint reports for a probed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionState {
    /// The query ran to completion.
    Done,
    /// The query was accepted but has not completed.
    Pending,
    /// The endpoint reported the query as failed.
    Errored,
}

/// A single probe's failure, fed back into the retry loop.
///
/// A probe succeeds only when the round trip itself succeeds *and* the
/// endpoint reports [`CompletionState::Done`]; any other reported state is
/// treated as a failure and retried like a transport fault.
#[derive(Debug, Error, PartialEq)]
pub enum ProbeFailure<E> {
    /// The round trip itself failed.
    #[error("{0}")]
    Transport(E),
    /// The round trip succeeded but the query did not complete.
    #[error("query finished in state {0:?}")]
    Incomplete(CompletionState),
}

/// User-facing health verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    Working,
    NotWorking,
}

/// The status/message pair reported to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub message: String,
}

impl HealthReport {
    fn working() -> Self {
        HealthReport {
            status: HealthStatus::Working,
            message: "Data source is working".to_string(),
        }
    }

    fn not_working() -> Self {
        HealthReport {
            status: HealthStatus::NotWorking,
            message: "Data source is not working".to_string(),
        }
    }
}

/// Probes a query endpoint through the retry executor and maps the outcome
/// to a user-facing health report.
///
/// `probe` performs one network round trip and yields the endpoint's
/// reported [`CompletionState`]. The adapter wraps it so that both transport
/// failures and non-`Done` states count as failed attempts, then hands it to
/// [`retry`] with the given configuration. The report reflects only the
/// terminal outcome: attempt counts and failure detail are deliberately not
/// surfaced.
///
/// # Example
/// ```
/// use retry_exec::config::RetryConfig;
/// use retry_exec::health::{self, CompletionState, HealthStatus, ProbeFailure};
///
/// #[tokio::main]
/// async fn main() {
///     let config = RetryConfig::<ProbeFailure<String>>::new(3, std::time::Duration::ZERO);
///     let report = health::check(|| async { Ok::<_, String>(CompletionState::Done) }, &config).await;
///     assert_eq!(report.status, HealthStatus::Working);
/// }
/// ```
pub async fn check<F, Fut, E>(
    mut probe: F,
    retry_config: &RetryConfig<ProbeFailure<E>>,
) -> HealthReport
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<CompletionState, E>>,
{
    let outcome = retry(
        || {
            let round_trip = probe();
            async move {
                match round_trip.await {
                    Ok(CompletionState::Done) => Ok(()),
                    Ok(state) => Err(ProbeFailure::Incomplete(state)),
                    Err(err) => Err(ProbeFailure::Transport(err)),
                }
            }
        },
        retry_config,
    )
    .await;

    match outcome {
        Ok(()) => HealthReport::working(),
        Err(_) => HealthReport::not_working(),
    }
}
