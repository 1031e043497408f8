use std::time::Duration;
use thiserror::Error;

/// The failure recorded for a single attempt.
///
/// An attempt either fails with the operation's own error, or is cut off by
/// the configured per-attempt time limit. A timed-out attempt consumes one
/// unit of the attempt budget like any other failure.
#[derive(Debug, Error, PartialEq)]
pub enum AttemptFailure<E> {
    /// The operation settled with an error.
    #[error("{0}")]
    Failed(E),
    /// The operation did not settle within the configured time limit.
    #[error("attempt did not settle within {limit:?}")]
    TimedOut { limit: Duration },
}

impl<E> AttemptFailure<E> {
    /// Returns the underlying operation error, if this failure carries one.
    pub fn error(&self) -> Option<&E> {
        match self {
            AttemptFailure::Failed(err) => Some(err),
            AttemptFailure::TimedOut { .. } => None,
        }
    }
}

/// The terminal error of a retried call.
///
/// Exactly one of these is produced per call that does not succeed.
/// Intermediate attempt failures are absorbed internally; only the final
/// attempt's failure is preserved, inside [`RetryError::Exhausted`].
///
/// The `Display` messages are deliberately generic. Callers that want to
/// surface the failing attempt's detail can reach it through
/// [`RetryError::last_error`] or by matching on the variants.
#[derive(Debug, Error, PartialEq)]
pub enum RetryError<E> {
    /// The retry configuration violates the caller contract
    /// (e.g. an attempt budget of zero). The operation is never invoked.
    #[error("invalid retry configuration: {0}")]
    InvalidConfiguration(String),

    /// Every permitted attempt failed. `last` is the failure of the final
    /// attempt; earlier attempts' errors are discarded.
    #[error("operation failed after {attempts} attempts")]
    Exhausted {
        attempts: usize,
        last: AttemptFailure<E>,
    },

    /// The retry condition rejected an attempt's error, so the remaining
    /// budget was not spent.
    #[error("operation failed with a non-retryable error")]
    NonRetryable { error: E },

    /// The call was cancelled before an attempt could succeed. Distinct
    /// from [`RetryError::Exhausted`]: the budget was abandoned, not spent.
    #[error("operation cancelled")]
    Cancelled,
}

impl<E> RetryError<E> {
    /// Returns the error of the last attempt made, if one is carried.
    ///
    /// `InvalidConfiguration` and `Cancelled` carry none, and neither does
    /// an exhaustion whose final attempt timed out.
    pub fn last_error(&self) -> Option<&E> {
        match self {
            RetryError::Exhausted { last, .. } => last.error(),
            RetryError::NonRetryable { error } => Some(error),
            _ => None,
        }
    }

    /// Number of attempts actually made before giving up, where known.
    pub fn attempts(&self) -> Option<usize> {
        match self {
            RetryError::Exhausted { attempts, .. } => Some(*attempts),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, RetryError::Cancelled)
    }
}
