use std::time::Duration;

use crate::error::RetryError;
use crate::strategies::RetryStrategy;

/// Configuration for the retry executor.
///
/// This struct defines the parameters for retrying an operation: the attempt
/// budget, the delay policy applied between attempts, an optional per-attempt
/// time limit, and an optional condition deciding which errors are worth
/// retrying.
#[derive(Debug)]
pub struct RetryConfig<E> {
    /// The maximum number of attempts, including the initial one.
    ///
    /// Must be at least 1; a budget of 1 means "try once, no retries".
    /// A budget of 0 is a caller contract violation and makes the executor
    /// fail fast with [`RetryError::InvalidConfiguration`] without invoking
    /// the operation.
    pub max_attempts: usize,

    /// The base delay between attempts.
    ///
    /// How the base is applied per attempt is determined by `strategy`.
    /// Defaults to [`Duration::ZERO`], i.e. immediate retries.
    pub delay: Duration,

    /// The strategy used to scale `delay` across attempts.
    ///
    /// - [`RetryStrategy::Linear`]: constant delay.
    /// - [`RetryStrategy::ExponentialBackoff`]: doubles per retry.
    /// - [`RetryStrategy::FibonacciBackoff`]: Fibonacci-scaled growth.
    pub strategy: RetryStrategy,

    /// Upper bound of uniform random jitter added to each computed delay.
    ///
    /// [`Duration::ZERO`] (the default) disables jitter entirely.
    pub max_jitter: Duration,

    /// Optional time limit for a single attempt.
    ///
    /// An attempt exceeding the limit is recorded as an ordinary attempt
    /// failure and consumes one unit of the budget. `None` (the default)
    /// places no bound on an attempt's duration.
    pub attempt_timeout: Option<Duration>,

    /// An optional function to determine if a retry should be attempted.
    ///
    /// It takes a reference to the error (`&E`) and returns a `bool`:
    /// - `true` if the operation should be retried.
    /// - `false` if the operation should fail immediately.
    ///
    /// If set to `None` (the default), all errors trigger a retry up to
    /// `max_attempts` — the legacy behavior. Timed-out attempts are always
    /// retried; there is no error value to inspect.
    pub retry_condition: Option<fn(&E) -> bool>,
}

impl<E> Default for RetryConfig<E> {
    /// Provides a default configuration for retrying operations.
    ///
    /// The default configuration includes:
    /// - `max_attempts`: 10
    /// - `delay`: zero, i.e. immediate retries
    /// - `strategy`: `Linear`
    /// - `max_jitter`: zero, no jitter
    /// - `attempt_timeout`: `None`, attempts are unbounded in time
    /// - `retry_condition`: `None`, meaning all errors trigger retries
    fn default() -> Self {
        RetryConfig {
            max_attempts: 10,
            delay: Duration::ZERO,
            strategy: RetryStrategy::Linear,
            max_jitter: Duration::ZERO,
            attempt_timeout: None,
            retry_condition: None,
        }
    }
}

impl<E> RetryConfig<E> {
    /// Creates a new `RetryConfig` with the specified maximum attempts and
    /// base delay, leaving the remaining fields at their defaults.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use retry_exec::config::RetryConfig;
    /// let config = RetryConfig::<String>::new(3, Duration::from_secs(1));
    /// ```
    pub fn new(max_attempts: usize, delay: Duration) -> Self {
        RetryConfig {
            max_attempts,
            delay,
            ..RetryConfig::default()
        }
    }

    /// Sets the delay strategy and returns the modified `RetryConfig`.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use retry_exec::config::RetryConfig;
    /// use retry_exec::strategies::RetryStrategy;
    /// let config = RetryConfig::<String>::new(5, Duration::from_millis(100))
    ///     .with_strategy(RetryStrategy::ExponentialBackoff);
    /// ```
    pub fn with_strategy(mut self, strategy: RetryStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the jitter bound and returns the modified `RetryConfig`.
    ///
    /// Each inter-attempt delay gets a uniformly random addition in
    /// `[0, max_jitter]`, useful to avoid synchronized retries against the
    /// same backend.
    pub fn with_max_jitter(mut self, max_jitter: Duration) -> Self {
        self.max_jitter = max_jitter;
        self
    }

    /// Sets a per-attempt time limit and returns the modified `RetryConfig`.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use retry_exec::config::RetryConfig;
    /// let config = RetryConfig::<String>::default()
    ///     .with_attempt_timeout(Duration::from_secs(30));
    /// ```
    pub fn with_attempt_timeout(mut self, attempt_timeout: Duration) -> Self {
        self.attempt_timeout = Some(attempt_timeout);
        self
    }

    /// Sets a custom retry condition and returns the modified `RetryConfig`.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use retry_exec::config::RetryConfig;
    /// let config = RetryConfig::new(3, Duration::from_secs(1))
    ///     .with_retry_condition(|e: &String| e.contains("transient"));
    /// ```
    pub fn with_retry_condition(mut self, retry_condition: fn(&E) -> bool) -> Self {
        self.retry_condition = Some(retry_condition);
        self
    }

    /// Checks the caller contract before any attempt is made.
    pub(crate) fn validate(&self) -> Result<(), RetryError<E>> {
        if self.max_attempts < 1 {
            return Err(RetryError::InvalidConfiguration(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
