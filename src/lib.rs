/// The `asynchronous` module provides the retry executor: bounded-attempt
/// execution of a fallible async operation, with optional cancellation.
pub mod asynchronous;

/// The `config` module provides the configuration structure for the retry
/// executor: attempt budget, delay policy, per-attempt timeout, and the
/// retryability condition.
pub mod config;

/// The `error` module defines the typed terminal outcomes of a retried call
/// and the per-attempt failure they wrap.
pub mod error;

/// The `health` module adapts the retry executor for health probing: one
/// probed round trip mapped to a user-facing status/message pair.
pub mod health;

/// The `strategies` module defines how delays between retry attempts are
/// calculated, supporting linear, exponential, and Fibonacci backoff, plus
/// optional jitter.
pub mod strategies;
