use std::time::Duration;

use rand::Rng;

/// Defines the retry strategy to use when scheduling retry attempts.
///
/// This enum specifies how delays between retries are calculated from the
/// configured base delay.
#[derive(Debug)]
pub enum RetryStrategy {
    /// A linear retry strategy where the delay between retries remains constant.
    ///
    /// For example, if the delay is set to 2 seconds, each retry will wait exactly 2 seconds.
    Linear,
    /// An exponential backoff strategy where the delay increases exponentially with each retry.
    ///
    /// For example, with a base delay of 2 seconds, retries might wait 2s, 4s, 8s, etc.
    ExponentialBackoff,
    /// A Fibonacci backoff strategy where the delay between retries follows the Fibonacci sequence.
    ///
    /// Each delay is the sum of the two preceding delays, starting with the
    /// base delay for the first two retries. With a 1 second base the delays
    /// are 1s, 1s, 2s, 3s, 5s, 8s, and so on. This grows more gently than
    /// exponential backoff.
    FibonacciBackoff,
}

impl RetryStrategy {
    /// Calculates the delay duration for a specific retry attempt.
    ///
    /// `attempt` is the number of attempts already made, so the delay before
    /// the first retry is computed with `attempt = 1`.
    ///
    /// - `Linear`: the delay remains constant at `base_delay`.
    /// - `ExponentialBackoff`: `base_delay * 2^(attempt-1)` from the first
    ///   retry onward.
    /// - `FibonacciBackoff`: a Fibonacci sequence scaled by `base_delay`.
    pub(crate) fn calculate_delay(&self, base_delay: Duration, attempt: usize) -> Duration {
        match self {
            RetryStrategy::Linear => base_delay,
            RetryStrategy::ExponentialBackoff => {
                if attempt == 0 {
                    base_delay
                } else {
                    base_delay * 2u32.pow((attempt - 1) as u32)
                }
            }
            RetryStrategy::FibonacciBackoff => {
                if attempt < 2 {
                    base_delay
                } else {
                    let mut prev = base_delay;
                    let mut curr = base_delay;
                    for _ in 2..=attempt {
                        let next = prev + curr;
                        prev = curr;
                        curr = next;
                    }
                    curr
                }
            }
        }
    }
}

/// Adds a uniformly random duration in `[0, max_jitter]` to `delay`.
///
/// A zero `max_jitter` returns the delay untouched, so the default
/// configuration stays fully deterministic.
pub(crate) fn apply_jitter(delay: Duration, max_jitter: Duration) -> Duration {
    if max_jitter.is_zero() {
        return delay;
    }
    let extra = rand::rng().random_range(0..=max_jitter.as_millis() as u64);
    delay + Duration::from_millis(extra)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_linear_strategy() {
        let base_delay = Duration::from_secs(2);
        let linear = RetryStrategy::Linear;

        assert_eq!(
            linear.calculate_delay(base_delay, 1),
            Duration::from_secs(2)
        );
        assert_eq!(
            linear.calculate_delay(base_delay, 2),
            Duration::from_secs(2)
        );
        assert_eq!(
            linear.calculate_delay(base_delay, 3),
            Duration::from_secs(2)
        );
    }

    #[test]
    fn test_exponential_backoff_strategy() {
        let base_delay = Duration::from_secs(2);
        let expo = RetryStrategy::ExponentialBackoff;

        assert_eq!(expo.calculate_delay(base_delay, 1), Duration::from_secs(2));
        assert_eq!(expo.calculate_delay(base_delay, 2), Duration::from_secs(4));
        assert_eq!(expo.calculate_delay(base_delay, 3), Duration::from_secs(8));
        assert_eq!(expo.calculate_delay(base_delay, 4), Duration::from_secs(16));
    }

    #[test]
    fn test_exponential_backoff_strategy_mill() {
        let base_delay = Duration::from_millis(2000);
        let expo = RetryStrategy::ExponentialBackoff;

        assert_eq!(
            expo.calculate_delay(base_delay, 1),
            Duration::from_millis(2000)
        );
        assert_eq!(
            expo.calculate_delay(base_delay, 2),
            Duration::from_millis(4000)
        );
        assert_eq!(
            expo.calculate_delay(base_delay, 3),
            Duration::from_millis(8000)
        );
        assert_eq!(
            expo.calculate_delay(base_delay, 4),
            Duration::from_millis(16000)
        );
    }

    #[test]
    fn test_fibonacci_backoff_strategy() {
        let base_delay = Duration::from_secs(1);
        let fib = RetryStrategy::FibonacciBackoff;

        assert_eq!(fib.calculate_delay(base_delay, 1), Duration::from_secs(1));
        assert_eq!(fib.calculate_delay(base_delay, 2), Duration::from_secs(2));
        assert_eq!(fib.calculate_delay(base_delay, 3), Duration::from_secs(3));
        assert_eq!(fib.calculate_delay(base_delay, 4), Duration::from_secs(5));
        assert_eq!(fib.calculate_delay(base_delay, 5), Duration::from_secs(8));
    }

    #[test]
    fn test_zero_base_delay_stays_zero() {
        let base_delay = Duration::ZERO;
        assert_eq!(
            RetryStrategy::Linear.calculate_delay(base_delay, 3),
            Duration::ZERO
        );
        assert_eq!(
            RetryStrategy::ExponentialBackoff.calculate_delay(base_delay, 3),
            Duration::ZERO
        );
        assert_eq!(
            RetryStrategy::FibonacciBackoff.calculate_delay(base_delay, 3),
            Duration::ZERO
        );
    }

    #[test]
    fn test_jitter_disabled_is_identity() {
        let delay = Duration::from_millis(150);
        assert_eq!(apply_jitter(delay, Duration::ZERO), delay);
    }

    #[test]
    fn test_jitter_stays_within_bound() {
        let delay = Duration::from_millis(100);
        let max_jitter = Duration::from_millis(50);
        for _ in 0..100 {
            let jittered = apply_jitter(delay, max_jitter);
            assert!(jittered >= delay);
            assert!(jittered <= delay + max_jitter);
        }
    }
}
