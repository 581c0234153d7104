//! Retry helpers for table source operations
//!
//! Exponential backoff between attempts on transient failures.

use std::time::Duration;

/// Calculate next backoff duration using exponential backoff with a maximum cap
///
/// `new_backoff = min(current_backoff * multiplier, max_backoff)`
///
/// # Example
/// ```
/// use std::time::Duration;
/// use connecta_stats::fetch::calculate_next_backoff;
///
/// let backoff = Duration::from_secs(1);
/// let next = calculate_next_backoff(backoff, 2.0, 30);
/// assert_eq!(next, Duration::from_secs(2));
/// ```
pub fn calculate_next_backoff(
    current_backoff: Duration,
    multiplier: f64,
    max_backoff_seconds: u64,
) -> Duration {
    Duration::from_millis((current_backoff.as_millis() as f64 * multiplier) as u64)
        .min(Duration::from_secs(max_backoff_seconds))
}

/// Delays slept before each retry for a given attempt budget
///
/// With 3 attempts starting at 1s and doubling this is `[1s, 2s]`: the
/// final attempt is never followed by a sleep.
pub fn backoff_schedule(
    max_attempts: usize,
    initial: Duration,
    multiplier: f64,
    max_backoff_seconds: u64,
) -> Vec<Duration> {
    let mut delays = Vec::with_capacity(max_attempts.saturating_sub(1));
    let mut backoff = initial;
    for _ in 1..max_attempts {
        delays.push(backoff);
        backoff = calculate_next_backoff(backoff, multiplier, max_backoff_seconds);
    }
    delays
}
