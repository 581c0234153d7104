//! Time utilities for recency windows
//!
//! Shared helpers for "analysed within the last N days" style counts.

use chrono::{DateTime, Duration, Utc};

/// Default look-back window for recent analyses
pub const RECENT_WINDOW_DAYS: i64 = 7;

/// Start of a look-back window ending at `reference`
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use connecta_stats::utils::time::window_start;
///
/// let now = Utc.with_ymd_and_hms(2024, 5, 8, 12, 0, 0).unwrap();
/// assert_eq!(window_start(now, 7), Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
/// ```
pub fn window_start(reference: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    reference - Duration::days(days)
}

/// Whether `timestamp` falls at or after the window start
///
/// Timestamps later than `reference` still count; the window only bounds
/// how far back an analysis may be.
pub fn is_within_days(timestamp: DateTime<Utc>, reference: DateTime<Utc>, days: i64) -> bool {
    timestamp >= window_start(reference, days)
}

/// Format a timestamp as an ISO 8601 date string (YYYY-MM-DD)
pub fn to_iso_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d").to_string()
}
