//! Mathematical utility functions for statistical analysis
//!
//! Percentage and ratio helpers with zero-division handling, shared by the
//! grade, distribution and report modules.

/// Calculate percentage safely for usize values, returning 0.0 if total is zero.
///
/// # Examples
/// ```
/// use connecta_stats::utils::math::safe_percentage;
///
/// assert_eq!(safe_percentage(50, 100), 50.0);
/// assert_eq!(safe_percentage(1, 4), 25.0);
/// assert_eq!(safe_percentage(50, 0), 0.0);  // Zero-division guard
/// ```
#[inline]
pub fn safe_percentage(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

/// Divide two floats, returning 0.0 when the result would not be finite
///
/// # Examples
/// ```
/// use connecta_stats::utils::math::safe_ratio;
///
/// assert_eq!(safe_ratio(10.0, 4.0), 2.5);
/// assert_eq!(safe_ratio(10.0, 0.0), 0.0);
/// ```
#[inline]
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    let ratio = numerator / denominator;
    if ratio.is_finite() {
        ratio
    } else {
        0.0
    }
}
