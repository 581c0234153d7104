//! Utility functions for report formatting
//!
//! Shared helpers used by the console renderers.

use crate::analysis::grades::GradeDistribution;
use crate::analysis::stats::SummaryResult;
use crate::errors::AppResult;
use crate::types::analysis_results::CountEntry;
use serde::Serialize;
use std::collections::BTreeMap;

/// Format number with thousand separators for console output
///
/// # Examples
///
/// ```
/// # use connecta_stats::analysis::reports::utils::format_number;
/// assert_eq!(format_number(1234), "1,234");
/// assert_eq!(format_number(1234567), "1,234,567");
/// assert_eq!(format_number(904233), "904,233");
/// ```
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i).is_multiple_of(3) {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

/// `label: n=.. mean=.. median=.. min=.. max=.. sd=..` or a no-data marker
pub fn format_summary(label: &str, summary: &SummaryResult) -> String {
    if summary.is_empty() {
        return format!("{}: no data\n", label);
    }
    format!(
        "{}: n={} mean={:.2} median={:.2} min={:.2} max={:.2} sd={:.2}\n",
        label,
        format_number(summary.count),
        summary.mean,
        summary.median,
        summary.min,
        summary.max,
        summary.stdev
    )
}

/// Grade table, one `label|count|pct` line per grade
pub fn format_grades(title: &str, grades: &GradeDistribution) -> String {
    let mut output = format!("\n{} (n={}):\n", title, format_number(grades.total));
    for bucket in &grades.buckets {
        output.push_str(&format!(
            "  {}|{}|{:.1}%\n",
            bucket.label, bucket.count, bucket.percentage
        ));
    }
    output
}

/// Label counts, most frequent first
pub fn format_distribution(title: &str, counts: &BTreeMap<String, usize>) -> String {
    if counts.is_empty() {
        return String::new();
    }
    let mut entries: Vec<(&String, &usize)> = counts.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));

    let mut output = format!("\n{}:\n", title);
    for (label, count) in entries {
        output.push_str(&format!("  {}|{}\n", label, count));
    }
    output
}

pub fn format_count_entries(title: &str, entries: &[CountEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }
    let mut output = format!("\n{}:\n", title);
    for entry in entries {
        output.push_str(&format!(
            "  {}|{}|{:.1}%\n",
            entry.label, entry.count, entry.percentage
        ));
    }
    output
}

/// Export data as JSON for programmatic use
pub fn export_json<T: Serialize>(data: &T) -> AppResult<String> {
    serde_json::to_string_pretty(data)
        .map_err(|e| crate::errors::AppError::InvalidData(format!("JSON export failed: {}", e)))
}
