//! Common distribution types for analysis reports
//!
//! Value series, label counts and correlation matrices shared by every
//! report dimension.

use crate::analysis::stats::{self, SummaryResult};
use crate::utils::math::safe_percentage;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary statistics plus the raw observations they came from
///
/// `values` keeps extraction order so presentation code can draw histograms.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSeries {
    pub summary: SummaryResult,
    pub values: Vec<f64>,
}

impl MetricSeries {
    /// Build from optional observations, dropping absent and non-finite ones
    pub fn from_observations<I>(observations: I) -> Self
    where
        I: IntoIterator<Item = Option<f64>>,
    {
        let values: Vec<f64> = observations
            .into_iter()
            .flatten()
            .filter(|v| v.is_finite())
            .collect();
        Self::from_values(values)
    }

    pub fn from_values(values: Vec<f64>) -> Self {
        let values = stats::finite(&values);
        Self {
            summary: SummaryResult::from_values(&values),
            values,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One label with its count and share of the total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountEntry {
    pub label: String,
    pub count: usize,
    pub percentage: f64,
}

/// Occurrences per label, sorted by label
pub fn count_labels<I, S>(labels: I) -> BTreeMap<String, usize>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts = BTreeMap::new();
    for label in labels {
        let label = label.as_ref().trim();
        if !label.is_empty() {
            *counts.entry(label.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

/// The `limit` most frequent labels, ties broken alphabetically
pub fn top_counts(counts: &BTreeMap<String, usize>, limit: usize) -> Vec<CountEntry> {
    let total: usize = counts.values().sum();
    let mut entries: Vec<(&String, &usize)> = counts.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    entries
        .into_iter()
        .take(limit)
        .map(|(label, count)| CountEntry {
            label: label.clone(),
            count: *count,
            percentage: safe_percentage(*count, total),
        })
        .collect()
}

/// Mean value per label over (label, value) observations
pub fn mean_by_label<I>(observations: I) -> BTreeMap<String, f64>
where
    I: IntoIterator<Item = (String, f64)>,
{
    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for (label, value) in observations {
        if value.is_finite() {
            groups.entry(label).or_default().push(value);
        }
    }
    groups
        .into_iter()
        .map(|(label, values)| (label, stats::mean(&values)))
        .collect()
}

/// Pairwise-complete Pearson correlation matrix
///
/// `values[i][j]` is the correlation between `metrics[i]` and `metrics[j]`
/// over the records where both are present; undefined cells are 0.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    pub metrics: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// `columns[k]` holds one optional observation per record for `metrics[k]`
    pub fn from_columns(metrics: &[&str], columns: &[Vec<Option<f64>>]) -> Self {
        let values = columns
            .iter()
            .map(|x| {
                columns
                    .iter()
                    .map(|y| {
                        let pairs: Vec<(f64, f64)> = x
                            .iter()
                            .zip(y.iter())
                            .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
                            .collect();
                        stats::pearson_pairs(&pairs)
                    })
                    .collect()
            })
            .collect();
        Self {
            metrics: metrics.iter().map(|m| m.to_string()).collect(),
            values,
        }
    }

    pub fn get(&self, row: &str, column: &str) -> Option<f64> {
        let i = self.metrics.iter().position(|m| m == row)?;
        let j = self.metrics.iter().position(|m| m == column)?;
        Some(self.values[i][j])
    }
}
