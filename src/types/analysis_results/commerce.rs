//! Commerce orientation results

use super::common::{CountEntry, MetricSeries};
use crate::analysis::grades::GradeDistribution;
use crate::analysis::outliers::OutlierReport;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Most frequent signals reported per list
pub const TOP_SIGNAL_LIMIT: usize = 10;

/// Interpretations carried through as examples
pub const SAMPLE_INTERPRETATION_LIMIT: usize = 5;

/// Monetisation intent and selling behaviour across creators (0–10 scores)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommerceReport {
    /// Records carrying any commerce analysis
    pub analysed_creators: usize,
    pub monetization_intent: MetricSeries,
    pub content_fit: MetricSeries,
    pub bragging_orientation: MetricSeries,
    pub avg_selling_signal_per_creator: f64,
    pub archetype_distribution: BTreeMap<String, usize>,
    pub primary_motivation_distribution: BTreeMap<String, usize>,
    pub selling_signal_counts: Vec<CountEntry>,
    pub bragging_signal_counts: Vec<CountEntry>,
    pub sample_interpretations: Vec<String>,
    pub monetization_grades: GradeDistribution,
    /// Flags aligned with `monetization_intent.values`
    pub monetization_outliers: OutlierReport,
}
