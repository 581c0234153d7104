//! Commerce orientation
//!
//! Scores are clamped to 0–10 at extraction. Monetisation intent is both
//! Z-score graded and fenced for outliers.

use crate::analysis::extract::{commerce_observation, CommerceObservation};
use crate::analysis::grades::{classify, QUALITY_SCALE};
use crate::analysis::outliers::detect;
use crate::types::analysis_results::{
    count_labels, top_counts, CommerceReport, MetricSeries, SAMPLE_INTERPRETATION_LIMIT,
    TOP_SIGNAL_LIMIT,
};
use crate::types::record::{columns, AnalysisRecord};
use crate::utils::math::safe_ratio;

pub struct CommerceAnalyser;

impl CommerceAnalyser {
    pub const COLUMNS: &'static [&'static str] =
        &[columns::ID, columns::COMMERCE_ORIENTATION_ANALYSIS];

    /// `None` when no record carries a commerce analysis
    pub fn analyse(records: &[AnalysisRecord]) -> Option<CommerceReport> {
        let observations: Vec<CommerceObservation> = records
            .iter()
            .map(commerce_observation)
            .filter(|o| !o.is_empty())
            .collect();
        if observations.is_empty() {
            return None;
        }

        let monetization_intent =
            MetricSeries::from_observations(observations.iter().map(|o| o.monetization_intent));
        let content_fit =
            MetricSeries::from_observations(observations.iter().map(|o| o.content_fit));
        let bragging_orientation =
            MetricSeries::from_observations(observations.iter().map(|o| o.bragging_orientation));

        let total_selling: usize = observations.iter().map(|o| o.selling_signals.len()).sum();
        let selling_counts = count_labels(observations.iter().flat_map(|o| &o.selling_signals));
        let bragging_counts = count_labels(observations.iter().flat_map(|o| &o.bragging_signals));

        Some(CommerceReport {
            analysed_creators: observations.len(),
            avg_selling_signal_per_creator: safe_ratio(
                total_selling as f64,
                observations.len() as f64,
            ),
            archetype_distribution: count_labels(
                observations.iter().filter_map(|o| o.archetype.as_deref()),
            ),
            primary_motivation_distribution: count_labels(
                observations
                    .iter()
                    .filter_map(|o| o.primary_motivation.as_deref()),
            ),
            selling_signal_counts: top_counts(&selling_counts, TOP_SIGNAL_LIMIT),
            bragging_signal_counts: top_counts(&bragging_counts, TOP_SIGNAL_LIMIT),
            sample_interpretations: observations
                .iter()
                .filter_map(|o| o.interpretation.clone())
                .take(SAMPLE_INTERPRETATION_LIMIT)
                .collect(),
            monetization_grades: classify(&monetization_intent.values, QUALITY_SCALE),
            monetization_outliers: detect(&monetization_intent.values),
            monetization_intent,
            content_fit,
            bragging_orientation,
        })
    }
}
