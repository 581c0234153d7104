//! Comment authenticity
//!
//! Ratios arrive as free text ("약 40%") under `ratio_estimation` and are
//! scanned for their first decimal number.

use crate::analysis::extract::comment_observation;
use crate::analysis::outliers::detect;
use crate::types::analysis_results::{count_labels, CommentAuthenticityReport, MetricSeries};
use crate::types::record::{columns, AnalysisRecord};

pub struct CommentAuthenticityAnalyser;

impl CommentAuthenticityAnalyser {
    pub const COLUMNS: &'static [&'static str] =
        &[columns::ID, columns::COMMENT_AUTHENTICITY_ANALYSIS];

    pub fn analyse(records: &[AnalysisRecord]) -> Option<CommentAuthenticityReport> {
        if records.is_empty() {
            return None;
        }
        let observations: Vec<_> = records.iter().map(comment_observation).collect();

        let authentic_ratio =
            MetricSeries::from_observations(observations.iter().map(|o| o.authentic_ratio));
        let low_authentic_ratio =
            MetricSeries::from_observations(observations.iter().map(|o| o.low_authentic_ratio));

        Some(CommentAuthenticityReport {
            authentic_ratio_outliers: detect(&authentic_ratio.values),
            authentic_ratio,
            low_authentic_ratio,
            authenticity_level_distribution: count_labels(
                observations
                    .iter()
                    .filter_map(|o| o.authenticity_level.as_deref()),
            ),
        })
    }
}
