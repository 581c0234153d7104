//! Follow-network analysis
//!
//! Authenticity scores are graded against their own distribution; the
//! follower/following ratio only uses records where both counts are
//! positive.

use crate::analysis::extract::network_observation;
use crate::analysis::grades::{classify, QUALITY_SCALE};
use crate::analysis::stats::pearson_pairs;
use crate::types::analysis_results::{count_labels, mean_by_label, MetricSeries, NetworkReport};
use crate::types::record::{columns, AnalysisRecord};

pub struct NetworkAnalyser;

impl NetworkAnalyser {
    pub const COLUMNS: &'static [&'static str] = &[
        columns::ID,
        columns::FOLLOW_NETWORK_ANALYSIS,
        columns::FOLLOWERS,
        columns::FOLLOWINGS,
    ];

    /// `None` when no record carries an authenticity score
    pub fn analyse(records: &[AnalysisRecord]) -> Option<NetworkReport> {
        let observations: Vec<_> = records.iter().map(network_observation).collect();

        let authenticity =
            MetricSeries::from_observations(observations.iter().map(|o| o.authenticity_score));
        if authenticity.is_empty() {
            return None;
        }

        let network_type_distribution =
            count_labels(observations.iter().filter_map(|o| o.network_type.as_deref()));

        let network_type_authenticity = mean_by_label(observations.iter().filter_map(|o| {
            Some((o.network_type.clone()?, o.authenticity_score?))
        }));

        let follower_following_ratio =
            MetricSeries::from_observations(observations.iter().map(|o| o.follower_ratio));

        let pairs: Vec<(f64, f64)> = observations
            .iter()
            .filter_map(|o| Some((o.authenticity_score?, o.followers?)))
            .collect();

        Some(NetworkReport {
            quality_grades: classify(&authenticity.values, QUALITY_SCALE),
            authenticity,
            network_type_distribution,
            network_type_authenticity,
            follower_following_ratio,
            authenticity_follower_correlation: pearson_pairs(&pairs),
        })
    }
}
