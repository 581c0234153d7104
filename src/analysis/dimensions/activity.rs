//! Activity metrics
//!
//! Engagement, likes, comments and recency fall back to estimates when the
//! analysis omits them (see [`crate::analysis::extract`]). Correlations are
//! computed over records where both metrics are available.

use crate::analysis::extract::{activity_observation, ActivityObservation};
use crate::analysis::grades::{classify, classify_fixed, ACTIVITY_SCALE, ENGAGEMENT_RANGE_SCALE};
use crate::analysis::stats::pearson_pairs;
use crate::types::analysis_results::{
    count_labels, mean_by_label, ActivityReport, MetricSeries, ENGAGEMENT_RANGE_CUTOFFS,
};
use crate::types::record::{columns, AnalysisRecord};

pub struct ActivityAnalyser;

impl ActivityAnalyser {
    pub const COLUMNS: &'static [&'static str] = &[
        columns::ID,
        columns::FOLLOW_NETWORK_ANALYSIS,
        columns::COMMENT_AUTHENTICITY_ANALYSIS,
        columns::FOLLOWERS,
        columns::FOLLOWINGS,
        columns::POSTS_COUNT,
    ];

    pub fn analyse(records: &[AnalysisRecord]) -> Option<ActivityReport> {
        if records.is_empty() {
            return None;
        }
        let observations: Vec<ActivityObservation> =
            records.iter().map(activity_observation).collect();

        let series = |f: fn(&ActivityObservation) -> Option<f64>| {
            MetricSeries::from_observations(observations.iter().map(f))
        };
        let correlate = |x: fn(&ActivityObservation) -> Option<f64>,
                         y: fn(&ActivityObservation) -> Option<f64>| {
            let pairs: Vec<(f64, f64)> = observations
                .iter()
                .filter_map(|o| Some((x(o)?, y(o)?)))
                .collect();
            pearson_pairs(&pairs)
        };

        let activity_score =
            MetricSeries::from_values(observations.iter().map(|o| o.activity_score).collect());

        let engagement_rate = series(|o| o.engagement_rate);

        Some(ActivityReport {
            likes: series(|o| o.likes),
            comments: series(|o| o.comments),
            engagement_ranges: classify_fixed(
                &engagement_rate.values,
                ENGAGEMENT_RANGE_CUTOFFS,
                ENGAGEMENT_RANGE_SCALE,
            ),
            engagement_rate,
            recency_span: series(|o| o.recency_span),
            posting_pace_distribution: count_labels(
                observations.iter().map(|o| o.posting_pace.as_str()),
            ),
            posting_pace_engagement: mean_by_label(
                observations
                    .iter()
                    .filter_map(|o| Some((o.posting_pace.clone(), o.engagement_rate?))),
            ),
            likes_comments_correlation: correlate(|o| o.likes, |o| o.comments),
            engagement_likes_correlation: correlate(|o| o.engagement_rate, |o| o.likes),
            activity_grades: classify(&activity_score.values, ACTIVITY_SCALE),
            activity_score,
        })
    }
}
