//! Cross-metric correlation
//!
//! One row per record with follower counts, headline analysis metrics and
//! evaluation scores. Correlations are pairwise complete; outlier fences
//! see absent values as the 0 sentinel so flags stay aligned with records.

use crate::analysis::extract::{evaluation_observation, AUTHENTICITY_SCORE, ENGAGEMENT_RATE};
use crate::analysis::grades::{
    assess, classify_fixed, Assessment, Grade, CORRELATION_STRENGTH_SCALE, LEVEL_SCALE,
    QUALITY_SCALE,
};
use crate::analysis::outliers::detect;
use crate::analysis::stats;
use crate::types::analysis_results::{
    CategoryPerformance, CorrelationMatrix, CorrelationReport, KeyInsights, MetricOutliers,
    MetricSeries, MultiMetricDistribution, AUTHENTICITY_LEVEL_CUTOFFS,
    CORRELATION_STRENGTH_CUTOFFS, ENGAGEMENT_LEVEL_CUTOFFS, FOLLOWER_RATIO_BOUNDS,
    PERFORMANCE_CUTOFFS,
};
use crate::types::record::{columns, AnalysisRecord};
use std::collections::BTreeMap;

/// Category label for records without one
pub const UNCATEGORISED: &str = "기타";

/// Matrix metrics, in row/column order
pub const CORRELATION_METRICS: [&str; 9] = [
    "followers",
    "followings",
    "engagement_rate",
    "authenticity_score",
    "overall_score",
    "engagement_score",
    "activity_score",
    "communication_score",
    "growth_potential_score",
];

/// Metrics checked for IQR outliers
pub const OUTLIER_METRICS: [&str; 3] = ["engagement_rate", "authenticity_score", "overall_score"];

#[derive(Debug, Clone)]
struct DataPoint {
    id: String,
    category: String,
    metrics: [Option<f64>; 9],
}

impl DataPoint {
    fn from_record(index: usize, record: &AnalysisRecord) -> Self {
        let evaluation = evaluation_observation(record);
        let network = &record.follow_network_analysis;
        Self {
            id: record.id.clone().unwrap_or_else(|| format!("#{}", index)),
            category: record
                .category
                .clone()
                .unwrap_or_else(|| UNCATEGORISED.to_string()),
            metrics: [
                record.followers,
                record.followings,
                ENGAGEMENT_RATE.number(network),
                AUTHENTICITY_SCORE.number(network),
                evaluation.overall,
                evaluation.engagement,
                evaluation.activity,
                evaluation.communication,
                evaluation.growth_potential,
            ],
        }
    }

    fn metric(&self, name: &str) -> Option<f64> {
        CORRELATION_METRICS
            .iter()
            .position(|m| *m == name)
            .and_then(|idx| self.metrics[idx])
    }
}

/// Follower/following ratio clamped to a plausible range
///
/// With no followings the follower count in thousands stands in for the
/// ratio; with neither, the lower bound.
pub fn clamped_follower_ratio(followers: f64, followings: f64) -> f64 {
    let (low, high) = FOLLOWER_RATIO_BOUNDS;
    if followings > 0.0 {
        (followers / followings).clamp(low, high)
    } else if followers > 0.0 {
        (followers / 1000.0).min(high)
    } else {
        low
    }
}

pub struct CorrelationAnalyser;

impl CorrelationAnalyser {
    pub const COLUMNS: &'static [&'static str] = &[
        columns::ID,
        columns::FOLLOWERS,
        columns::FOLLOWINGS,
        columns::CATEGORY,
        columns::EVALUATION,
        columns::FOLLOW_NETWORK_ANALYSIS,
    ];

    pub fn analyse(records: &[AnalysisRecord]) -> Option<CorrelationReport> {
        if records.is_empty() {
            return None;
        }
        let points: Vec<DataPoint> = records
            .iter()
            .enumerate()
            .map(|(idx, record)| DataPoint::from_record(idx, record))
            .collect();

        let columns: Vec<Vec<Option<f64>>> = (0..CORRELATION_METRICS.len())
            .map(|k| points.iter().map(|p| p.metrics[k]).collect())
            .collect();
        let matrix = CorrelationMatrix::from_columns(&CORRELATION_METRICS, &columns);

        let non_zero = |name: &str| {
            MetricSeries::from_values(
                points
                    .iter()
                    .filter_map(|p| p.metric(name))
                    .filter(|v| *v > 0.0)
                    .collect(),
            )
        };
        let multi_metric = MultiMetricDistribution {
            engagement_rates: non_zero("engagement_rate"),
            authenticity_scores: non_zero("authenticity_score"),
            overall_scores: non_zero("overall_score"),
            follower_ratios: MetricSeries::from_values(
                records
                    .iter()
                    .map(|r| clamped_follower_ratio(r.followers_or_zero(), r.followings_or_zero()))
                    .collect(),
            ),
        };

        let overall: Vec<f64> = points.iter().filter_map(|p| p.metric("overall_score")).collect();
        let outliers: BTreeMap<String, MetricOutliers> = OUTLIER_METRICS
            .iter()
            .map(|name| (name.to_string(), Self::metric_outliers(&points, name)))
            .collect();
        let engagement_outliers = outliers
            .get("engagement_rate")
            .map(|o| o.count)
            .unwrap_or(0);

        Some(CorrelationReport {
            record_count: points.len(),
            matrix,
            multi_metric,
            category_performance: Self::category_performance(&points),
            performance_grades: classify_fixed(&overall, PERFORMANCE_CUTOFFS, QUALITY_SCALE),
            insights: Self::key_insights(&points, engagement_outliers),
            outliers,
        })
    }

    fn key_insights(points: &[DataPoint], engagement_outliers: usize) -> KeyInsights {
        let with_sentinel = |name: &str| -> Vec<f64> {
            points.iter().map(|p| p.metric(name).unwrap_or(0.0)).collect()
        };
        let pairs: Vec<(f64, f64)> = points
            .iter()
            .filter_map(|p| {
                let followers = p.metric("followers")?;
                Some((p.metric("authenticity_score").unwrap_or(0.0), followers))
            })
            .collect();
        let r = stats::pearson_pairs(&pairs);

        KeyInsights {
            engagement: assess(
                stats::mean(&with_sentinel("engagement_rate")),
                ENGAGEMENT_LEVEL_CUTOFFS,
                LEVEL_SCALE,
            ),
            authenticity: assess(
                stats::mean(&with_sentinel("authenticity_score")),
                AUTHENTICITY_LEVEL_CUTOFFS,
                LEVEL_SCALE,
            ),
            avg_overall: stats::mean(&with_sentinel("overall_score")),
            authenticity_follower_correlation: Assessment::new(
                r,
                Grade::from_cutoffs(r.abs(), CORRELATION_STRENGTH_CUTOFFS),
                CORRELATION_STRENGTH_SCALE,
            ),
            engagement_outliers,
        }
    }

    fn category_performance(points: &[DataPoint]) -> BTreeMap<String, CategoryPerformance> {
        let mut groups: BTreeMap<&str, Vec<&DataPoint>> = BTreeMap::new();
        for point in points {
            groups.entry(point.category.as_str()).or_default().push(point);
        }
        groups
            .into_iter()
            .map(|(category, members)| {
                let mean_of = |name: &str| {
                    let values: Vec<f64> = members.iter().filter_map(|p| p.metric(name)).collect();
                    stats::mean(&values)
                };
                let performance = CategoryPerformance {
                    count: members.len(),
                    avg_engagement: mean_of("engagement_rate"),
                    avg_authenticity: mean_of("authenticity_score"),
                    avg_overall: mean_of("overall_score"),
                };
                (category.to_string(), performance)
            })
            .collect()
    }

    fn metric_outliers(points: &[DataPoint], name: &str) -> MetricOutliers {
        let values: Vec<f64> = points
            .iter()
            .map(|p| p.metric(name).unwrap_or(0.0))
            .collect();
        let report = detect(&values);
        MetricOutliers {
            count: report.count,
            fence: report.fence,
            flagged_ids: report
                .flagged_indices()
                .into_iter()
                .map(|idx| points[idx].id.clone())
                .collect(),
        }
    }
}
