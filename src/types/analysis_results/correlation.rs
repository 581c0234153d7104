//! Cross-metric correlation results

use super::common::{CorrelationMatrix, MetricSeries};
use crate::analysis::grades::{Assessment, GradeDistribution};
use crate::analysis::outliers::Fence;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Follower ratios are clamped to this range before reporting
pub const FOLLOWER_RATIO_BOUNDS: (f64, f64) = (0.01, 100.0);

/// Fixed overall-score cutoffs for performance grades
pub const PERFORMANCE_CUTOFFS: [f64; 4] = [8.0, 6.5, 5.0, 3.0];

/// Average engagement rate (percent) level cutoffs
pub const ENGAGEMENT_LEVEL_CUTOFFS: [f64; 4] = [3.0, 2.0, 1.0, 0.5];

/// Average authenticity score level cutoffs
pub const AUTHENTICITY_LEVEL_CUTOFFS: [f64; 4] = [7.0, 6.0, 5.0, 4.0];

/// |r| cutoffs for correlation strength
pub const CORRELATION_STRENGTH_CUTOFFS: [f64; 4] = [0.7, 0.5, 0.3, 0.1];

/// Non-zero distributions of the headline metrics
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiMetricDistribution {
    pub engagement_rates: MetricSeries,
    pub authenticity_scores: MetricSeries,
    pub overall_scores: MetricSeries,
    pub follower_ratios: MetricSeries,
}

/// Mean headline metrics for one category
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPerformance {
    pub count: usize,
    pub avg_engagement: f64,
    pub avg_authenticity: f64,
    pub avg_overall: f64,
}

/// IQR outliers for one metric across all records
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricOutliers {
    pub count: usize,
    pub fence: Option<Fence>,
    /// Identifiers of flagged records, in record order
    pub flagged_ids: Vec<String>,
}

/// Headline averages rated against fixed tiers
///
/// Averages run over every record with absent values as 0, the same
/// columns the outlier fences see.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyInsights {
    pub engagement: Assessment,
    pub authenticity: Assessment,
    pub avg_overall: f64,
    /// Pearson r between authenticity and followers, rated by magnitude
    pub authenticity_follower_correlation: Assessment,
    pub engagement_outliers: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationReport {
    pub record_count: usize,
    pub matrix: CorrelationMatrix,
    pub multi_metric: MultiMetricDistribution,
    pub category_performance: BTreeMap<String, CategoryPerformance>,
    pub performance_grades: GradeDistribution,
    pub outliers: BTreeMap<String, MetricOutliers>,
    pub insights: KeyInsights,
}
