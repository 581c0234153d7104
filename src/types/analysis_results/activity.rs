//! Activity metric results

use super::common::MetricSeries;
use crate::analysis::grades::GradeDistribution;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lower bounds (percent) of the top four engagement ranges
pub const ENGAGEMENT_RANGE_CUTOFFS: [f64; 4] = [5.0, 3.0, 1.0, 0.5];

/// Likes, comments, engagement and posting cadence across creators
///
/// Each series mixes explicit values with fallback estimates; a record
/// contributes at most one observation per series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityReport {
    pub likes: MetricSeries,
    pub comments: MetricSeries,
    pub engagement_rate: MetricSeries,
    pub recency_span: MetricSeries,
    pub posting_pace_distribution: BTreeMap<String, usize>,
    /// Mean engagement rate per posting pace
    pub posting_pace_engagement: BTreeMap<String, f64>,
    pub likes_comments_correlation: f64,
    pub engagement_likes_correlation: f64,
    /// Composite 0–100 activity scores
    pub activity_score: MetricSeries,
    pub activity_grades: GradeDistribution,
    /// Engagement rates bucketed by fixed percent ranges
    pub engagement_ranges: GradeDistribution,
}
