//! Follow-network analysis results

use super::common::MetricSeries;
use crate::analysis::grades::GradeDistribution;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Influence authenticity and follower-network structure across creators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkReport {
    pub authenticity: MetricSeries,
    pub network_type_distribution: BTreeMap<String, usize>,
    /// Mean authenticity score per network type
    pub network_type_authenticity: BTreeMap<String, f64>,
    pub follower_following_ratio: MetricSeries,
    /// Pearson r between authenticity score and followers, per record
    pub authenticity_follower_correlation: f64,
    pub quality_grades: GradeDistribution,
}
