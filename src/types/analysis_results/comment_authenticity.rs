//! Comment authenticity results

use super::common::MetricSeries;
use crate::analysis::outliers::OutlierReport;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentAuthenticityReport {
    /// Authentic comment share in percent
    pub authentic_ratio: MetricSeries,
    pub low_authentic_ratio: MetricSeries,
    pub authenticity_level_distribution: BTreeMap<String, usize>,
    /// Flags aligned with `authentic_ratio.values`
    pub authentic_ratio_outliers: OutlierReport,
}
