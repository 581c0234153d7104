//! Headline overview results

use super::common::CountEntry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Most frequent tags reported in the overview
pub const TOP_TAG_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverviewReport {
    pub total_analyses: usize,
    /// Analyses with `analyzed_at` inside the recent window
    pub recent_analyses: usize,
    pub recent_window_days: i64,
    pub reference_time: DateTime<Utc>,
    pub avg_overall_score: f64,
    pub recommendation_distribution: BTreeMap<String, usize>,
    pub category_distribution: BTreeMap<String, usize>,
    pub platform_distribution: BTreeMap<String, usize>,
    pub top_tags: Vec<CountEntry>,
}
