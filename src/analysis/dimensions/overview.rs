//! Headline overview: counts, recency, recommendations, categories, tags

use crate::analysis::extract::evaluation_observation;
use crate::analysis::stats;
use crate::types::analysis_results::{count_labels, top_counts, OverviewReport, TOP_TAG_LIMIT};
use crate::types::record::{columns, AnalysisRecord};
use crate::utils::time::{is_within_days, RECENT_WINDOW_DAYS};
use chrono::{DateTime, Utc};

pub struct OverviewAnalyser;

impl OverviewAnalyser {
    pub const COLUMNS: &'static [&'static str] = &[
        columns::ID,
        columns::PLATFORM,
        columns::CATEGORY,
        columns::RECOMMENDATION,
        columns::TAGS,
        columns::EVALUATION,
        columns::ANALYZED_AT,
    ];

    /// Overview relative to `reference` (normally "now")
    pub fn analyse(records: &[AnalysisRecord], reference: DateTime<Utc>) -> Option<OverviewReport> {
        if records.is_empty() {
            return None;
        }

        let recent_analyses = records
            .iter()
            .filter_map(|r| r.analyzed_at)
            .filter(|ts| is_within_days(*ts, reference, RECENT_WINDOW_DAYS))
            .count();

        let overall: Vec<f64> = records
            .iter()
            .filter_map(|r| evaluation_observation(r).overall)
            .collect();

        let tag_counts = count_labels(records.iter().flat_map(|r| &r.tags));

        Some(OverviewReport {
            total_analyses: records.len(),
            recent_analyses,
            recent_window_days: RECENT_WINDOW_DAYS,
            reference_time: reference,
            avg_overall_score: stats::mean(&overall),
            recommendation_distribution: count_labels(
                records.iter().filter_map(|r| r.recommendation.as_deref()),
            ),
            category_distribution: count_labels(records.iter().filter_map(|r| r.category.as_deref())),
            platform_distribution: count_labels(records.iter().filter_map(|r| r.platform.as_deref())),
            top_tags: top_counts(&tag_counts, TOP_TAG_LIMIT),
        })
    }
}
