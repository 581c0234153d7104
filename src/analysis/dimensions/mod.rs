//! Report dimensions
//!
//! Each dimension is an independent statistical report area with its own
//! column projection and analyser. Analysers are pure functions over decoded
//! records and return `None` when the records hold nothing to report.

pub mod activity;
pub mod comment_authenticity;
pub mod commerce;
pub mod correlation;
pub mod evaluation;
pub mod network;
pub mod overview;

pub use activity::ActivityAnalyser;
pub use comment_authenticity::CommentAuthenticityAnalyser;
pub use commerce::CommerceAnalyser;
pub use correlation::CorrelationAnalyser;
pub use evaluation::EvaluationAnalyser;
pub use network::NetworkAnalyser;
pub use overview::OverviewAnalyser;

use crate::errors::AppError;
use crate::types::analysis_results::{
    ActivityReport, CommentAuthenticityReport, CommerceReport, CorrelationReport,
    EvaluationReport, NetworkReport, OverviewReport,
};
use crate::types::record::AnalysisRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Independently computed report area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Overview,
    Network,
    Activity,
    CommentAuthenticity,
    CommerceOrientation,
    Correlation,
    EvaluationScores,
}

impl Dimension {
    pub const ALL: [Dimension; 7] = [
        Dimension::Overview,
        Dimension::Network,
        Dimension::Activity,
        Dimension::CommentAuthenticity,
        Dimension::CommerceOrientation,
        Dimension::Correlation,
        Dimension::EvaluationScores,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Overview => "overview",
            Dimension::Network => "network",
            Dimension::Activity => "activity",
            Dimension::CommentAuthenticity => "comment_authenticity",
            Dimension::CommerceOrientation => "commerce_orientation",
            Dimension::Correlation => "correlation",
            Dimension::EvaluationScores => "evaluation_scores",
        }
    }

    /// Column projection fetched for this dimension
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Dimension::Overview => OverviewAnalyser::COLUMNS,
            Dimension::Network => NetworkAnalyser::COLUMNS,
            Dimension::Activity => ActivityAnalyser::COLUMNS,
            Dimension::CommentAuthenticity => CommentAuthenticityAnalyser::COLUMNS,
            Dimension::CommerceOrientation => CommerceAnalyser::COLUMNS,
            Dimension::Correlation => CorrelationAnalyser::COLUMNS,
            Dimension::EvaluationScores => EvaluationAnalyser::COLUMNS,
        }
    }

    /// Human-readable title for console reports
    pub fn title(&self) -> &'static str {
        match self {
            Dimension::Overview => "Overview",
            Dimension::Network => "Network Analysis",
            Dimension::Activity => "Activity Metrics",
            Dimension::CommentAuthenticity => "Comment Authenticity",
            Dimension::CommerceOrientation => "Commerce Orientation",
            Dimension::Correlation => "Cross-Metric Correlation",
            Dimension::EvaluationScores => "Evaluation Scores",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dimension {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalised = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalised.as_str() {
            "overview" => Ok(Dimension::Overview),
            "network" => Ok(Dimension::Network),
            "activity" => Ok(Dimension::Activity),
            "comment_authenticity" | "comments" => Ok(Dimension::CommentAuthenticity),
            "commerce_orientation" | "commerce" => Ok(Dimension::CommerceOrientation),
            "correlation" => Ok(Dimension::Correlation),
            "evaluation_scores" | "evaluation" => Ok(Dimension::EvaluationScores),
            _ => Err(AppError::UnknownDimension(s.to_string())),
        }
    }
}

/// Result of one dimension's analyser
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DimensionReport {
    Overview(OverviewReport),
    Network(NetworkReport),
    Activity(ActivityReport),
    CommentAuthenticity(CommentAuthenticityReport),
    CommerceOrientation(CommerceReport),
    Correlation(CorrelationReport),
    EvaluationScores(EvaluationReport),
}

impl DimensionReport {
    pub fn dimension(&self) -> Dimension {
        match self {
            DimensionReport::Overview(_) => Dimension::Overview,
            DimensionReport::Network(_) => Dimension::Network,
            DimensionReport::Activity(_) => Dimension::Activity,
            DimensionReport::CommentAuthenticity(_) => Dimension::CommentAuthenticity,
            DimensionReport::CommerceOrientation(_) => Dimension::CommerceOrientation,
            DimensionReport::Correlation(_) => Dimension::Correlation,
            DimensionReport::EvaluationScores(_) => Dimension::EvaluationScores,
        }
    }
}

/// Run one dimension's analyser over decoded records
pub fn analyse_dimension(
    dimension: Dimension,
    records: &[AnalysisRecord],
    reference_time: DateTime<Utc>,
) -> Option<DimensionReport> {
    match dimension {
        Dimension::Overview => {
            OverviewAnalyser::analyse(records, reference_time).map(DimensionReport::Overview)
        }
        Dimension::Network => NetworkAnalyser::analyse(records).map(DimensionReport::Network),
        Dimension::Activity => ActivityAnalyser::analyse(records).map(DimensionReport::Activity),
        Dimension::CommentAuthenticity => CommentAuthenticityAnalyser::analyse(records)
            .map(DimensionReport::CommentAuthenticity),
        Dimension::CommerceOrientation => {
            CommerceAnalyser::analyse(records).map(DimensionReport::CommerceOrientation)
        }
        Dimension::Correlation => {
            CorrelationAnalyser::analyse(records).map(DimensionReport::Correlation)
        }
        Dimension::EvaluationScores => {
            EvaluationAnalyser::analyse(records).map(DimensionReport::EvaluationScores)
        }
    }
}
