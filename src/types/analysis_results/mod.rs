//! Analysis result types and data structures
//!
//! Every report dimension produces one of these structures. They hold only
//! numbers, strings, lists and maps so they serialise directly into the
//! aggregate handed to presentation code.

mod activity;
mod comment_authenticity;
mod commerce;
mod common;
mod correlation;
mod evaluation;
mod network;
mod overview;

pub use activity::{ActivityReport, ENGAGEMENT_RANGE_CUTOFFS};
pub use comment_authenticity::CommentAuthenticityReport;
pub use commerce::{CommerceReport, SAMPLE_INTERPRETATION_LIMIT, TOP_SIGNAL_LIMIT};
pub use common::{
    count_labels, mean_by_label, top_counts, CorrelationMatrix, CountEntry, MetricSeries,
};
pub use correlation::{
    CategoryPerformance, CorrelationReport, KeyInsights, MetricOutliers, MultiMetricDistribution,
    AUTHENTICITY_LEVEL_CUTOFFS, CORRELATION_STRENGTH_CUTOFFS, ENGAGEMENT_LEVEL_CUTOFFS,
    FOLLOWER_RATIO_BOUNDS, PERFORMANCE_CUTOFFS,
};
pub use evaluation::EvaluationReport;
pub use network::NetworkReport;
pub use overview::{OverviewReport, TOP_TAG_LIMIT};
