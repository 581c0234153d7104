//! Console renderers, one per dimension report

use super::utils::{
    format_count_entries, format_distribution, format_grades, format_number, format_summary,
};
use crate::analysis::dimensions::DimensionReport;
use crate::types::analysis_results::{
    ActivityReport, CommentAuthenticityReport, CommerceReport, CorrelationReport,
    EvaluationReport, NetworkReport, OverviewReport,
};
use crate::utils::time::to_iso_date;

pub fn format_report(report: &DimensionReport) -> String {
    match report {
        DimensionReport::Overview(r) => format_overview(r),
        DimensionReport::Network(r) => format_network(r),
        DimensionReport::Activity(r) => format_activity(r),
        DimensionReport::CommentAuthenticity(r) => format_comment_authenticity(r),
        DimensionReport::CommerceOrientation(r) => format_commerce(r),
        DimensionReport::Correlation(r) => format_correlation(r),
        DimensionReport::EvaluationScores(r) => format_evaluation(r),
    }
}

pub fn format_overview(report: &OverviewReport) -> String {
    let mut output = format!(
        "Total analyses: {}\n",
        format_number(report.total_analyses)
    );
    output.push_str(&format!(
        "Analyses in last {} days (to {}): {}\n",
        report.recent_window_days,
        to_iso_date(report.reference_time),
        format_number(report.recent_analyses)
    ));
    output.push_str(&format!(
        "Average overall score: {:.2}\n",
        report.avg_overall_score
    ));
    output.push_str(&format_distribution(
        "Recommendations",
        &report.recommendation_distribution,
    ));
    output.push_str(&format_distribution(
        "Categories",
        &report.category_distribution,
    ));
    output.push_str(&format_distribution(
        "Platforms",
        &report.platform_distribution,
    ));
    output.push_str(&format_count_entries("Top tags", &report.top_tags));
    output
}

pub fn format_network(report: &NetworkReport) -> String {
    let mut output = format_summary("Authenticity score", &report.authenticity.summary);
    output.push_str(&format_summary(
        "Follower/following ratio",
        &report.follower_following_ratio.summary,
    ));
    output.push_str(&format!(
        "Authenticity vs followers correlation: {:.3}\n",
        report.authenticity_follower_correlation
    ));
    output.push_str(&format_distribution(
        "Network types",
        &report.network_type_distribution,
    ));
    if !report.network_type_authenticity.is_empty() {
        output.push_str("\nAverage authenticity by network type:\n");
        for (network_type, avg) in &report.network_type_authenticity {
            output.push_str(&format!("  {}|{:.2}\n", network_type, avg));
        }
    }
    output.push_str(&format_grades("Authenticity grades", &report.quality_grades));
    output
}

pub fn format_activity(report: &ActivityReport) -> String {
    let mut output = format_summary("Average likes", &report.likes.summary);
    output.push_str(&format_summary("Average comments", &report.comments.summary));
    output.push_str(&format_summary(
        "Engagement rate",
        &report.engagement_rate.summary,
    ));
    output.push_str(&format_summary(
        "Recency span (days)",
        &report.recency_span.summary,
    ));
    output.push_str(&format_summary(
        "Activity score",
        &report.activity_score.summary,
    ));
    output.push_str(&format!(
        "Likes vs comments correlation: {:.3}\n",
        report.likes_comments_correlation
    ));
    output.push_str(&format!(
        "Engagement vs likes correlation: {:.3}\n",
        report.engagement_likes_correlation
    ));
    output.push_str(&format_distribution(
        "Posting pace",
        &report.posting_pace_distribution,
    ));
    if !report.posting_pace_engagement.is_empty() {
        output.push_str("\nAverage engagement by posting pace:\n");
        for (pace, avg) in &report.posting_pace_engagement {
            output.push_str(&format!("  {}|{:.2}\n", pace, avg));
        }
    }
    output.push_str(&format_grades("Activity grades", &report.activity_grades));
    output.push_str(&format_grades("Engagement ranges", &report.engagement_ranges));
    output
}

pub fn format_comment_authenticity(report: &CommentAuthenticityReport) -> String {
    let mut output = format_summary(
        "Authentic comment ratio",
        &report.authentic_ratio.summary,
    );
    output.push_str(&format_summary(
        "Low-authenticity ratio",
        &report.low_authentic_ratio.summary,
    ));
    output.push_str(&format!(
        "Authentic ratio outliers: {}\n",
        report.authentic_ratio_outliers.count
    ));
    output.push_str(&format_distribution(
        "Authenticity levels",
        &report.authenticity_level_distribution,
    ));
    output
}

pub fn format_commerce(report: &CommerceReport) -> String {
    let mut output = format!(
        "Analysed creators: {}\n",
        format_number(report.analysed_creators)
    );
    output.push_str(&format_summary(
        "Monetization intent",
        &report.monetization_intent.summary,
    ));
    output.push_str(&format_summary("Content fit", &report.content_fit.summary));
    output.push_str(&format_summary(
        "Bragging orientation",
        &report.bragging_orientation.summary,
    ));
    output.push_str(&format!(
        "Selling signals per creator: {:.2}\n",
        report.avg_selling_signal_per_creator
    ));
    output.push_str(&format!(
        "Monetization outliers: {}\n",
        report.monetization_outliers.count
    ));
    output.push_str(&format_distribution(
        "Archetypes",
        &report.archetype_distribution,
    ));
    output.push_str(&format_distribution(
        "Primary motivation",
        &report.primary_motivation_distribution,
    ));
    output.push_str(&format_count_entries(
        "Selling signals",
        &report.selling_signal_counts,
    ));
    output.push_str(&format_count_entries(
        "Bragging signals",
        &report.bragging_signal_counts,
    ));
    if !report.sample_interpretations.is_empty() {
        output.push_str("\nSample interpretations:\n");
        for interpretation in &report.sample_interpretations {
            output.push_str(&format!("  - {}\n", interpretation));
        }
    }
    output.push_str(&format_grades(
        "Monetization grades",
        &report.monetization_grades,
    ));
    output
}

pub fn format_correlation(report: &CorrelationReport) -> String {
    let mut output = format!("Records: {}\n", format_number(report.record_count));
    let multi = &report.multi_metric;
    output.push_str(&format_summary(
        "Engagement rate",
        &multi.engagement_rates.summary,
    ));
    output.push_str(&format_summary(
        "Authenticity score",
        &multi.authenticity_scores.summary,
    ));
    output.push_str(&format_summary(
        "Overall score",
        &multi.overall_scores.summary,
    ));
    output.push_str(&format_summary(
        "Follower ratio",
        &multi.follower_ratios.summary,
    ));

    output.push_str("\nCorrelation matrix:\n");
    output.push_str(&format!("  {}\n", report.matrix.metrics.join("|")));
    for (metric, row) in report.matrix.metrics.iter().zip(&report.matrix.values) {
        let cells: Vec<String> = row.iter().map(|v| format!("{:.2}", v)).collect();
        output.push_str(&format!("  {}|{}\n", metric, cells.join("|")));
    }

    if !report.category_performance.is_empty() {
        output.push_str("\nCategory performance:\n");
        for (category, perf) in &report.category_performance {
            output.push_str(&format!(
                "  {}|{}|{:.2}|{:.2}|{:.2}\n",
                category, perf.count, perf.avg_engagement, perf.avg_authenticity, perf.avg_overall
            ));
        }
    }

    output.push_str("\nOutliers:\n");
    for (metric, outliers) in &report.outliers {
        output.push_str(&format!("  {}|{}\n", metric, outliers.count));
    }
    output.push_str(&format_grades(
        "Performance grades",
        &report.performance_grades,
    ));

    let insights = &report.insights;
    output.push_str("\nKey insights:\n");
    output.push_str(&format!(
        "  Average engagement: {:.2}% ({})\n",
        insights.engagement.value, insights.engagement.label
    ));
    output.push_str(&format!(
        "  Average authenticity: {:.2} ({})\n",
        insights.authenticity.value, insights.authenticity.label
    ));
    output.push_str(&format!(
        "  Average overall score: {:.2}\n",
        insights.avg_overall
    ));
    output.push_str(&format!(
        "  Authenticity vs followers: {:.3} ({})\n",
        insights.authenticity_follower_correlation.value,
        insights.authenticity_follower_correlation.label
    ));
    output.push_str(&format!(
        "  Engagement outliers: {}\n",
        insights.engagement_outliers
    ));
    output
}

pub fn format_evaluation(report: &EvaluationReport) -> String {
    let mut output = format_summary("Engagement", &report.engagement.summary);
    output.push_str(&format_summary("Activity", &report.activity.summary));
    output.push_str(&format_summary(
        "Communication",
        &report.communication.summary,
    ));
    output.push_str(&format_summary(
        "Growth potential",
        &report.growth_potential.summary,
    ));
    output.push_str(&format_summary("Overall", &report.overall.summary));
    output.push_str(&format_summary(
        "Inference confidence",
        &report.inference_confidence.summary,
    ));
    output.push_str(&format_grades("Overall grades", &report.overall_grades));
    output
}
