//! Full report over a SQLite snapshot where JSON documents are stored as text

use crate::common::{fast_fetcher, row, sample_analysis, seed_snapshot, TABLE};
use chrono::{TimeZone, Utc};
use connecta_stats::analysis::{
    Dimension, DimensionReport, OutputFormat, ReportAssembler, ReportFormatter,
};
use connecta_stats::source::{Filter, SqliteTableSource};
use serde_json::{json, Value};
use tempfile::TempDir;

fn seeded_source(dir: &TempDir) -> anyhow::Result<SqliteTableSource> {
    let path = dir.path().join("snapshot.db");
    let mut rows = vec![
        sample_analysis("s1", "instagram", 12_000, 7.5),
        sample_analysis("s2", "instagram", 30_000, 8.4),
        sample_analysis("s3", "youtube", 4_000, 5.2),
        sample_analysis("s4", "instagram", 9_000, 6.8),
        sample_analysis("s5", "tiktok", 52_000, 9.1),
    ];
    // Older analysis with string-encoded, python-literal evaluation
    rows.push(row(json!({
        "id": "s6",
        "platform": "instagram",
        "followers": 2_000,
        "followings": 1_000,
        "analyzed_at": "2026-08-01T00:00:00",
        "evaluation": "{'overall_score': '4.0', 'engagement': None}",
        "follow_network_analysis": "{\"influence_authenticity_score\": 35}",
    })));
    seed_snapshot(&path, &rows)?;
    Ok(SqliteTableSource::open(&path)?)
}

fn reference_time() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap()
}

#[tokio::test]
async fn test_snapshot_report_all_dimensions() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let source = seeded_source(&dir)?;
    let assembler = ReportAssembler::new(fast_fetcher(source, 2), TABLE)
        .with_reference_time(reference_time());

    let aggregate = assembler.assemble(&Dimension::ALL).await;
    assert_eq!(aggregate.available_count(), Dimension::ALL.len());

    let overview = match aggregate.get(Dimension::Overview).and_then(|o| o.report()) {
        Some(DimensionReport::Overview(report)) => report.clone(),
        other => panic!("unexpected overview outcome: {:?}", other),
    };
    assert_eq!(overview.total_analyses, 6);
    assert_eq!(overview.recent_analyses, 5);
    assert_eq!(overview.platform_distribution["instagram"], 4);
    assert_eq!(overview.top_tags[0].label, "뷰티");
    assert_eq!(overview.top_tags[0].count, 5);

    let network = match aggregate.get(Dimension::Network).and_then(|o| o.report()) {
        Some(DimensionReport::Network(report)) => report.clone(),
        other => panic!("unexpected network outcome: {:?}", other),
    };
    assert_eq!(network.authenticity.summary.count, 6);
    assert_eq!(network.quality_grades.total, 6);

    let commerce = match aggregate
        .get(Dimension::CommerceOrientation)
        .and_then(|o| o.report())
    {
        Some(DimensionReport::CommerceOrientation(report)) => report.clone(),
        other => panic!("unexpected commerce outcome: {:?}", other),
    };
    assert_eq!(commerce.analysed_creators, 5);
    assert_eq!(commerce.selling_signal_counts.len(), 2);

    let activity = match aggregate.get(Dimension::Activity).and_then(|o| o.report()) {
        Some(DimensionReport::Activity(report)) => report.clone(),
        other => panic!("unexpected activity outcome: {:?}", other),
    };
    assert_eq!(activity.engagement_ranges.count_by_label("높음 (3-5%)"), 5);
    assert_eq!(activity.engagement_ranges.count_by_label("매우 낮음 (0.5% 미만)"), 1);

    let correlation = match aggregate.get(Dimension::Correlation).and_then(|o| o.report()) {
        Some(DimensionReport::Correlation(report)) => report.clone(),
        other => panic!("unexpected correlation outcome: {:?}", other),
    };
    // s6 has no engagement rate and enters the average as 0
    assert!((correlation.insights.engagement.value - 17.5 / 6.0).abs() < 1e-9);
    assert_eq!(correlation.insights.engagement.label, "높은");
    assert_eq!(correlation.insights.authenticity.label, "매우 높은");
    Ok(())
}

#[tokio::test]
async fn test_snapshot_json_output() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let source = seeded_source(&dir)?;
    let assembler = ReportAssembler::new(fast_fetcher(source, 100), TABLE)
        .with_filters(vec![Filter::eq("platform", "instagram")])
        .with_reference_time(reference_time());

    let aggregate = assembler
        .assemble(&[Dimension::Overview, Dimension::EvaluationScores])
        .await;
    let rendered = ReportFormatter::format_aggregate(&aggregate, OutputFormat::Json)?;
    let parsed: Value = serde_json::from_str(&rendered)?;

    assert_eq!(parsed["overview"]["status"], "available");
    assert_eq!(parsed["overview"]["total_analyses"], 4);
    assert_eq!(parsed["evaluation_scores"]["status"], "available");
    assert_eq!(parsed["evaluation_scores"]["overall"]["summary"]["count"], 4);
    assert!(parsed.get("network").is_none());
    Ok(())
}

#[tokio::test]
async fn test_snapshot_console_output() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let source = seeded_source(&dir)?;
    let assembler = ReportAssembler::new(fast_fetcher(source, 100), TABLE)
        .with_reference_time(reference_time());

    let aggregate = assembler
        .assemble(&[Dimension::Network, Dimension::Activity])
        .await;
    let rendered = ReportFormatter::format_aggregate(&aggregate, OutputFormat::Console)?;
    assert!(rendered.contains("=== Network Analysis ==="));
    assert!(rendered.contains("매우 우수|"));
    assert!(rendered.contains("=== Activity Metrics ==="));
    assert!(rendered.contains("매우 활발|"));
    Ok(())
}
