//! Per-dimension isolation: one failing or empty dimension never sinks the rest

use crate::common::{
    bad_request, fast_fetcher, row, sample_analysis, server_disconnected, ScriptedSource, TABLE,
};
use connecta_stats::analysis::{Dimension, DimensionOutcome, ReportAssembler, NO_DATA};
use connecta_stats::source::Filter;
use serde_json::json;

fn sample_rows() -> Vec<connecta_stats::source::Row> {
    vec![
        sample_analysis("a1", "instagram", 12_000, 7.5),
        sample_analysis("a2", "instagram", 30_000, 8.2),
        sample_analysis("a3", "youtube", 4_000, 5.1),
    ]
}

#[tokio::test]
async fn test_exhausted_dimension_is_unavailable_others_computed() {
    // The first dimension fetched (overview) burns the whole retry budget
    let source = ScriptedSource::new(sample_rows()).failing(3, server_disconnected());
    let assembler = ReportAssembler::new(fast_fetcher(source, 100), TABLE);

    let aggregate = assembler.assemble(&Dimension::ALL).await;
    assert_eq!(aggregate.dimensions.len(), Dimension::ALL.len());

    match aggregate.get(Dimension::Overview).unwrap() {
        DimensionOutcome::Unavailable { reason } => {
            assert!(reason.contains("Max retries exceeded"), "{}", reason)
        }
        other => panic!("expected overview to be unavailable, got {:?}", other),
    }
    for dimension in Dimension::ALL.iter().skip(1) {
        assert!(
            aggregate.get(*dimension).unwrap().is_available(),
            "{} should be available",
            dimension
        );
    }
}

#[tokio::test]
async fn test_permanent_failure_isolated() {
    let source = ScriptedSource::new(sample_rows()).failing(1, bad_request());
    let assembler = ReportAssembler::new(fast_fetcher(source, 100), TABLE);

    let aggregate = assembler
        .assemble(&[Dimension::Network, Dimension::Activity])
        .await;
    assert!(!aggregate.get(Dimension::Network).unwrap().is_available());
    assert!(aggregate.get(Dimension::Activity).unwrap().is_available());
    assert_eq!(aggregate.available_count(), 1);
}

#[tokio::test]
async fn test_empty_source_reports_no_data() {
    let assembler = ReportAssembler::new(fast_fetcher(ScriptedSource::new(vec![]), 100), TABLE);

    let aggregate = assembler.assemble(&Dimension::ALL).await;
    for outcome in aggregate.dimensions.values() {
        assert_eq!(outcome, &DimensionOutcome::unavailable(NO_DATA));
    }
    let json = aggregate.to_json().unwrap();
    assert_eq!(
        json["correlation"],
        json!({"status": "unavailable", "reason": "no data"})
    );
}

#[tokio::test]
async fn test_rows_without_commerce_documents() {
    let rows = vec![row(json!({"id": "x", "followers": 100, "followings": 50}))];
    let assembler = ReportAssembler::new(fast_fetcher(ScriptedSource::new(rows), 100), TABLE);

    let aggregate = assembler
        .assemble(&[Dimension::CommerceOrientation, Dimension::Overview])
        .await;
    assert_eq!(
        aggregate.get(Dimension::CommerceOrientation).unwrap(),
        &DimensionOutcome::unavailable(NO_DATA)
    );
    assert!(aggregate.get(Dimension::Overview).unwrap().is_available());
}

#[tokio::test]
async fn test_filters_restrict_every_dimension() {
    let assembler = ReportAssembler::new(fast_fetcher(ScriptedSource::new(sample_rows()), 100), TABLE)
        .with_filters(vec![Filter::eq("platform", "instagram")]);

    let aggregate = assembler.assemble(&[Dimension::Overview]).await;
    let json = aggregate.to_json().unwrap();
    assert_eq!(json["overview"]["total_analyses"], 2);
    assert_eq!(json["overview"]["platform_distribution"]["instagram"], 2);
}

#[tokio::test]
async fn test_duplicate_dimensions_fetched_once() {
    let assembler = ReportAssembler::new(fast_fetcher(ScriptedSource::new(sample_rows()), 100), TABLE);

    let aggregate = assembler
        .assemble(&[Dimension::Network, Dimension::Network])
        .await;
    assert_eq!(aggregate.dimensions.len(), 1);
    assert_eq!(assembler.fetcher().source().calls(), 1);
}
