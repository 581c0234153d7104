//! Caller-owned memoisation through `assemble_cached`

use crate::common::{fast_fetcher, sample_analysis, server_disconnected, ScriptedSource, TABLE};
use connecta_stats::analysis::{Dimension, ReportAssembler, ReportCache};
use connecta_stats::source::Filter;

fn rows() -> Vec<connecta_stats::source::Row> {
    (0..5)
        .map(|i| sample_analysis(&format!("c{}", i), "instagram", 1_000 * (i + 1), 5.0 + i as f64))
        .collect()
}

#[tokio::test]
async fn test_second_pass_is_served_from_cache() {
    let assembler = ReportAssembler::new(fast_fetcher(ScriptedSource::new(rows()), 100), TABLE);
    let cache = ReportCache::new();
    let dims = [Dimension::Network, Dimension::Activity];

    let first = assembler.assemble_cached(&dims, &cache).await;
    let calls_after_first = assembler.fetcher().source().calls();
    let second = assembler.assemble_cached(&dims, &cache).await;

    assert_eq!(first, second);
    assert_eq!(assembler.fetcher().source().calls(), calls_after_first);

    let stats = cache.get_stats();
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.hits, 2);
    assert_eq!(cache.size(), 2);
}

#[tokio::test]
async fn test_unavailable_outcomes_are_not_cached() {
    let source = ScriptedSource::new(rows()).failing(3, server_disconnected());
    let assembler = ReportAssembler::new(fast_fetcher(source, 100), TABLE);
    let cache = ReportCache::new();

    let first = assembler.assemble_cached(&[Dimension::Network], &cache).await;
    assert!(!first.get(Dimension::Network).unwrap().is_available());
    assert_eq!(cache.size(), 0);

    // The failure budget is spent; the retry goes back to the source
    let second = assembler.assemble_cached(&[Dimension::Network], &cache).await;
    assert!(second.get(Dimension::Network).unwrap().is_available());
    assert_eq!(cache.size(), 1);
}

#[tokio::test]
async fn test_filters_partition_the_cache() {
    let cache = ReportCache::new();
    let unfiltered = ReportAssembler::new(fast_fetcher(ScriptedSource::new(rows()), 100), TABLE);
    let filtered = ReportAssembler::new(fast_fetcher(ScriptedSource::new(rows()), 100), TABLE)
        .with_filters(vec![Filter::eq("platform", "youtube")]);

    unfiltered
        .assemble_cached(&[Dimension::Overview], &cache)
        .await;
    let aggregate = filtered.assemble_cached(&[Dimension::Overview], &cache).await;

    assert_eq!(cache.get_stats().hits, 0);
    assert!(!aggregate.get(Dimension::Overview).unwrap().is_available());
}

#[tokio::test]
async fn test_plain_assemble_never_touches_cache() {
    let assembler = ReportAssembler::new(fast_fetcher(ScriptedSource::new(rows()), 100), TABLE);
    assembler.assemble(&[Dimension::Overview]).await;
    assembler.assemble(&[Dimension::Overview]).await;
    assert_eq!(assembler.fetcher().source().calls(), 2);
}
