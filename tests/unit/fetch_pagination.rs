//! Paged fetching: completeness, order and page-boundary termination

use crate::common::{fast_fetcher, row, ScriptedSource, TABLE};
use connecta_stats::fetch::FetchRequest;
use connecta_stats::source::Filter;
use serde_json::json;

const PAGE: usize = 4;

/// Fetch `n` sequential ids; returns the ids, call count and page windows
async fn fetch_ids(n: usize) -> (Vec<String>, usize, Vec<(usize, usize)>) {
    let fetcher = fast_fetcher(ScriptedSource::with_ids(n), PAGE);
    let rows = fetcher
        .fetch_all(&FetchRequest::new(TABLE, ["id"]))
        .await
        .unwrap();
    let ids = rows
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect();
    (ids, fetcher.source().calls(), fetcher.source().ranges())
}

#[tokio::test]
async fn test_fetch_all_returns_every_row_in_order() {
    for n in [0, 1, PAGE, PAGE + 1, 3 * PAGE] {
        let (ids, calls, _) = fetch_ids(n).await;
        let expected: Vec<String> = (0..n).map(|i| format!("id-{:05}", i)).collect();
        assert_eq!(ids, expected, "row set for n={}", n);
        assert_eq!(calls, n / PAGE + 1, "page calls for n={}", n);
    }
}

#[tokio::test]
async fn test_pages_are_contiguous_inclusive_windows() {
    let (_, _, ranges) = fetch_ids(2 * PAGE + 1).await;
    assert_eq!(ranges, vec![(0, 3), (4, 7), (8, 11)]);
}

#[tokio::test]
async fn test_exact_multiple_needs_trailing_empty_page() {
    let (ids, calls, _) = fetch_ids(2 * PAGE).await;
    assert_eq!(ids.len(), 2 * PAGE);
    assert_eq!(calls, 3);
}

#[tokio::test]
async fn test_filters_and_projection_are_applied() {
    let rows = (0..10)
        .map(|i| {
            let platform = if i % 2 == 0 { "instagram" } else { "youtube" };
            row(json!({
                "id": format!("id-{}", i),
                "platform": platform,
                "followers": i * 100,
            }))
        })
        .collect();
    let fetcher = fast_fetcher(ScriptedSource::new(rows), 3);
    let request = FetchRequest::new(TABLE, ["id", "followers"])
        .with_filters(&[Filter::eq("platform", "instagram")]);

    let fetched = fetcher.fetch_all(&request).await.unwrap();
    assert_eq!(fetched.len(), 5);
    assert!(fetched.iter().all(|r| !r.contains_key("platform")));
    assert_eq!(fetched[1]["followers"], json!(200));
}

#[tokio::test]
async fn test_exact_count() {
    let fetcher = fast_fetcher(ScriptedSource::with_ids(7), PAGE);
    assert_eq!(fetcher.count(TABLE, &[]).await.unwrap(), 7);
}
