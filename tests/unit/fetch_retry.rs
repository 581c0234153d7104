//! Retry budget and transient/permanent failure classification

use crate::common::{bad_request, fast_fetcher, server_disconnected, ScriptedSource, TABLE};
use connecta_stats::errors::SourceError;
use connecta_stats::fetch::FetchRequest;

const PAGE: usize = 4;

fn request() -> FetchRequest {
    FetchRequest::new(TABLE, ["id"])
}

#[tokio::test]
async fn test_transient_failures_within_budget_recover() {
    let source = ScriptedSource::with_ids(6).failing(2, server_disconnected());
    let fetcher = fast_fetcher(source, PAGE);

    let rows = fetcher.fetch_all(&request()).await.unwrap();
    assert_eq!(rows.len(), 6);
    // Two failed attempts on the first page, then two successful pages
    assert_eq!(fetcher.source().calls(), 4);
}

#[tokio::test]
async fn test_transient_exhaustion_reports_attempts() {
    let source = ScriptedSource::with_ids(6).failing(3, server_disconnected());
    let fetcher = fast_fetcher(source, PAGE);

    let err = fetcher.fetch_all(&request()).await.unwrap_err();
    match err {
        SourceError::MaxRetriesExceeded {
            attempts,
            last_error,
            ..
        } => {
            assert_eq!(attempts, 3);
            assert!(last_error.contains("Server disconnected"));
        }
        other => panic!("expected MaxRetriesExceeded, got {:?}", other),
    }
    assert_eq!(fetcher.source().calls(), 3);
}

#[tokio::test]
async fn test_permanent_failure_is_not_retried() {
    let source = ScriptedSource::with_ids(6).failing(1, bad_request());
    let fetcher = fast_fetcher(source, PAGE);

    let err = fetcher.fetch_all(&request()).await.unwrap_err();
    assert!(matches!(err, SourceError::RequestFailed { status: 400, .. }));
    assert!(!err.is_transient());
    assert_eq!(fetcher.source().calls(), 1);
}

#[tokio::test]
async fn test_mid_pagination_failure_discards_partial_rows() {
    let source =
        ScriptedSource::with_ids(3 * PAGE).failing_at_offset(PAGE, server_disconnected());
    let fetcher = fast_fetcher(source, PAGE);

    let result = fetcher.fetch_all(&request()).await;
    assert!(matches!(
        result,
        Err(SourceError::MaxRetriesExceeded { .. })
    ));
    // First page once, second page for the whole budget
    assert_eq!(fetcher.source().calls(), 1 + 3);
}

#[tokio::test]
async fn test_count_uses_retry_policy() {
    let source = ScriptedSource::with_ids(5).failing(1, server_disconnected());
    let fetcher = fast_fetcher(source, PAGE);
    assert_eq!(fetcher.count(TABLE, &[]).await.unwrap(), 5);
    assert_eq!(fetcher.source().calls(), 2);
}
