//! Common Test Utilities
//!
//! Shared sources and fixtures used across the unit and integration suites.

#![allow(dead_code)]

use connecta_stats::errors::{SourceError, SourceResult};
use connecta_stats::fetch::{FetchPolicy, PagedFetcher};
use connecta_stats::source::sqlite::setup_snapshot_schema;
use connecta_stats::source::{FilterOp, QueryResponse, Row, TableQuery, TableSource};
use rusqlite::Connection;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

pub const TABLE: &str = "ai_influencer_analyses";

/// Retry policy with millisecond backoff so failure tests stay fast
pub fn fast_policy(page_size: usize) -> FetchPolicy {
    FetchPolicy {
        page_size,
        max_attempts: 3,
        initial_backoff: Duration::from_millis(1),
        backoff_multiplier: 2.0,
        max_backoff_seconds: 1,
    }
}

pub fn fast_fetcher<S: TableSource>(source: S, page_size: usize) -> PagedFetcher<S> {
    PagedFetcher::new(source, fast_policy(page_size))
}

/// In-memory table source with scripted failures
///
/// Honours the inclusive `range` window and `eq` filters. Each call first
/// pops the failure queue; once it is empty calls succeed.
pub struct ScriptedSource {
    rows: Vec<Row>,
    failures: Mutex<VecDeque<SourceError>>,
    /// Fail every call whose range starts at this offset
    fail_at_offset: Option<(usize, SourceError)>,
    calls: AtomicUsize,
    ranges: Mutex<Vec<(usize, usize)>>,
}

impl ScriptedSource {
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows,
            failures: Mutex::new(VecDeque::new()),
            fail_at_offset: None,
            calls: AtomicUsize::new(0),
            ranges: Mutex::new(Vec::new()),
        }
    }

    /// Source with `n` rows carrying only a sequential id
    pub fn with_ids(n: usize) -> Self {
        Self::new(
            (0..n)
                .map(|i| row(json!({ "id": format!("id-{:05}", i) })))
                .collect(),
        )
    }

    /// Fail the next `times` calls with `error`
    pub fn failing(self, times: usize, error: SourceError) -> Self {
        {
            let mut failures = self.failures.lock().unwrap();
            for _ in 0..times {
                failures.push_back(error.clone());
            }
        }
        self
    }

    pub fn failing_at_offset(mut self, offset: usize, error: SourceError) -> Self {
        self.fail_at_offset = Some((offset, error));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn ranges(&self) -> Vec<(usize, usize)> {
        self.ranges.lock().unwrap().clone()
    }

    fn matches(row: &Row, query: &TableQuery) -> bool {
        query.filters.iter().all(|filter| match filter.op {
            FilterOp::Eq => row.get(&filter.column) == Some(&filter.value),
            _ => true,
        })
    }
}

impl TableSource for ScriptedSource {
    async fn execute(&self, query: &TableQuery) -> SourceResult<QueryResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some((offset, end)) = query.range {
            self.ranges.lock().unwrap().push((offset, end));
        }

        if let Some(error) = self.failures.lock().unwrap().pop_front() {
            return Err(error);
        }
        if let (Some((fail_offset, error)), Some((offset, _))) = (&self.fail_at_offset, query.range)
        {
            if *fail_offset == offset {
                return Err(error.clone());
            }
        }

        let matching: Vec<&Row> = self
            .rows
            .iter()
            .filter(|r| Self::matches(r, query))
            .collect();
        let count = query.count_exact.then_some(matching.len() as u64);

        let window: Vec<Row> = match query.range {
            Some((offset, end)) => matching
                .into_iter()
                .skip(offset)
                .take(end.saturating_sub(offset) + 1)
                .map(|r| project(r, &query.columns))
                .collect(),
            None => matching
                .into_iter()
                .map(|r| project(r, &query.columns))
                .collect(),
        };

        Ok(QueryResponse {
            data: window,
            count,
        })
    }
}

fn project(row: &Row, columns: &[String]) -> Row {
    if columns.is_empty() || columns.iter().any(|c| c == "*") {
        return row.clone();
    }
    columns
        .iter()
        .filter_map(|c| row.get(c).map(|v| (c.clone(), v.clone())))
        .collect()
}

/// Build a row from a JSON object literal
pub fn row(value: Value) -> Row {
    match value {
        Value::Object(map) => map,
        other => panic!("row fixture must be an object, got {}", other),
    }
}

pub fn server_disconnected() -> SourceError {
    SourceError::ConnectionFailed("Server disconnected".to_string())
}

pub fn bad_request() -> SourceError {
    SourceError::RequestFailed {
        table: TABLE.to_string(),
        status: 400,
        message: "column does not exist".to_string(),
    }
}

/// A fully populated analysis row as the hosted table returns it
pub fn sample_analysis(id: &str, platform: &str, followers: i64, overall: f64) -> Row {
    row(json!({
        "id": id,
        "platform": platform,
        "followers": followers,
        "followings": 500,
        "posts_count": 300,
        "category": "뷰티",
        "tags": ["뷰티", "스킨케어"],
        "recommendation": "추천",
        "analyzed_at": "2026-10-15T09:00:00Z",
        "created_at": "2026-10-15T09:00:00Z",
        "follow_network_analysis": {
            "influence_authenticity_score": overall * 10.0,
            "network_type": "실제 팬 중심",
            "est_engagement_rate_last5": 3.5,
            "avg_likes_last5": 1200,
            "posting_pace_last5": "매일",
        },
        "comment_authenticity_analysis": {
            "avg_comments_last5": 40,
            "ratio_estimation": {
                "authentic_comments_ratio": "85%",
                "low_authentic_comments_ratio": "15%",
            },
            "authenticity_level": "높음",
        },
        "evaluation": {
            "engagement": 7.0,
            "activity": 6.5,
            "communication": 8.0,
            "growth_potential": 7.5,
            "overall_score": overall,
        },
        "content_analysis": { "inference_confidence": 0.8 },
        "commerce_orientation_analysis": {
            "monetization_intent_level": 6,
            "content_fit_for_selling_score": 7,
            "bragging_orientation_level": 3,
            "selling_effort_signals": ["공구 링크", "할인 코드"],
            "bragging_signals": ["명품 인증"],
            "creator_archetype": "정보형 셀러",
            "primary_motivation": "수익화",
            "interpretation": "제품 추천 위주의 콘텐츠",
        },
    }))
}

/// Create a snapshot database at `path` seeded with `rows`
///
/// JSON sub-documents are stored as TEXT, the way the snapshot keeps them.
pub fn seed_snapshot(path: &Path, rows: &[Row]) -> anyhow::Result<()> {
    let conn = Connection::open(path)?;
    setup_snapshot_schema(&conn)?;
    for r in rows {
        let text = |key: &str| -> Option<String> {
            r.get(key).and_then(|v| match v {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            })
        };
        let int = |key: &str| r.get(key).and_then(Value::as_i64);
        conn.execute(
            "INSERT INTO ai_influencer_analyses (
                id, platform, followers, followings, posts_count, category, tags,
                follow_network_analysis, comment_authenticity_analysis, content_analysis,
                evaluation, commerce_orientation_analysis, recommendation, analyzed_at,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)",
            rusqlite::params![
                text("id"),
                text("platform"),
                int("followers"),
                int("followings"),
                int("posts_count"),
                text("category"),
                text("tags"),
                text("follow_network_analysis"),
                text("comment_authenticity_analysis"),
                text("content_analysis"),
                text("evaluation"),
                text("commerce_orientation_analysis"),
                text("recommendation"),
                text("analyzed_at"),
                text("created_at"),
            ],
        )?;
    }
    Ok(())
}
