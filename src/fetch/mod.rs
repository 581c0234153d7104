//! Paged fetching of full result sets
//!
//! [`PagedFetcher`] walks a table in fixed-size inclusive windows
//! `[offset, offset + page_size - 1]` until a short or empty page comes back,
//! retrying each page on transient source failures with exponential backoff.

pub mod retry;

pub use retry::{backoff_schedule, calculate_next_backoff};

use crate::errors::{SourceError, SourceResult};
use crate::source::{Filter, Order, Row, TableQuery, TableSource};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

/// Default rows per page
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// Pagination and retry policy
#[derive(Debug, Clone, PartialEq)]
pub struct FetchPolicy {
    pub page_size: usize,
    /// Total attempts per request, including the first
    pub max_attempts: usize,
    pub initial_backoff: Duration,
    pub backoff_multiplier: f64,
    pub max_backoff_seconds: u64,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_attempts: 3,
            initial_backoff: Duration::from_secs(1),
            backoff_multiplier: 2.0,
            max_backoff_seconds: 30,
        }
    }
}

/// What to fetch: table, projection, predicates
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub table: String,
    pub columns: Vec<String>,
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
}

impl FetchRequest {
    pub fn new<I, S>(table: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            table: table.into(),
            columns: columns.into_iter().map(Into::into).collect(),
            filters: Vec::new(),
            order: None,
        }
    }

    pub fn with_filters(mut self, filters: &[Filter]) -> Self {
        self.filters.extend_from_slice(filters);
        self
    }

    fn page_query(&self, offset: usize, page_size: usize) -> TableQuery {
        let mut query = TableQuery::new(self.table.clone())
            .select(self.columns.iter().cloned())
            .filters(&self.filters)
            .range(offset, offset + page_size - 1);
        query.order = self.order.clone();
        query
    }
}

/// Fetches every row matching a request, one page at a time
pub struct PagedFetcher<S> {
    source: S,
    policy: FetchPolicy,
}

impl<S: TableSource> PagedFetcher<S> {
    pub fn new(source: S, policy: FetchPolicy) -> Self {
        Self { source, policy }
    }

    pub fn with_default_policy(source: S) -> Self {
        Self::new(source, FetchPolicy::default())
    }

    pub fn policy(&self) -> &FetchPolicy {
        &self.policy
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch the full row set in page order
    ///
    /// Stops on the first page shorter than `page_size` (an empty page
    /// included). No de-duplication is performed. A page that still fails
    /// after the retry budget aborts the whole call; rows already collected
    /// are discarded, so callers never aggregate a silently truncated set.
    pub async fn fetch_all(&self, request: &FetchRequest) -> SourceResult<Vec<Row>> {
        let page_size = self.policy.page_size.max(1);
        let mut rows = Vec::new();
        let mut offset = 0usize;
        let mut pages = 0usize;

        loop {
            let query = request.page_query(offset, page_size);
            let operation = format!(
                "select {} [{}..={}]",
                request.table,
                offset,
                offset + page_size - 1
            );

            let page = match self.execute_with_retry(&query, &operation).await {
                Ok(response) => response.data,
                Err(e) => {
                    if !rows.is_empty() {
                        warn!(
                            "Discarding {} rows from {} after page failure at offset {}",
                            rows.len(),
                            request.table,
                            offset
                        );
                    }
                    return Err(e);
                }
            };

            pages += 1;
            let fetched = page.len();
            rows.extend(page);
            debug!(
                "Fetched page {} of {} ({} rows, offset {})",
                pages, request.table, fetched, offset
            );

            if fetched < page_size {
                break;
            }
            offset += page_size;
        }

        info!(
            "Fetched {} rows from {} in {} pages",
            rows.len(),
            request.table,
            pages
        );
        Ok(rows)
    }

    /// Exact row count for a table and filter set
    pub async fn count(&self, table: &str, filters: &[Filter]) -> SourceResult<u64> {
        let query = TableQuery::new(table)
            .select(["id"])
            .filters(filters)
            .range(0, 0)
            .count_exact();
        let response = self
            .execute_with_retry(&query, &format!("count {}", table))
            .await?;
        response.count.ok_or_else(|| {
            SourceError::InvalidResponse(format!("{} returned no exact count", table))
        })
    }

    async fn execute_with_retry(
        &self,
        query: &TableQuery,
        operation: &str,
    ) -> SourceResult<crate::source::QueryResponse> {
        let mut delays = backoff_schedule(
            self.policy.max_attempts.max(1),
            self.policy.initial_backoff,
            self.policy.backoff_multiplier,
            self.policy.max_backoff_seconds,
        )
        .into_iter();
        let mut attempts = 0usize;

        loop {
            attempts += 1;
            match self.source.execute(query).await {
                Ok(response) => {
                    if attempts > 1 {
                        debug!("{} succeeded after {} attempts", operation, attempts);
                    }
                    return Ok(response);
                }
                Err(e) if e.is_transient() => match delays.next() {
                    Some(delay) => {
                        warn!(
                            "Attempt {} failed for {}, retrying in {:?}: {}",
                            attempts, operation, delay, e
                        );
                        sleep(delay).await;
                    }
                    None => {
                        error!(
                            "{} failed after {} attempts: {}",
                            operation, attempts, e
                        );
                        return Err(SourceError::MaxRetriesExceeded {
                            operation: operation.to_string(),
                            attempts,
                            last_error: e.to_string(),
                        });
                    }
                },
                Err(e) => {
                    error!("{} failed (not retried): {}", operation, e);
                    return Err(e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_window() {
        let request = FetchRequest::new("ai_influencer_analyses", ["followers"])
            .with_filters(&[Filter::eq("platform", "instagram")]);
        let query = request.page_query(2000, 1000);
        assert_eq!(query.range, Some((2000, 2999)));
        assert_eq!(query.columns, vec!["followers".to_string()]);
        assert_eq!(query.filters.len(), 1);
    }

    #[test]
    fn test_default_policy() {
        let policy = FetchPolicy::default();
        assert_eq!(policy.page_size, 1000);
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.initial_backoff, Duration::from_secs(1));
    }
}
