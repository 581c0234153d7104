//! PostgREST-style HTTP table source
//!
//! Renders a [`TableQuery`] as `GET {url}/rest/v1/{table}?select=..` with
//! operator-prefixed filters, an `order` parameter and a `Range` header, and
//! reads the total from `Content-Range` when an exact count is requested.

use super::{is_valid_identifier, Direction, QueryResponse, Row, TableQuery, TableSource};
use crate::config::SourceConfig;
use crate::errors::{SourceError, SourceResult};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_RANGE, RANGE};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// HTTP client for the hosted analyses table
pub struct RestTableSource {
    client: Client,
    base_url: String,
    api_key: String,
    timeout_seconds: u64,
}

impl RestTableSource {
    /// Build a client from source configuration
    pub fn new(config: &SourceConfig) -> SourceResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                SourceError::ConnectionFailed(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            timeout_seconds: config.timeout_seconds,
        })
    }

    fn endpoint(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn headers(&self, query: &TableQuery) -> SourceResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        if !self.api_key.is_empty() {
            headers.insert("apikey", header_value(&self.api_key)?);
            headers.insert(
                AUTHORIZATION,
                header_value(&format!("Bearer {}", self.api_key))?,
            );
        }
        if let Some((offset, end)) = query.range {
            headers.insert("Range-Unit", HeaderValue::from_static("items"));
            headers.insert(RANGE, header_value(&format!("{}-{}", offset, end))?);
        }
        if query.count_exact {
            headers.insert("Prefer", HeaderValue::from_static("count=exact"));
        }
        Ok(headers)
    }

    fn map_transport_error(&self, table: &str, err: reqwest::Error) -> SourceError {
        if err.is_timeout() {
            SourceError::Timeout {
                timeout_seconds: self.timeout_seconds,
                operation: format!("select {}", table),
            }
        } else if err.is_connect() || err.is_request() {
            SourceError::ConnectionFailed(err.to_string())
        } else {
            SourceError::InvalidResponse(err.to_string())
        }
    }
}

impl TableSource for RestTableSource {
    async fn execute(&self, query: &TableQuery) -> SourceResult<QueryResponse> {
        let params = render_params(query)?;
        let headers = self.headers(query)?;

        debug!(
            "GET {} params={:?} range={:?}",
            self.endpoint(&query.table),
            params,
            query.range
        );

        let response = self
            .client
            .get(self.endpoint(&query.table))
            .headers(headers)
            .query(&params)
            .send()
            .await
            .map_err(|e| self.map_transport_error(&query.table, e))?;

        let status = response.status();
        let content_range = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response
            .text()
            .await
            .map_err(|e| self.map_transport_error(&query.table, e))?;

        check_status(&query.table, status, &body)?;

        let data = parse_rows(&body)?;
        let count = if query.count_exact {
            content_range.as_deref().and_then(parse_content_range_total)
        } else {
            None
        };

        Ok(QueryResponse { data, count })
    }
}

fn header_value(value: &str) -> SourceResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| SourceError::InvalidQuery(format!("Invalid header value: {}", e)))
}

/// Query-string parameters for a [`TableQuery`]
pub(crate) fn render_params(query: &TableQuery) -> SourceResult<Vec<(String, String)>> {
    if !is_valid_identifier(&query.table) {
        return Err(SourceError::InvalidQuery(format!(
            "invalid table name: {}",
            query.table
        )));
    }
    for column in &query.columns {
        if !is_valid_identifier(column) {
            return Err(SourceError::InvalidQuery(format!(
                "invalid column name: {}",
                column
            )));
        }
    }

    let mut params = vec![("select".to_string(), query.projection())];

    for filter in &query.filters {
        if !is_valid_identifier(&filter.column) {
            return Err(SourceError::InvalidQuery(format!(
                "invalid filter column: {}",
                filter.column
            )));
        }
        params.push((
            filter.column.clone(),
            format!("{}.{}", filter.op.as_rest(), filter.value_text()),
        ));
    }

    if let Some(order) = &query.order {
        if !is_valid_identifier(&order.column) {
            return Err(SourceError::InvalidQuery(format!(
                "invalid order column: {}",
                order.column
            )));
        }
        let dir = match order.direction {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        };
        params.push(("order".to_string(), format!("{}.{}", order.column, dir)));
    }

    Ok(params)
}

/// Map an HTTP status onto the source error taxonomy
pub(crate) fn check_status(table: &str, status: StatusCode, body: &str) -> SourceResult<()> {
    if status.is_success() {
        return Ok(());
    }
    let message: String = body.chars().take(300).collect();
    if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
        Err(SourceError::ServerError {
            status: status.as_u16(),
            message,
        })
    } else {
        Err(SourceError::RequestFailed {
            table: table.to_string(),
            status: status.as_u16(),
            message,
        })
    }
}

/// Decode a JSON array of objects; non-object entries are rejected
pub(crate) fn parse_rows(body: &str) -> SourceResult<Vec<Row>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let value: Value = serde_json::from_str(body)
        .map_err(|e| SourceError::InvalidResponse(format!("Response is not JSON: {}", e)))?;

    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(row) => Ok(row),
                other => Err(SourceError::InvalidResponse(format!(
                    "Expected row object, got {}",
                    other
                ))),
            })
            .collect(),
        other => Err(SourceError::InvalidResponse(format!(
            "Expected array of rows, got {}",
            other
        ))),
    }
}

/// Total from a `Content-Range` header (`0-999/5000`, `*/0`); `*` total is unknown
pub(crate) fn parse_content_range_total(header: &str) -> Option<u64> {
    header.rsplit('/').next()?.trim().parse().ok()
}
