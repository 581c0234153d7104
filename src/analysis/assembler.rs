//! Per-dimension fetch-and-aggregate orchestration
//!
//! [`ReportAssembler`] fetches each requested dimension's projection once,
//! decodes the rows and runs the dimension's analyser. Dimensions are
//! computed sequentially and in isolation: a failed fetch or an empty
//! result marks that dimension unavailable and the others still run.

use crate::analysis::cache::{CacheKey, ReportCache};
use crate::analysis::dimensions::{analyse_dimension, Dimension, DimensionReport};
use crate::errors::AppResult;
use crate::fetch::{FetchRequest, PagedFetcher};
use crate::source::{Filter, TableSource};
use crate::types::record::AnalysisRecord;
use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Reason reported for dimensions with nothing to aggregate
pub const NO_DATA: &str = "no data";

/// Outcome of one dimension
#[derive(Debug, Clone, PartialEq)]
pub enum DimensionOutcome {
    Available(DimensionReport),
    Unavailable { reason: String },
}

impl DimensionOutcome {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        DimensionOutcome::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, DimensionOutcome::Available(_))
    }

    pub fn report(&self) -> Option<&DimensionReport> {
        match self {
            DimensionOutcome::Available(report) => Some(report),
            DimensionOutcome::Unavailable { .. } => None,
        }
    }

    /// `{"status": "available", ...report}` or `{"status": "unavailable", "reason": ...}`
    pub fn to_json(&self) -> AppResult<Value> {
        match self {
            DimensionOutcome::Available(report) => {
                let mut body = match serde_json::to_value(report)? {
                    Value::Object(map) => map,
                    other => {
                        let mut map = Map::new();
                        map.insert("result".to_string(), other);
                        map
                    }
                };
                body.insert("status".to_string(), json!("available"));
                Ok(Value::Object(body))
            }
            DimensionOutcome::Unavailable { reason } => Ok(json!({
                "status": "unavailable",
                "reason": reason,
            })),
        }
    }
}

/// Dimension-keyed results of one assembly pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportAggregate {
    pub dimensions: BTreeMap<Dimension, DimensionOutcome>,
}

impl ReportAggregate {
    pub fn get(&self, dimension: Dimension) -> Option<&DimensionOutcome> {
        self.dimensions.get(&dimension)
    }

    pub fn available_count(&self) -> usize {
        self.dimensions.values().filter(|o| o.is_available()).count()
    }

    /// Plain JSON object keyed by dimension name
    pub fn to_json(&self) -> AppResult<Value> {
        let mut out = Map::new();
        for (dimension, outcome) in &self.dimensions {
            out.insert(dimension.as_str().to_string(), outcome.to_json()?);
        }
        Ok(Value::Object(out))
    }
}

/// Fetches, decodes and aggregates report dimensions
pub struct ReportAssembler<S> {
    fetcher: PagedFetcher<S>,
    table: String,
    filters: Vec<Filter>,
    reference_time: Option<DateTime<Utc>>,
}

impl<S: TableSource> ReportAssembler<S> {
    pub fn new(fetcher: PagedFetcher<S>, table: impl Into<String>) -> Self {
        Self {
            fetcher,
            table: table.into(),
            filters: Vec::new(),
            reference_time: None,
        }
    }

    /// Restrict every dimension to rows matching `filters`
    pub fn with_filters(mut self, filters: Vec<Filter>) -> Self {
        self.filters = filters;
        self
    }

    /// Fix the "now" used by recency windows (defaults to the wall clock)
    pub fn with_reference_time(mut self, reference_time: DateTime<Utc>) -> Self {
        self.reference_time = Some(reference_time);
        self
    }

    pub fn fetcher(&self) -> &PagedFetcher<S> {
        &self.fetcher
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Compute one dimension; never fails, failures become `Unavailable`
    pub async fn assemble_dimension(&self, dimension: Dimension) -> DimensionOutcome {
        let request =
            FetchRequest::new(self.table.clone(), dimension.columns().iter().copied())
                .with_filters(&self.filters);

        let rows = match self.fetcher.fetch_all(&request).await {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Dimension {} unavailable: {}", dimension, e);
                return DimensionOutcome::unavailable(e.to_string());
            }
        };
        if rows.is_empty() {
            debug!("Dimension {} has no rows", dimension);
            return DimensionOutcome::unavailable(NO_DATA);
        }

        let records: Vec<AnalysisRecord> = rows.iter().map(AnalysisRecord::from_row).collect();
        let reference = self.reference_time.unwrap_or_else(Utc::now);
        match analyse_dimension(dimension, &records, reference) {
            Some(report) => {
                debug!("Dimension {} aggregated {} records", dimension, records.len());
                DimensionOutcome::Available(report)
            }
            None => {
                debug!("Dimension {} has no usable observations", dimension);
                DimensionOutcome::unavailable(NO_DATA)
            }
        }
    }

    /// Compute each requested dimension once, in dimension order
    pub async fn assemble(&self, dimensions: &[Dimension]) -> ReportAggregate {
        let mut aggregate = ReportAggregate::default();
        for dimension in unique(dimensions) {
            let outcome = self.assemble_dimension(dimension).await;
            aggregate.dimensions.insert(dimension, outcome);
        }
        info!(
            "Assembled {} dimensions ({} available)",
            aggregate.dimensions.len(),
            aggregate.available_count()
        );
        aggregate
    }

    /// Like [`assemble`](Self::assemble), memoising available outcomes in `cache`
    ///
    /// Unavailable outcomes are not cached so a transient failure is retried
    /// on the next call.
    pub async fn assemble_cached(
        &self,
        dimensions: &[Dimension],
        cache: &ReportCache,
    ) -> ReportAggregate {
        let mut aggregate = ReportAggregate::default();
        for dimension in unique(dimensions) {
            let key = CacheKey::new(dimension, &self.table, &self.filters);
            let outcome = match cache.get(&key) {
                Some(outcome) => outcome,
                None => {
                    let outcome = self.assemble_dimension(dimension).await;
                    if outcome.is_available() {
                        cache.put(key, outcome.clone());
                    }
                    outcome
                }
            };
            aggregate.dimensions.insert(dimension, outcome);
        }
        aggregate
    }
}

fn unique(dimensions: &[Dimension]) -> Vec<Dimension> {
    let mut sorted = dimensions.to_vec();
    sorted.sort();
    sorted.dedup();
    sorted
}
