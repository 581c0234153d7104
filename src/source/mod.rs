//! Upstream table source contract
//!
//! The statistics pipeline only ever reads. It needs a query builder that can
//! project columns, filter by equality/range, order, and cut an
//! offset/limit window, executed as one call that returns
//! `{data: [...], count: int|null}`. That shape is [`TableQuery`] /
//! [`QueryResponse`]; transports implement [`TableSource`]:
//!
//! - **rest** - PostgREST-style HTTP endpoint (hosted database service)
//! - **sqlite** - local snapshot of the analyses table

pub mod rest;
pub mod sqlite;

pub use rest::RestTableSource;
pub use sqlite::SqliteTableSource;

use crate::errors::SourceResult;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// One raw row as returned by the source
pub type Row = Map<String, Value>;

/// Comparison operator for a column filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl FilterOp {
    /// PostgREST operator token
    pub fn as_rest(&self) -> &'static str {
        match self {
            FilterOp::Eq => "eq",
            FilterOp::Neq => "neq",
            FilterOp::Gt => "gt",
            FilterOp::Gte => "gte",
            FilterOp::Lt => "lt",
            FilterOp::Lte => "lte",
        }
    }

    /// SQL operator token
    pub fn as_sql(&self) -> &'static str {
        match self {
            FilterOp::Eq => "=",
            FilterOp::Neq => "<>",
            FilterOp::Gt => ">",
            FilterOp::Gte => ">=",
            FilterOp::Lt => "<",
            FilterOp::Lte => "<=",
        }
    }
}

/// Column predicate against a scalar JSON value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub column: String,
    pub op: FilterOp,
    pub value: Value,
}

impl Filter {
    pub fn new(column: impl Into<String>, op: FilterOp, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, FilterOp::Eq, value)
    }

    pub fn gte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, FilterOp::Gte, value)
    }

    pub fn lte(column: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(column, FilterOp::Lte, value)
    }

    /// Filter value rendered without JSON quoting
    pub fn value_text(&self) -> String {
        match &self.value {
            Value::String(s) => s.clone(),
            Value::Null => "null".to_string(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.column, self.op.as_rest(), self.value_text())
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Asc,
    Desc,
}

/// Order clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub column: String,
    pub direction: Direction,
}

/// A single read query against one table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableQuery {
    pub table: String,
    pub columns: Vec<String>,
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
    /// Inclusive row window `(offset, end)`
    pub range: Option<(usize, usize)>,
    pub count_exact: bool,
}

impl TableQuery {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: Vec::new(),
            filters: Vec::new(),
            order: None,
            range: None,
            count_exact: false,
        }
    }

    pub fn select<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn filters(mut self, filters: &[Filter]) -> Self {
        self.filters.extend_from_slice(filters);
        self
    }

    pub fn eq(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter(Filter::eq(column, value))
    }

    pub fn order(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.order = Some(Order {
            column: column.into(),
            direction,
        });
        self
    }

    /// Inclusive window, matching the query-builder `range(from, to)` call
    pub fn range(mut self, offset: usize, end: usize) -> Self {
        self.range = Some((offset, end));
        self
    }

    pub fn count_exact(mut self) -> Self {
        self.count_exact = true;
        self
    }

    /// Projection rendered as a comma list (`*` when empty)
    pub fn projection(&self) -> String {
        if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns.join(",")
        }
    }
}

/// Result of executing a [`TableQuery`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub data: Vec<Row>,
    pub count: Option<u64>,
}

/// A paged row source
///
/// Implementations must honour `range` as an inclusive window and return
/// fewer rows than requested only on the last page.
#[allow(async_fn_in_trait)]
pub trait TableSource {
    async fn execute(&self, query: &TableQuery) -> SourceResult<QueryResponse>;
}

impl<T: TableSource + ?Sized> TableSource for &T {
    async fn execute(&self, query: &TableQuery) -> SourceResult<QueryResponse> {
        (**self).execute(query).await
    }
}

/// Validate a table/column identifier before it is spliced into a query
pub(crate) fn is_valid_identifier(ident: &str) -> bool {
    !ident.is_empty()
        && ident.len() <= 63
        && ident
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !ident.starts_with(|c: char| c.is_ascii_digit())
}
