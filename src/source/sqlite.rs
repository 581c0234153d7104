//! SQLite snapshot table source
//!
//! Serves the same query shape from a local copy of the analyses table.
//! JSON sub-documents are stored as TEXT and come back as JSON strings, so
//! downstream normalisation treats them exactly like string-encoded columns
//! from the hosted service.

use super::{is_valid_identifier, Direction, QueryResponse, Row, TableQuery, TableSource};
use crate::errors::{AppResult, SourceError, SourceResult};
use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{params_from_iter, Connection};
use serde_json::{Number, Value};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};

/// Table source backed by a SQLite connection
pub struct SqliteTableSource {
    connection: Mutex<Connection>,
}

impl SqliteTableSource {
    /// Open a snapshot database file
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let connection = Connection::open(path.as_ref())?;
        info!("Snapshot database opened at: {}", path.as_ref().display());
        Ok(Self::from_connection(connection))
    }

    /// Wrap an existing connection (e.g. `:memory:` in tests)
    pub fn from_connection(connection: Connection) -> Self {
        Self {
            connection: Mutex::new(connection),
        }
    }

    fn run(&self, query: &TableQuery) -> SourceResult<QueryResponse> {
        let (where_sql, mut params) = render_where(query)?;
        let conn = self
            .connection
            .lock()
            .map_err(|_| SourceError::ConnectionFailed("snapshot lock poisoned".to_string()))?;

        let count = if query.count_exact {
            let sql = format!("SELECT COUNT(*) FROM {}{}", query.table, where_sql);
            let total: i64 = conn
                .query_row(&sql, params_from_iter(params.iter()), |row| row.get(0))
                .map_err(|e| sql_error(&query.table, e))?;
            Some(total.max(0) as u64)
        } else {
            None
        };

        let mut sql = format!(
            "SELECT {} FROM {}{}",
            query.projection(),
            query.table,
            where_sql
        );
        if let Some(order) = &query.order {
            if !is_valid_identifier(&order.column) {
                return Err(SourceError::InvalidQuery(format!(
                    "invalid order column: {}",
                    order.column
                )));
            }
            let dir = match order.direction {
                Direction::Asc => "ASC",
                Direction::Desc => "DESC",
            };
            sql.push_str(&format!(" ORDER BY {} {}", order.column, dir));
        } else {
            // Stable pagination windows
            sql.push_str(" ORDER BY rowid");
        }
        if let Some((offset, end)) = query.range {
            let limit = end.saturating_sub(offset) as i64 + 1;
            sql.push_str(" LIMIT ? OFFSET ?");
            params.push(SqlValue::Integer(if end < offset { 0 } else { limit }));
            params.push(SqlValue::Integer(offset as i64));
        }

        debug!("snapshot query: {}", sql);

        let mut stmt = conn.prepare(&sql).map_err(|e| sql_error(&query.table, e))?;
        let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let data = stmt
            .query_map(params_from_iter(params.iter()), |row| {
                let mut out = Row::new();
                for (idx, name) in names.iter().enumerate() {
                    out.insert(name.clone(), sql_to_json(row.get_ref(idx)?));
                }
                Ok(out)
            })
            .map_err(|e| sql_error(&query.table, e))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| sql_error(&query.table, e))?;

        Ok(QueryResponse { data, count })
    }
}

impl TableSource for SqliteTableSource {
    async fn execute(&self, query: &TableQuery) -> SourceResult<QueryResponse> {
        self.run(query)
    }
}

fn sql_error(table: &str, err: rusqlite::Error) -> SourceError {
    SourceError::RequestFailed {
        table: table.to_string(),
        status: 400,
        message: err.to_string(),
    }
}

/// WHERE clause and positional parameters for the query filters
fn render_where(query: &TableQuery) -> SourceResult<(String, Vec<SqlValue>)> {
    if !is_valid_identifier(&query.table) {
        return Err(SourceError::InvalidQuery(format!(
            "invalid table name: {}",
            query.table
        )));
    }
    if let Some(bad) = query.columns.iter().find(|c| !is_valid_identifier(c)) {
        return Err(SourceError::InvalidQuery(format!(
            "invalid column name: {}",
            bad
        )));
    }

    let mut clauses = Vec::with_capacity(query.filters.len());
    let mut params = Vec::with_capacity(query.filters.len());
    for filter in &query.filters {
        if !is_valid_identifier(&filter.column) {
            return Err(SourceError::InvalidQuery(format!(
                "invalid filter column: {}",
                filter.column
            )));
        }
        clauses.push(format!("{} {} ?", filter.column, filter.op.as_sql()));
        params.push(json_to_sql(&filter.value));
    }

    let where_sql = if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    };
    Ok((where_sql, params))
}

fn json_to_sql(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => SqlValue::Real(n.as_f64().unwrap_or(0.0)),
        },
        Value::String(s) => SqlValue::Text(s.clone()),
        other => SqlValue::Text(other.to_string()),
    }
}

fn sql_to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Number(i.into()),
        ValueRef::Real(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
        ValueRef::Blob(_) => Value::Null,
    }
}

/// Create the snapshot schema for the analyses table
pub fn setup_snapshot_schema(conn: &Connection) -> AppResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS ai_influencer_analyses (
            id TEXT PRIMARY KEY,
            influencer_id TEXT,
            platform TEXT,
            name TEXT,
            alias TEXT,
            followers INTEGER,
            followings INTEGER,
            posts_count INTEGER,
            category TEXT,
            tags TEXT,
            follow_network_analysis TEXT,
            comment_authenticity_analysis TEXT,
            content_analysis TEXT,
            evaluation TEXT,
            commerce_orientation_analysis TEXT,
            insights TEXT,
            summary TEXT,
            recommendation TEXT,
            analyzed_at TEXT,
            created_at TEXT
        );
        CREATE INDEX IF NOT EXISTS idx_analyses_platform ON ai_influencer_analyses(platform);
        CREATE INDEX IF NOT EXISTS idx_analyses_analyzed_at ON ai_influencer_analyses(analyzed_at);",
    )?;
    Ok(())
}
