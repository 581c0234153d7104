use thiserror::Error;

/// Application-wide error type - single point of truth
#[derive(Error, Debug)]
pub enum AppError {
    /// Snapshot database operations
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Upstream table source operations
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// File I/O operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration issues
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation/parsing
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Unknown report dimension name
    #[error("Unknown report dimension: {0}")]
    UnknownDimension(String),
}

/// Upstream table source error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    /// Connection could not be established or was dropped mid-request
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Server answered with a 5xx or 429 status
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Server rejected the query (4xx other than 429)
    #[error("Request failed for {table} ({status}): {message}")]
    RequestFailed {
        table: String,
        status: u16,
        message: String,
    },

    /// Query could not be rendered (bad identifier, empty projection, ...)
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Source returned unexpected or malformed response data
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Request timed out
    #[error("Request timeout: {timeout_seconds}s for {operation}")]
    Timeout {
        timeout_seconds: u64,
        operation: String,
    },

    /// Retry budget exhausted on a transient failure
    #[error("Max retries exceeded: {operation} after {attempts} attempts ({last_error})")]
    MaxRetriesExceeded {
        operation: String,
        attempts: usize,
        last_error: String,
    },
}

impl SourceError {
    /// Whether the failure is worth retrying (network/server-disconnect class)
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            SourceError::ConnectionFailed(_)
                | SourceError::ServerError { .. }
                | SourceError::Timeout { .. }
        )
    }
}

/// Application-wide result type - single point of truth
pub type AppResult<T> = Result<T, AppError>;

/// Result type for table source operations
pub type SourceResult<T> = Result<T, SourceError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidData(format!("JSON error: {}", err))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}
