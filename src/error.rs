use thiserror::Error;

#[cfg(feature = "mysql")]
use mysql_async;
#[cfg(feature = "sqlite")]
use rusqlite;

#[derive(Debug, Error)]
pub enum DataAccessError {
    #[cfg(feature = "sqlite")]
    #[error(transparent)]
    SqliteError(#[from] rusqlite::Error),

    #[cfg(feature = "mysql")]
    #[error(transparent)]
    MysqlError(#[from] mysql_async::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Parameter binding error: {0}")]
    ParameterError(String),

    #[error("SQL execution error: {0}")]
    ExecutionError(String),

    /// A table, column, ORDER BY list or operator that cannot be spliced into SQL text.
    #[error("Invalid SQL identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Batch insert needs at least one record")]
    EmptyBatch,

    #[error("Batch record {index} has fields [{found}], expected [{expected}]")]
    BatchShapeMismatch {
        index: usize,
        expected: String,
        found: String,
    },

    #[error("Debug trace output failed: {0}")]
    TraceError(#[from] std::io::Error),

    #[error("Unimplemented feature: {0}")]
    Unimplemented(String),
}
