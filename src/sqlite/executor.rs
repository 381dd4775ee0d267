use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::DataAccessError;
use crate::executor::{ExecOutcome, QueryExecutor};
use crate::params::BoundParams;
use crate::results::ResultSet;
use crate::types::Dialect;

use super::query;

pub(crate) type SharedSqliteConnection = Arc<Mutex<rusqlite::Connection>>;

/// One `SQLite` connection driven from async code.
///
/// rusqlite is blocking, so every call runs on the blocking pool while holding the
/// connection lock.
pub struct SqliteExecutor {
    conn: SharedSqliteConnection,
}

impl SqliteExecutor {
    /// Open (or create) the database file at `path`; `:memory:` opens a private
    /// in-memory database.
    ///
    /// # Errors
    /// Returns `DataAccessError::ConnectionError` if the file cannot be opened.
    pub async fn open(path: &str) -> Result<Self, DataAccessError> {
        let path_owned = path.to_owned();
        let conn = tokio::task::spawn_blocking(move || rusqlite::Connection::open(path_owned))
            .await
            .map_err(|e| {
                DataAccessError::ConnectionError(format!("sqlite open join error: {e}"))
            })?
            .map_err(|e| {
                DataAccessError::ConnectionError(format!("Failed to open SQLite database {path}: {e}"))
            })?;
        Ok(Self::from_connection(conn))
    }

    /// # Errors
    /// Returns `DataAccessError::ConnectionError` if `SQLite` cannot allocate the database.
    pub fn open_in_memory() -> Result<Self, DataAccessError> {
        rusqlite::Connection::open_in_memory()
            .map(Self::from_connection)
            .map_err(|e| DataAccessError::ConnectionError(format!("Failed to open SQLite database: {e}")))
    }

    #[must_use]
    pub fn from_connection(conn: rusqlite::Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Run `func` against the raw connection, e.g. for schema setup.
    ///
    /// # Errors
    /// Returns whatever `func` returns, or `DataAccessError::ExecutionError` if the
    /// blocking task fails.
    pub async fn with_connection<F, R>(&self, func: F) -> Result<R, DataAccessError>
    where
        F: FnOnce(&mut rusqlite::Connection) -> Result<R, DataAccessError> + Send + 'static,
        R: Send + 'static,
    {
        run_blocking(Arc::clone(&self.conn), func).await
    }
}

impl fmt::Debug for SqliteExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteExecutor")
            .field("conn", &"<rusqlite::Connection>")
            .finish()
    }
}

pub(crate) async fn run_blocking<F, R>(
    conn: SharedSqliteConnection,
    func: F,
) -> Result<R, DataAccessError>
where
    F: FnOnce(&mut rusqlite::Connection) -> Result<R, DataAccessError> + Send + 'static,
    R: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut guard = conn.blocking_lock();
        func(&mut guard)
    })
    .await
    .map_err(|e| DataAccessError::ExecutionError(format!("sqlite spawn_blocking join error: {e}")))?
}

#[async_trait]
impl QueryExecutor for SqliteExecutor {
    fn dialect(&self) -> Dialect {
        Dialect::Embedded
    }

    async fn fetch_all(
        &mut self,
        sql: &str,
        params: &BoundParams,
    ) -> Result<ResultSet, DataAccessError> {
        debug!(dialect = "sqlite", sql, params = params.len(), "fetch_all");
        let sql_owned = sql.to_owned();
        let params_owned = params.clone();
        run_blocking(Arc::clone(&self.conn), move |conn| {
            query::select(conn, &sql_owned, &params_owned)
        })
        .await
    }

    async fn execute(
        &mut self,
        sql: &str,
        params: &BoundParams,
    ) -> Result<ExecOutcome, DataAccessError> {
        debug!(dialect = "sqlite", sql, params = params.len(), "execute");
        let sql_owned = sql.to_owned();
        let params_owned = params.clone();
        run_blocking(Arc::clone(&self.conn), move |conn| {
            query::execute(conn, &sql_owned, &params_owned)
        })
        .await
    }
}
