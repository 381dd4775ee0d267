use async_trait::async_trait;
use mysql_async::prelude::Queryable;
use mysql_async::{Conn, Opts, Row};
use tracing::debug;

use crate::error::DataAccessError;
use crate::executor::{ExecOutcome, QueryExecutor};
use crate::params::BoundParams;
use crate::results::ResultSet;
use crate::types::Dialect;

use super::params::convert_params;
use super::query::build_result_set;

/// One MySQL/MariaDB connection. Each call prepares its statement afresh.
#[derive(Debug)]
pub struct MysqlExecutor {
    conn: Conn,
}

impl MysqlExecutor {
    /// # Errors
    /// Returns `DataAccessError::ConnectionError` if the server cannot be reached or
    /// rejects the credentials.
    pub async fn connect(opts: Opts) -> Result<Self, DataAccessError> {
        let conn = Conn::new(opts)
            .await
            .map_err(|e| DataAccessError::ConnectionError(format!("Failed to connect to MySQL: {e}")))?;
        Ok(Self { conn })
    }

    #[must_use]
    pub fn from_conn(conn: Conn) -> Self {
        Self { conn }
    }

    /// Close the connection gracefully.
    ///
    /// # Errors
    /// Returns the driver's error if the disconnect handshake fails.
    pub async fn disconnect(self) -> Result<(), DataAccessError> {
        self.conn.disconnect().await?;
        Ok(())
    }
}

#[async_trait]
impl QueryExecutor for MysqlExecutor {
    fn dialect(&self) -> Dialect {
        Dialect::Standard
    }

    async fn fetch_all(
        &mut self,
        sql: &str,
        params: &BoundParams,
    ) -> Result<ResultSet, DataAccessError> {
        debug!(dialect = "mysql", sql, params = params.len(), "fetch_all");
        let driver_params = convert_params(params)?;
        let stmt = self.conn.prep(sql).await?;
        let rows: Vec<Row> = self.conn.exec(&stmt, driver_params).await?;
        Ok(build_result_set(stmt.columns(), rows))
    }

    async fn execute(
        &mut self,
        sql: &str,
        params: &BoundParams,
    ) -> Result<ExecOutcome, DataAccessError> {
        debug!(dialect = "mysql", sql, params = params.len(), "execute");
        let driver_params = convert_params(params)?;
        let stmt = self.conn.prep(sql).await?;
        self.conn.exec_drop(&stmt, driver_params).await?;
        Ok(ExecOutcome {
            rows_affected: self.conn.affected_rows(),
            last_insert_id: self.conn.last_insert_id().and_then(|id| i64::try_from(id).ok()),
        })
    }
}
