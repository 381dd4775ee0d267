//! The seam between the facade and a live connection.

mod dispatch;

pub use dispatch::AnyExecutor;

use async_trait::async_trait;

use crate::error::DataAccessError;
use crate::params::BoundParams;
use crate::results::ResultSet;
use crate::types::Dialect;

/// What a non-query statement reports back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecOutcome {
    pub rows_affected: u64,
    /// Identifier generated by the last INSERT on this connection, if the driver has one.
    pub last_insert_id: Option<i64>,
}

/// Prepares, binds and runs one statement per call.
///
/// Named parameter sets bind by `:name` in insertion order; positional sets use the
/// driver's native `?` path. Implementations do not cache statements or retry.
#[async_trait]
pub trait QueryExecutor: Send {
    fn dialect(&self) -> Dialect;

    /// Run a query and fetch every row.
    ///
    /// # Errors
    /// Returns the driver's error if preparing, binding or executing fails.
    async fn fetch_all(
        &mut self,
        sql: &str,
        params: &BoundParams,
    ) -> Result<ResultSet, DataAccessError>;

    /// Run a statement that returns no rows.
    ///
    /// # Errors
    /// Returns the driver's error if preparing, binding or executing fails.
    async fn execute(
        &mut self,
        sql: &str,
        params: &BoundParams,
    ) -> Result<ExecOutcome, DataAccessError>;
}

#[async_trait]
impl<E: QueryExecutor + ?Sized> QueryExecutor for Box<E> {
    fn dialect(&self) -> Dialect {
        (**self).dialect()
    }

    async fn fetch_all(
        &mut self,
        sql: &str,
        params: &BoundParams,
    ) -> Result<ResultSet, DataAccessError> {
        (**self).fetch_all(sql, params).await
    }

    async fn execute(
        &mut self,
        sql: &str,
        params: &BoundParams,
    ) -> Result<ExecOutcome, DataAccessError> {
        (**self).execute(sql, params).await
    }
}
