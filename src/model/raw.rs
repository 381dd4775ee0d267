use tracing::warn;

use crate::error::DataAccessError;
use crate::executor::QueryExecutor;
use crate::params::BoundParams;
use crate::query_builder::QueryAndParams;
use crate::results::{FetchedRows, ReturnMode};
use crate::types::Environment;

use super::{Caveat, Model};

/// What [`Model::raw_exec`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawExec {
    Executed,
    /// Not in the `dev` environment; nothing was sent to the database.
    Disabled,
}

impl<E: QueryExecutor> Model<E> {
    /// Run caller-written SQL with no parameters.
    ///
    /// **Unsafe by construction**: `sql` reaches the database verbatim, so it must never
    /// contain text from untrusted input. Prefer [`Model::query_bind`].
    ///
    /// # Errors
    /// Returns the driver's error.
    pub async fn raw_query(
        &mut self,
        sql: &str,
        mode: ReturnMode,
    ) -> Result<FetchedRows, DataAccessError> {
        let query = QueryAndParams::new_without_params(sql);
        let result_set = self.fetch(&query, Caveat::Omit).await?;
        Ok(FetchedRows::from_result_set(result_set, mode))
    }

    /// Run caller-written SQL with bound parameters (`:name` for named sets, `?` for
    /// positional ones).
    ///
    /// # Errors
    /// Returns `DataAccessError::ParameterError` for unbindable values or mismatched
    /// placeholders, or the driver's error.
    pub async fn query_bind(
        &mut self,
        sql: &str,
        params: impl Into<BoundParams>,
        mode: ReturnMode,
    ) -> Result<FetchedRows, DataAccessError> {
        let query = QueryAndParams::new(sql, params.into());
        let result_set = self.fetch(&query, Caveat::Attach).await?;
        Ok(FetchedRows::from_result_set(result_set, mode))
    }

    /// Execute arbitrary SQL (typically DDL for table setup), only in the `dev`
    /// environment. Elsewhere this is a logged no-op.
    ///
    /// # Errors
    /// Returns the driver's error when the statement runs and fails.
    pub async fn raw_exec(&mut self, sql: &str) -> Result<RawExec, DataAccessError> {
        if self.environment() != Environment::Dev {
            warn!("raw_exec disabled, since not in 'dev' mode");
            return Ok(RawExec::Disabled);
        }
        let query = QueryAndParams::new_without_params(sql);
        self.executor_mut().execute(&query.query, &query.params).await?;
        Ok(RawExec::Executed)
    }
}
