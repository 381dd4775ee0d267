use serde_json::Value as JsonValue;

use crate::error::DataAccessError;
use crate::executor::QueryExecutor;
use crate::query_builder;
use crate::types::Fields;

use super::{Caveat, Model};

impl<E: QueryExecutor> Model<E> {
    /// Insert one row and return its generated id (0 when the driver reports none).
    ///
    /// # Errors
    /// Returns `DataAccessError::InvalidIdentifier` for unsafe names,
    /// `DataAccessError::ParameterError` for empty or unbindable fields, or the driver's
    /// error.
    pub async fn insert(
        &mut self,
        fields: &Fields,
        table: Option<&str>,
    ) -> Result<i64, DataAccessError> {
        let query = query_builder::insert(self.resolve_table(table), fields)?;
        let outcome = self.run(&query, Caveat::Attach).await?;
        Ok(outcome.last_insert_id.unwrap_or(0))
    }

    /// Update the row with the given id.
    ///
    /// # Errors
    /// Returns `DataAccessError::InvalidIdentifier` for unsafe names,
    /// `DataAccessError::ParameterError` for empty or unbindable fields, or the driver's
    /// error.
    pub async fn update(
        &mut self,
        id: impl Into<JsonValue>,
        fields: &Fields,
        table: Option<&str>,
    ) -> Result<(), DataAccessError> {
        let query = query_builder::update(self.resolve_table(table), id.into(), fields)?;
        self.run(&query, Caveat::Attach).await?;
        Ok(())
    }

    /// Delete the row with the given id.
    ///
    /// # Errors
    /// Returns `DataAccessError::InvalidIdentifier` for an unsafe table, or the driver's
    /// error.
    pub async fn delete(
        &mut self,
        id: impl Into<JsonValue>,
        table: Option<&str>,
    ) -> Result<(), DataAccessError> {
        let query = query_builder::delete(self.resolve_table(table), id.into())?;
        self.run(&query, Caveat::Attach).await?;
        Ok(())
    }

    /// Insert many rows with one statement and return the affected row count.
    ///
    /// The table is always explicit here. Never expose this to untrusted callers: field
    /// names become column names.
    ///
    /// # Errors
    /// Returns `DataAccessError::EmptyBatch` before touching the connection when
    /// `records` is empty, `DataAccessError::BatchShapeMismatch` when records disagree on
    /// their fields, or the driver's error.
    pub async fn insert_batch(
        &mut self,
        table: &str,
        records: &[Fields],
    ) -> Result<u64, DataAccessError> {
        let query = query_builder::batch_insert(table, records)?;
        let outcome = self.run(&query, Caveat::Attach).await?;
        Ok(outcome.rows_affected)
    }
}
