use serde_json::Value as JsonValue;

use crate::error::DataAccessError;
use crate::executor::QueryExecutor;
use crate::query_builder;
use crate::results::{Record, ResultSet, ReturnMode};
use crate::types::RowValue;

use super::{Caveat, ListOptions, Model};

impl<E: QueryExecutor> Model<E> {
    /// Every row of a table, ordered and optionally paginated.
    ///
    /// # Errors
    /// Returns `DataAccessError::InvalidIdentifier` for an unsafe table or ORDER BY list,
    /// or the driver's error.
    pub async fn get(&mut self, options: &ListOptions) -> Result<Vec<Record>, DataAccessError> {
        let query = query_builder::select(
            self.resolve_table(options.table.as_deref()),
            options.order_by_or_default(),
            options.limit,
            options.offset,
        )?;
        Ok(self.fetch(&query, Caveat::Attach).await?.results)
    }

    /// Rows where `column <operator> value`; `LIKE` / `NOT LIKE` match anywhere in the
    /// column (`%value%`).
    ///
    /// # Errors
    /// Returns `DataAccessError::InvalidIdentifier` for an unsafe identifier or operator,
    /// or the driver's error.
    pub async fn get_where_custom(
        &mut self,
        column: &str,
        value: impl Into<JsonValue>,
        operator: &str,
        options: &ListOptions,
    ) -> Result<Vec<Record>, DataAccessError> {
        let query = query_builder::select_where(
            self.resolve_table(options.table.as_deref()),
            column,
            operator,
            value.into(),
            options.order_by_or_default(),
            options.limit,
            options.offset,
        )?;
        Ok(self.fetch(&query, Caveat::Attach).await?.results)
    }

    /// The row with the given id.
    ///
    /// # Errors
    /// Returns `DataAccessError::InvalidIdentifier` for an unsafe table, or the driver's
    /// error.
    pub async fn get_where(
        &mut self,
        id: impl Into<JsonValue>,
        table: Option<&str>,
    ) -> Result<Option<Record>, DataAccessError> {
        let query = query_builder::select_by_id(self.resolve_table(table), id.into())?;
        Ok(self.fetch(&query, Caveat::Attach).await?.into_first())
    }

    /// The first row where `column = value`.
    ///
    /// # Errors
    /// Returns `DataAccessError::InvalidIdentifier` for an unsafe identifier, or the
    /// driver's error.
    pub async fn get_one_where(
        &mut self,
        column: &str,
        value: impl Into<JsonValue>,
        table: Option<&str>,
    ) -> Result<Option<Record>, DataAccessError> {
        let query =
            query_builder::select_one_where(self.resolve_table(table), column, value.into())?;
        Ok(self.fetch(&query, Caveat::Attach).await?.into_first())
    }

    /// Every row where `column = value`.
    ///
    /// # Errors
    /// Returns `DataAccessError::InvalidIdentifier` for an unsafe identifier, or the
    /// driver's error.
    pub async fn get_many_where(
        &mut self,
        column: &str,
        value: impl Into<JsonValue>,
        table: Option<&str>,
    ) -> Result<Vec<Record>, DataAccessError> {
        let query =
            query_builder::select_one_where(self.resolve_table(table), column, value.into())?;
        let rows = self
            .query_bind(&query.query, query.params, ReturnMode::Object)
            .await?;
        Ok(rows.into_records().unwrap_or_default())
    }

    /// Number of rows in a table (`COUNT(id)`).
    ///
    /// # Errors
    /// Returns `DataAccessError::InvalidIdentifier` for an unsafe table, or the driver's
    /// error.
    pub async fn count(&mut self, table: Option<&str>) -> Result<i64, DataAccessError> {
        let query = query_builder::count(self.resolve_table(table))?;
        let result_set = self.fetch(&query, Caveat::Omit).await?;
        total(&result_set)
    }

    /// Number of rows [`Model::get_where_custom`] returns for the same arguments.
    ///
    /// This fetches the rows and counts them; it is not a `COUNT(*)` query.
    ///
    /// # Errors
    /// Same as [`Model::get_where_custom`].
    pub async fn count_where(
        &mut self,
        column: &str,
        value: impl Into<JsonValue>,
        operator: &str,
        options: &ListOptions,
    ) -> Result<usize, DataAccessError> {
        Ok(self
            .get_where_custom(column, value, operator, options)
            .await?
            .len())
    }

    /// Number of rows where `column = value` (`COUNT(id)`).
    ///
    /// # Errors
    /// Returns `DataAccessError::InvalidIdentifier` for an unsafe identifier, or the
    /// driver's error.
    pub async fn count_rows(
        &mut self,
        column: &str,
        value: impl Into<JsonValue>,
        table: Option<&str>,
    ) -> Result<i64, DataAccessError> {
        let query = query_builder::count_rows(self.resolve_table(table), column, value.into())?;
        let result_set = self.fetch(&query, Caveat::Omit).await?;
        total(&result_set)
    }

    /// Highest id in a table; `None` for an empty table.
    ///
    /// # Errors
    /// Returns `DataAccessError::InvalidIdentifier` for an unsafe table, or the driver's
    /// error.
    pub async fn get_max(&mut self, table: Option<&str>) -> Result<Option<RowValue>, DataAccessError> {
        let query = query_builder::max(self.resolve_table(table))?;
        let result_set = self.fetch(&query, Caveat::Omit).await?;
        Ok(result_set
            .into_first()
            .and_then(|row| row.get("max_id").cloned())
            .filter(|value| !value.is_null()))
    }
}

fn total(result_set: &ResultSet) -> Result<i64, DataAccessError> {
    result_set
        .results
        .first()
        .and_then(|row| row.get("total"))
        .and_then(RowValue::to_i64)
        .ok_or_else(|| DataAccessError::ExecutionError("count query returned no total".to_string()))
}
