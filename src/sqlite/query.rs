use std::sync::Arc;

use rusqlite::types::Value;
use rusqlite::{Connection, Rows, params_from_iter};

use crate::error::DataAccessError;
use crate::executor::ExecOutcome;
use crate::params::BoundParams;
use crate::results::ResultSet;
use crate::types::RowValue;

use super::params::{bind_named, convert_positional};

/// Extract a `RowValue` from a `SQLite` row.
///
/// # Errors
///
/// Returns `DataAccessError` if the value cannot be read.
pub fn sqlite_extract_value_sync(
    row: &rusqlite::Row,
    idx: usize,
) -> Result<RowValue, DataAccessError> {
    let value: Value = row.get(idx)?;
    Ok(match value {
        Value::Null => RowValue::Null,
        Value::Integer(i) => RowValue::Int(i),
        Value::Real(f) => RowValue::Float(f),
        Value::Text(s) => RowValue::Text(s),
        Value::Blob(b) => RowValue::Blob(b),
    })
}

/// Drain `rows` into a result set with the given column names.
///
/// # Errors
/// Returns `DataAccessError` if stepping the statement or reading a value fails.
pub fn build_result_set(
    mut rows: Rows<'_>,
    column_names: Vec<String>,
) -> Result<ResultSet, DataAccessError> {
    let col_count = column_names.len();
    let mut result_set = ResultSet::with_capacity(10);
    result_set.set_column_names(Arc::new(column_names));

    while let Some(row) = rows.next()? {
        let mut row_values = Vec::with_capacity(col_count);
        for i in 0..col_count {
            row_values.push(sqlite_extract_value_sync(row, i)?);
        }
        result_set.add_row_values(row_values);
    }

    Ok(result_set)
}

/// Prepare, bind and run a query, fetching every row.
///
/// # Errors
/// Returns `DataAccessError` if preparing, binding or stepping fails.
pub fn select(
    conn: &Connection,
    sql: &str,
    params: &BoundParams,
) -> Result<ResultSet, DataAccessError> {
    let mut stmt = conn.prepare(sql)?;
    let column_names: Vec<String> = stmt
        .column_names()
        .iter()
        .map(std::string::ToString::to_string)
        .collect();

    let rows = match params {
        BoundParams::Positional(values) => {
            stmt.query(params_from_iter(convert_positional(values)?))?
        }
        BoundParams::Named(map) => {
            bind_named(&mut stmt, map)?;
            stmt.raw_query()
        }
    };
    build_result_set(rows, column_names)
}

/// Prepare, bind and run a statement that returns no rows.
///
/// # Errors
/// Returns `DataAccessError` if preparing, binding or executing fails.
pub fn execute(
    conn: &Connection,
    sql: &str,
    params: &BoundParams,
) -> Result<ExecOutcome, DataAccessError> {
    let mut stmt = conn.prepare(sql)?;
    let affected = match params {
        BoundParams::Positional(values) => {
            stmt.execute(params_from_iter(convert_positional(values)?))?
        }
        BoundParams::Named(map) => {
            bind_named(&mut stmt, map)?;
            stmt.raw_execute()?
        }
    };
    Ok(ExecOutcome {
        rows_affected: affected as u64,
        last_insert_id: Some(conn.last_insert_rowid()),
    })
}
