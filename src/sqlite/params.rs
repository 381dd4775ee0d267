use rusqlite::Statement;
use rusqlite::types::Value;
use serde_json::Value as JsonValue;

use crate::error::DataAccessError;
use crate::types::{BindValue, Fields};

/// Convert a typed bind value to a rusqlite `Value`.
///
/// `SQLite` has no boolean storage class; booleans bind as 0/1 integers.
#[must_use]
pub fn bind_value_to_sqlite(value: BindValue) -> Value {
    match value {
        BindValue::Int(i) => Value::Integer(i),
        BindValue::Bool(b) => Value::Integer(i64::from(b)),
        BindValue::Null => Value::Null,
        BindValue::Text(s) => Value::Text(s),
    }
}

/// Type a positional sequence for rusqlite's native positional path.
///
/// # Errors
/// Returns `DataAccessError::ParameterError` for values that cannot be bound directly.
pub fn convert_positional(values: &[JsonValue]) -> Result<Vec<Value>, DataAccessError> {
    values
        .iter()
        .map(|v| BindValue::from_json(v).map(bind_value_to_sqlite))
        .collect()
}

/// Bind a named set one value at a time onto `:name` placeholders, in insertion order.
///
/// Every placeholder in the statement needs a value and every value needs a
/// placeholder; either mismatch is reported rather than silently binding NULL.
///
/// # Errors
/// Returns `DataAccessError::ParameterError` on a mismatch or an unbindable value.
pub fn bind_named(stmt: &mut Statement<'_>, params: &Fields) -> Result<(), DataAccessError> {
    for index in 1..=stmt.parameter_count() {
        let bound = stmt
            .parameter_name(index)
            .and_then(|name| name.strip_prefix(':'))
            .is_some_and(|name| params.contains_key(name));
        if !bound {
            return Err(DataAccessError::ParameterError(format!(
                "no value supplied for placeholder {}",
                stmt.parameter_name(index).unwrap_or("?")
            )));
        }
    }

    for (key, value) in params {
        let marker = format!(":{key}");
        let index = stmt.parameter_index(&marker)?.ok_or_else(|| {
            DataAccessError::ParameterError(format!("statement has no placeholder {marker}"))
        })?;
        stmt.raw_bind_parameter(index, bind_value_to_sqlite(BindValue::from_json(value)?))?;
    }
    Ok(())
}
