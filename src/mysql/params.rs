use std::collections::HashMap;

use mysql_async::{Params, Value};

use crate::error::DataAccessError;
use crate::params::BoundParams;
use crate::types::BindValue;

/// Convert a typed bind value to a `mysql_async` value; booleans travel as 0/1.
#[must_use]
pub fn bind_value_to_mysql(value: BindValue) -> Value {
    match value {
        BindValue::Int(i) => Value::Int(i),
        BindValue::Bool(b) => Value::Int(i64::from(b)),
        BindValue::Null => Value::NULL,
        BindValue::Text(s) => Value::Bytes(s.into_bytes()),
    }
}

/// Convert a parameter set for the driver.
///
/// Named sets become `Params::Named` keyed by placeholder name (without the `:`
/// marker); the driver maps them onto the prepared statement's `:name` slots.
///
/// # Errors
/// Returns `DataAccessError::ParameterError` for values that cannot be bound directly.
pub fn convert_params(params: &BoundParams) -> Result<Params, DataAccessError> {
    if params.is_empty() {
        return Ok(Params::Empty);
    }
    match params {
        BoundParams::Named(map) => {
            let mut named = HashMap::with_capacity(map.len());
            for (key, value) in map {
                named.insert(
                    key.as_bytes().to_vec(),
                    bind_value_to_mysql(BindValue::from_json(value)?),
                );
            }
            Ok(Params::Named(named))
        }
        BoundParams::Positional(values) => values
            .iter()
            .map(|v| BindValue::from_json(v).map(bind_value_to_mysql))
            .collect::<Result<Vec<_>, _>>()
            .map(Params::Positional),
    }
}
