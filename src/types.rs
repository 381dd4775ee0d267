use chrono::NaiveDateTime;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::error::DataAccessError;

/// An insertion-ordered mapping of column name to value.
pub type Fields = Map<String, JsonValue>;

/// The kind a value is bound as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamKind {
    Int,
    Bool,
    Null,
    Str,
}

/// Classify a dynamic value for binding.
///
/// Integers are checked before booleans, so `1` binds as an integer while `true` binds as
/// a boolean. Everything that is not an integer, boolean or null binds as a string,
/// including floats and (for direct binding, unsupported) arrays and objects.
///
/// ```rust
/// use serde_json::json;
/// use sql_model::prelude::*;
///
/// assert_eq!(infer(&json!(1)), ParamKind::Int);
/// assert_eq!(infer(&json!(true)), ParamKind::Bool);
/// assert_eq!(infer(&json!(null)), ParamKind::Null);
/// assert_eq!(infer(&json!("1")), ParamKind::Str);
/// ```
#[must_use]
pub fn infer(value: &JsonValue) -> ParamKind {
    if value.is_i64() {
        ParamKind::Int
    } else if value.is_boolean() {
        ParamKind::Bool
    } else if value.is_null() {
        ParamKind::Null
    } else {
        ParamKind::Str
    }
}

/// A value typed for a single bind slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    Int(i64),
    Bool(bool),
    Null,
    Text(String),
}

impl BindValue {
    /// Type a dynamic value through [`infer`].
    ///
    /// # Errors
    ///
    /// Returns `DataAccessError::ParameterError` for arrays and objects; those must be
    /// flattened by the caller before binding.
    pub fn from_json(value: &JsonValue) -> Result<Self, DataAccessError> {
        match (infer(value), value) {
            (ParamKind::Int, JsonValue::Number(n)) => n.as_i64().map(BindValue::Int).ok_or_else(|| {
                DataAccessError::ParameterError(format!("integer out of range: {n}"))
            }),
            (ParamKind::Bool, JsonValue::Bool(b)) => Ok(BindValue::Bool(*b)),
            (ParamKind::Null, _) => Ok(BindValue::Null),
            (_, JsonValue::String(s)) => Ok(BindValue::Text(s.clone())),
            (_, JsonValue::Number(n)) => Ok(BindValue::Text(n.to_string())),
            (_, other) => Err(DataAccessError::ParameterError(format!(
                "cannot bind a nested value directly, flatten it first: {other}"
            ))),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ParamKind {
        match self {
            BindValue::Int(_) => ParamKind::Int,
            BindValue::Bool(_) => ParamKind::Bool,
            BindValue::Null => ParamKind::Null,
            BindValue::Text(_) => ParamKind::Str,
        }
    }
}

/// Flatten one batch value: scalars stay as they are, nested values become JSON text.
#[must_use]
pub fn flatten_for_batch(value: &JsonValue) -> JsonValue {
    match value {
        JsonValue::Array(_) | JsonValue::Object(_) => JsonValue::String(value.to_string()),
        scalar => scalar.clone(),
    }
}

/// Convert any serializable struct into an insertion-ordered field map.
///
/// # Errors
///
/// Returns `DataAccessError::ParameterError` if the value does not serialize to an object.
pub fn to_fields<T: Serialize>(value: &T) -> Result<Fields, DataAccessError> {
    match serde_json::to_value(value) {
        Ok(JsonValue::Object(map)) => Ok(map),
        Ok(other) => Err(DataAccessError::ParameterError(format!(
            "expected a struct or map of fields, got {other}"
        ))),
        Err(e) => Err(DataAccessError::ParameterError(e.to_string())),
    }
}

/// Values read back from a result row.
#[derive(Debug, Clone, PartialEq)]
pub enum RowValue {
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Binary data
    Blob(Vec<u8>),
    /// Date/time value (server dialect only)
    Timestamp(NaiveDateTime),
    /// NULL value
    Null,
}

impl RowValue {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<&i64> {
        if let RowValue::Int(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let RowValue::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        if let RowValue::Float(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let RowValue::Blob(bytes) = self {
            Some(bytes)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            RowValue::Timestamp(value) => Some(*value),
            RowValue::Text(s) => NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").ok(),
            _ => None,
        }
    }

    /// Integer view that also accepts numeric text, which some drivers return for
    /// aggregates.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        match self {
            RowValue::Int(i) => Some(*i),
            RowValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        match self {
            RowValue::Int(i) => JsonValue::from(*i),
            RowValue::Float(f) => serde_json::Number::from_f64(*f)
                .map_or(JsonValue::Null, JsonValue::Number),
            RowValue::Text(s) => JsonValue::String(s.clone()),
            RowValue::Blob(bytes) => JsonValue::from(bytes.clone()),
            RowValue::Timestamp(dt) => JsonValue::String(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
            RowValue::Null => JsonValue::Null,
        }
    }
}

/// The SQL variant a connection speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// MySQL / MariaDB server
    #[default]
    Standard,
    /// `SQLite` database file
    Embedded,
}

/// Deployment mode; only `Dev` permits [`crate::model::Model::raw_exec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Dev,
    #[default]
    #[serde(other)]
    Production,
}

impl Environment {
    /// Interpret an environment flag; only the exact string `dev` selects `Dev`.
    #[must_use]
    pub fn from_flag(flag: &str) -> Self {
        if flag == "dev" {
            Environment::Dev
        } else {
            Environment::Production
        }
    }
}
