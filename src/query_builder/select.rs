use serde_json::Value as JsonValue;

use crate::error::DataAccessError;
use crate::params::BoundParams;

use super::QueryAndParams;
use super::ident::{identifier, operator as checked_operator, order_by as checked_order_by, param_name};

/// `SELECT * FROM <table> ORDER BY <order_by>`, paginated only when both `limit` and
/// `offset` are given.
///
/// # Errors
/// Returns `DataAccessError::InvalidIdentifier` for an unsafe table or ORDER BY list.
pub fn select(
    table: &str,
    order_by: &str,
    limit: Option<u64>,
    offset: Option<u64>,
) -> Result<QueryAndParams, DataAccessError> {
    let mut sql = format!(
        "SELECT * FROM {} ORDER BY {}",
        identifier(table)?,
        checked_order_by(order_by)?
    );
    add_limit_offset(&mut sql, limit, offset);
    Ok(QueryAndParams::new_without_params(sql))
}

/// `SELECT * FROM <table> WHERE <column> <operator> :<column> ORDER BY <order_by>`.
///
/// For `LIKE` / `NOT LIKE` the bound value is wrapped as `%value%`; the SQL text is
/// unchanged.
///
/// # Errors
/// Returns `DataAccessError::InvalidIdentifier` for an unsafe identifier or operator.
#[allow(clippy::too_many_arguments)]
pub fn select_where(
    table: &str,
    column: &str,
    operator: &str,
    value: JsonValue,
    order_by: &str,
    limit: Option<u64>,
    offset: Option<u64>,
) -> Result<QueryAndParams, DataAccessError> {
    let op = checked_operator(operator)?;
    let name = param_name(identifier(column)?);
    let mut sql = format!(
        "SELECT * FROM {} WHERE {column} {op} :{name} ORDER BY {}",
        identifier(table)?,
        checked_order_by(order_by)?
    );
    add_limit_offset(&mut sql, limit, offset);

    let value = if matches!(op, "LIKE" | "NOT LIKE") {
        like_pattern(value)
    } else {
        value
    };
    let mut params = BoundParams::named();
    params.set(name, value);
    Ok(QueryAndParams::new(sql, params))
}

/// `SELECT * FROM <table> WHERE id = :id`.
///
/// # Errors
/// Returns `DataAccessError::InvalidIdentifier` for an unsafe table name.
pub fn select_by_id(table: &str, id: JsonValue) -> Result<QueryAndParams, DataAccessError> {
    let sql = format!("SELECT * FROM {} WHERE id = :id", identifier(table)?);
    let mut params = BoundParams::named();
    params.set("id", id);
    Ok(QueryAndParams::new(sql, params))
}

/// `SELECT * FROM <table> WHERE <column> = :<column>`.
///
/// # Errors
/// Returns `DataAccessError::InvalidIdentifier` for an unsafe identifier.
pub fn select_one_where(
    table: &str,
    column: &str,
    value: JsonValue,
) -> Result<QueryAndParams, DataAccessError> {
    let name = param_name(identifier(column)?);
    let sql = format!(
        "SELECT * FROM {} WHERE {column} = :{name}",
        identifier(table)?
    );
    let mut params = BoundParams::named();
    params.set(name, value);
    Ok(QueryAndParams::new(sql, params))
}

/// # Errors
/// Returns `DataAccessError::InvalidIdentifier` for an unsafe table name.
pub fn count(table: &str) -> Result<QueryAndParams, DataAccessError> {
    Ok(QueryAndParams::new_without_params(format!(
        "SELECT COUNT(id) AS total FROM {}",
        identifier(table)?
    )))
}

/// # Errors
/// Returns `DataAccessError::InvalidIdentifier` for an unsafe identifier.
pub fn count_rows(
    table: &str,
    column: &str,
    value: JsonValue,
) -> Result<QueryAndParams, DataAccessError> {
    let name = param_name(identifier(column)?);
    let sql = format!(
        "SELECT COUNT(id) AS total FROM {} WHERE {column} = :{name}",
        identifier(table)?
    );
    let mut params = BoundParams::named();
    params.set(name, value);
    Ok(QueryAndParams::new(sql, params))
}

/// # Errors
/// Returns `DataAccessError::InvalidIdentifier` for an unsafe table name.
pub fn max(table: &str) -> Result<QueryAndParams, DataAccessError> {
    Ok(QueryAndParams::new_without_params(format!(
        "SELECT MAX(id) AS max_id FROM {}",
        identifier(table)?
    )))
}

fn add_limit_offset(sql: &mut String, limit: Option<u64>, offset: Option<u64>) {
    if let (Some(limit), Some(offset)) = (limit, offset) {
        sql.push_str(&format!(" LIMIT {offset}, {limit}"));
    }
}

fn like_pattern(value: JsonValue) -> JsonValue {
    match value {
        JsonValue::String(s) => JsonValue::String(format!("%{s}%")),
        JsonValue::Number(n) => JsonValue::String(format!("%{n}%")),
        JsonValue::Bool(b) => JsonValue::String(format!("%{}%", u8::from(b))),
        other => other,
    }
}
