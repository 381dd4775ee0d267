use serde_json::Value as JsonValue;

use crate::error::DataAccessError;
use crate::params::BoundParams;
use crate::types::{Fields, flatten_for_batch};

use super::QueryAndParams;
use super::ident::{identifier, param_name};

/// `INSERT INTO <table> (<cols>) VALUES (:<col>, ...)` in field insertion order.
///
/// # Errors
/// Returns `DataAccessError::InvalidIdentifier` for unsafe names and
/// `DataAccessError::ParameterError` when `fields` is empty.
pub fn insert(table: &str, fields: &Fields) -> Result<QueryAndParams, DataAccessError> {
    let table = identifier(table)?;
    if fields.is_empty() {
        return Err(DataAccessError::ParameterError(format!(
            "insert into {table} needs at least one field"
        )));
    }

    let mut columns = Vec::with_capacity(fields.len());
    let mut placeholders = Vec::with_capacity(fields.len());
    let mut params = BoundParams::named();
    for (column, value) in fields {
        let name = unique_param(&params, column)?;
        columns.push(column.as_str());
        placeholders.push(format!(":{name}"));
        params.set(name, value.clone());
    }

    let sql = format!(
        "INSERT INTO {table} ({}) VALUES ({})",
        columns.join(", "),
        placeholders.join(", ")
    );
    Ok(QueryAndParams::new(sql, params))
}

/// `UPDATE <table> SET <col> = :<col>, ... WHERE <table>.id = :id`.
///
/// `id` is bound after the fields; a field literally named `id` is overwritten in place.
///
/// # Errors
/// Returns `DataAccessError::InvalidIdentifier` for unsafe names and
/// `DataAccessError::ParameterError` when `fields` is empty.
pub fn update(table: &str, id: JsonValue, fields: &Fields) -> Result<QueryAndParams, DataAccessError> {
    let table = identifier(table)?;
    if fields.is_empty() {
        return Err(DataAccessError::ParameterError(format!(
            "update of {table} needs at least one field"
        )));
    }

    let mut assignments = Vec::with_capacity(fields.len());
    let mut params = BoundParams::named();
    for (column, value) in fields {
        let name = unique_param(&params, column)?;
        assignments.push(format!("{column} = :{name}"));
        params.set(name, value.clone());
    }
    params.set("id", id);

    let sql = format!(
        "UPDATE {table} SET {} WHERE {table}.id = :id",
        assignments.join(", ")
    );
    Ok(QueryAndParams::new(sql, params))
}

/// Placeholder name for `column`, refusing one already taken by another field
/// (`t.a` and `t_a` both map to `:t_a`).
fn unique_param(params: &BoundParams, column: &str) -> Result<String, DataAccessError> {
    let name = param_name(identifier(column)?);
    if params.get(&name).is_some() {
        return Err(DataAccessError::ParameterError(format!(
            "field {column:?} collides with another field on placeholder :{name}"
        )));
    }
    Ok(name)
}

/// `DELETE FROM <table> WHERE id = :id`.
///
/// # Errors
/// Returns `DataAccessError::InvalidIdentifier` for an unsafe table name.
pub fn delete(table: &str, id: JsonValue) -> Result<QueryAndParams, DataAccessError> {
    let sql = format!("DELETE FROM {} WHERE id = :id", identifier(table)?);
    let mut params = BoundParams::named();
    params.set("id", id);
    Ok(QueryAndParams::new(sql, params))
}

/// One multi-row INSERT with a `(?,...)` group per record and positional parameters.
///
/// The column list comes from the first record; every other record must carry exactly
/// the same field names (in any order). Nested values are flattened to JSON text.
///
/// # Errors
/// Returns `DataAccessError::EmptyBatch` for no records,
/// `DataAccessError::BatchShapeMismatch` when a record's fields differ, and
/// `DataAccessError::InvalidIdentifier` for unsafe names.
pub fn batch_insert(table: &str, records: &[Fields]) -> Result<QueryAndParams, DataAccessError> {
    let Some(first) = records.first() else {
        return Err(DataAccessError::EmptyBatch);
    };
    let table = identifier(table)?;
    if first.is_empty() {
        return Err(DataAccessError::ParameterError(format!(
            "batch insert into {table} needs at least one field"
        )));
    }
    let columns = first
        .keys()
        .map(|k| identifier(k))
        .collect::<Result<Vec<_>, _>>()?;

    let mut values = Vec::with_capacity(columns.len() * records.len());
    for (index, record) in records.iter().enumerate() {
        let same_shape =
            record.len() == columns.len() && columns.iter().all(|c| record.contains_key(*c));
        if !same_shape {
            return Err(DataAccessError::BatchShapeMismatch {
                index,
                expected: columns.join(","),
                found: record.keys().map(String::as_str).collect::<Vec<_>>().join(","),
            });
        }
        values.extend(
            columns
                .iter()
                .map(|c| record.get(*c).map_or(JsonValue::Null, flatten_for_batch)),
        );
    }

    let group = format!("({})", vec!["?"; columns.len()].join(","));
    let sql = format!(
        "INSERT INTO {table} ({}) VALUES {}",
        columns.join(","),
        vec![group; records.len()].join(",")
    );
    Ok(QueryAndParams::new(sql, BoundParams::Positional(values)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: JsonValue) -> Fields {
        match value {
            JsonValue::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn insert_uses_field_order() {
        let q = insert("t", &fields(json!({"name": "a", "age": 5}))).unwrap();
        assert_eq!(q.query, "INSERT INTO t (name, age) VALUES (:name, :age)");
        assert_eq!(
            q.params,
            BoundParams::Named(fields(json!({"name": "a", "age": 5})))
        );
    }

    #[test]
    fn update_binds_id_after_fields() {
        let q = update("t", json!(7), &fields(json!({"name": "b"}))).unwrap();
        assert_eq!(q.query, "UPDATE t SET name = :name WHERE t.id = :id");
        let BoundParams::Named(map) = &q.params else {
            unreachable!()
        };
        let order: Vec<(&str, &JsonValue)> = map.iter().map(|(k, v)| (k.as_str(), v)).collect();
        assert_eq!(order, [("name", &json!("b")), ("id", &json!(7))]);
    }

    #[test]
    fn update_overrides_an_id_field_in_place() {
        let q = update("t", json!(9), &fields(json!({"id": 1, "name": "c"}))).unwrap();
        assert_eq!(q.query, "UPDATE t SET id = :id, name = :name WHERE t.id = :id");
        assert_eq!(q.params.get("id"), Some(&json!(9)));
        assert_eq!(q.params.len(), 2);
    }

    #[test]
    fn empty_field_maps_are_rejected() {
        assert!(insert("t", &Fields::new()).is_err());
        assert!(update("t", json!(1), &Fields::new()).is_err());
    }

    #[test]
    fn qualified_and_flattened_names_may_not_share_a_placeholder() {
        let clash = fields(json!({"t.a": 1, "t_a": 2}));
        assert!(matches!(insert("t", &clash), Err(DataAccessError::ParameterError(_))));
        assert!(matches!(
            update("t", json!(1), &clash),
            Err(DataAccessError::ParameterError(_))
        ));

        let q = insert("t", &fields(json!({"t.a": 1, "t.b": 2}))).unwrap();
        assert_eq!(q.query, "INSERT INTO t (t.a, t.b) VALUES (:t_a, :t_b)");
    }

    #[test]
    fn delete_by_id() {
        let q = delete("t", json!(4)).unwrap();
        assert_eq!(q.query, "DELETE FROM t WHERE id = :id");
        assert_eq!(q.params.get("id"), Some(&json!(4)));
    }

    #[test]
    fn batch_insert_builds_one_group_per_record() {
        let records = vec![
            fields(json!({"a": 1, "b": "x"})),
            fields(json!({"b": "y", "a": 2})),
        ];
        let q = batch_insert("t", &records).unwrap();
        assert_eq!(q.query, "INSERT INTO t (a,b) VALUES (?,?),(?,?)");
        assert_eq!(
            q.params,
            BoundParams::Positional(vec![json!(1), json!("x"), json!(2), json!("y")])
        );
    }

    #[test]
    fn batch_insert_flattens_nested_values() {
        let q = batch_insert("t", &[fields(json!({"tags": ["a", "b"]}))]).unwrap();
        assert_eq!(q.params, BoundParams::Positional(vec![json!("[\"a\",\"b\"]")]));
    }

    #[test]
    fn empty_batch_fails_fast() {
        assert!(matches!(batch_insert("t", &[]), Err(DataAccessError::EmptyBatch)));
        // validated before the table name is even looked at
        assert!(matches!(batch_insert("bad table", &[]), Err(DataAccessError::EmptyBatch)));
    }

    #[test]
    fn batch_records_must_share_fields() {
        let records = vec![fields(json!({"a": 1, "b": 2})), fields(json!({"a": 1, "c": 2}))];
        let err = batch_insert("t", &records).unwrap_err();
        assert!(matches!(err, DataAccessError::BatchShapeMismatch { index: 1, .. }));
    }
}
