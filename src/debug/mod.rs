//! Display-only reconstruction of bound queries.
//!
//! Nothing produced here is ever executed: the rendered text exists for a human to read
//! and is handed to a [`TraceSink`], never back to a connection.

mod sink;

pub use sink::{ConsoleSink, FileSink, MemorySink, TraceSink};

use chrono::{Local, NaiveDateTime};
use serde_json::Value as JsonValue;

use crate::params::BoundParams;
use crate::placeholders::{Placeholder, substitute};
use crate::types::Dialect;

/// Note attached to traces of bound queries.
pub const QUERY_CAVEAT: &str = "The query shown above is how the query would look before binding.";

/// A rendered query ready for a sink.
#[derive(Debug, Clone, PartialEq)]
pub struct DebugTrace {
    /// SQL as sent to the driver, placeholders intact
    pub sql: String,
    /// Best-effort literal reconstruction
    pub rendered: String,
    pub caveat: Option<String>,
    pub at: NaiveDateTime,
}

impl DebugTrace {
    #[must_use]
    pub fn new(sql: &str, params: &BoundParams, caveat: Option<&str>, dialect: Dialect) -> Self {
        Self {
            sql: sql.to_string(),
            rendered: render_query(sql, params, dialect),
            caveat: caveat.map(str::to_string),
            at: Local::now().naive_local(),
        }
    }
}

/// Substitute bound values back into `sql` for display.
///
/// Named sets replace each `:key` they contain; positional sets fill `?` placeholders
/// in order. Placeholders without a value are left as written, and text inside quotes
/// or comments is never touched. `dialect` decides whether a backslash escapes a quote
/// inside a literal.
///
/// ```rust
/// use serde_json::json;
/// use sql_model::prelude::*;
///
/// let mut params = BoundParams::named();
/// params.set("name", "bob");
/// assert_eq!(
///     render_query("SELECT * FROM t WHERE name = :name", &params, Dialect::Standard),
///     "SELECT * FROM t WHERE name = 'bob'"
/// );
/// ```
#[must_use]
pub fn render_query(sql: &str, params: &BoundParams, dialect: Dialect) -> String {
    match params {
        BoundParams::Named(map) => substitute(sql, dialect, |placeholder| match placeholder {
            Placeholder::Named(name) => map.get(name).map(render_literal),
            Placeholder::Positional => None,
        }),
        BoundParams::Positional(values) => {
            let mut next = values.iter();
            substitute(sql, dialect, |placeholder| match placeholder {
                Placeholder::Positional => next.next().map(render_literal),
                Placeholder::Named(_) => None,
            })
        }
    }
}

/// Render one value as it would read in SQL text.
#[must_use]
pub fn render_literal(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => "NULL".to_string(),
        JsonValue::Bool(b) => u8::from(*b).to_string(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::String(s) => quote(s),
        JsonValue::Array(items) => items
            .iter()
            .map(|item| match item {
                JsonValue::String(s) => quote(s),
                other => render_literal(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        JsonValue::Object(_) => quote(&value.to_string()),
    }
}

fn quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query_builder;
    use serde_json::json;

    fn named(pairs: &[(&str, JsonValue)]) -> BoundParams {
        let mut params = BoundParams::named();
        for (k, v) in pairs {
            params.set(*k, v.clone());
        }
        params
    }

    #[test]
    fn numbers_render_unquoted() {
        let out = render_query(
            "SELECT * FROM t WHERE id = :id",
            &named(&[("id", json!(3))]),
            Dialect::Standard,
        );
        assert_eq!(out, "SELECT * FROM t WHERE id = 3");
    }

    #[test]
    fn strings_render_quoted() {
        let out = render_query(
            "SELECT * FROM t WHERE name = :name",
            &named(&[("name", json!("bob"))]),
            Dialect::Standard,
        );
        assert_eq!(out, "SELECT * FROM t WHERE name = 'bob'");
    }

    #[test]
    fn null_bool_and_arrays() {
        let out = render_query(
            "x = :a, y = :b, z = :c",
            &named(&[("a", json!(null)), ("b", json!(true)), ("c", json!(["p", "q"]))]),
            Dialect::Standard,
        );
        assert_eq!(out, "x = NULL, y = 1, z = 'p','q'");
    }

    #[test]
    fn array_elements_are_quoted_one_by_one() {
        let out = render_query(
            "SELECT * FROM t WHERE tag IN (:tags) AND n IN (:nums)",
            &named(&[("tags", json!(["a", "o'k"])), ("nums", json!([1, 2]))]),
            Dialect::Standard,
        );
        assert_eq!(out, "SELECT * FROM t WHERE tag IN ('a','o''k') AND n IN (1,2)");
    }

    #[test]
    fn embedded_literals_ending_in_backslash_close_normally() {
        let sql = r"SELECT * FROM t WHERE path = 'C:\' AND id = :id";
        let params = named(&[("id", json!(3))]);
        assert_eq!(
            render_query(sql, &params, Dialect::Embedded),
            r"SELECT * FROM t WHERE path = 'C:\' AND id = 3"
        );
        assert_eq!(render_query(sql, &params, Dialect::Standard), sql);
    }

    #[test]
    fn standard_literals_honour_backslash_escapes() {
        let sql = r"SELECT * FROM t WHERE note = 'it\'s :x' AND id = :id";
        let params = named(&[("id", json!(3)), ("x", json!(9))]);
        assert_eq!(
            render_query(sql, &params, Dialect::Standard),
            r"SELECT * FROM t WHERE note = 'it\'s :x' AND id = 3"
        );
    }

    #[test]
    fn keys_that_prefix_other_keys_do_not_collide() {
        let out = render_query(
            "a = :id AND b = :id_ref",
            &named(&[("id", json!(1)), ("id_ref", json!(2))]),
            Dialect::Standard,
        );
        assert_eq!(out, "a = 1 AND b = 2");
    }

    #[test]
    fn substituted_text_is_not_rescanned() {
        let out = render_query(
            "a = :a AND b = :b",
            &named(&[("a", json!(":b")), ("b", json!("it's"))]),
            Dialect::Standard,
        );
        assert_eq!(out, "a = ':b' AND b = 'it''s'");
    }

    #[test]
    fn positional_values_fill_in_order() {
        let params = BoundParams::Positional(vec![json!(1), json!("x"), json!(null)]);
        let out = render_query("INSERT INTO t (a,b,c) VALUES (?,?,?)", &params, Dialect::Standard);
        assert_eq!(out, "INSERT INTO t (a,b,c) VALUES (1,'x',NULL)");
    }

    #[test]
    fn missing_values_leave_placeholders() {
        let params = BoundParams::Positional(vec![json!(1)]);
        assert_eq!(render_query("a = ? AND b = ?", &params, Dialect::Standard), "a = 1 AND b = ?");
        assert_eq!(render_query("a = :a", &BoundParams::named(), Dialect::Embedded), "a = :a");
    }

    #[test]
    fn like_rendering_shows_the_wrapped_value() {
        let q = query_builder::select_where("t", "name", "LIKE", json!("bo"), "id", None, None)
            .unwrap();
        assert_eq!(
            render_query(&q.query, &q.params, Dialect::Embedded),
            "SELECT * FROM t WHERE name LIKE '%bo%' ORDER BY id"
        );
    }

    #[test]
    fn trace_carries_caveat() {
        let trace = DebugTrace::new(
            "SELECT 1",
            &BoundParams::default(),
            Some(QUERY_CAVEAT),
            Dialect::Standard,
        );
        assert_eq!(trace.rendered, "SELECT 1");
        assert_eq!(trace.caveat.as_deref(), Some(QUERY_CAVEAT));
    }
}
