//! SQL text assembly for the table-oriented operations.
//!
//! Identifiers are spliced into the SQL text (no driver binds identifiers), so every
//! table, column, ORDER BY list and operator passes through [`ident`] first. Values never
//! reach the SQL text; they travel in the returned [`BoundParams`].

pub mod ident;

mod dml;
mod select;

pub use dml::{batch_insert, delete, insert, update};
pub use select::{count, count_rows, max, select, select_by_id, select_one_where, select_where};

use crate::params::BoundParams;

/// A query and its parameters bundled together.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryAndParams {
    /// The SQL query string
    pub query: String,
    /// The parameters to be bound to the query
    pub params: BoundParams,
}

impl QueryAndParams {
    pub fn new(query: impl Into<String>, params: BoundParams) -> Self {
        Self {
            query: query.into(),
            params,
        }
    }

    pub fn new_without_params(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            params: BoundParams::default(),
        }
    }
}
