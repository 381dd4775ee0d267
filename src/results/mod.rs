mod result_set;
mod row;

pub use result_set::ResultSet;
pub use row::Record;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::types::Fields;

/// How fetched rows are handed back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnMode {
    /// Structured records with named fields
    #[default]
    Object,
    /// Loosely-typed ordered maps of column name to value
    Array,
}

/// Rows fetched in the requested [`ReturnMode`].
#[derive(Debug, Clone, PartialEq)]
pub enum FetchedRows {
    Records(Vec<Record>),
    Maps(Vec<Fields>),
}

impl FetchedRows {
    #[must_use]
    pub fn from_result_set(result_set: ResultSet, mode: ReturnMode) -> Self {
        match mode {
            ReturnMode::Object => FetchedRows::Records(result_set.results),
            ReturnMode::Array => {
                FetchedRows::Maps(result_set.results.iter().map(Record::to_map).collect())
            }
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            FetchedRows::Records(rows) => rows.len(),
            FetchedRows::Maps(rows) => rows.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The rows as records; map rows are returned as `None`.
    #[must_use]
    pub fn into_records(self) -> Option<Vec<Record>> {
        match self {
            FetchedRows::Records(rows) => Some(rows),
            FetchedRows::Maps(_) => None,
        }
    }

    /// The rows as ordered maps, converting records if needed.
    #[must_use]
    pub fn into_maps(self) -> Vec<Fields> {
        match self {
            FetchedRows::Records(rows) => rows.iter().map(Record::to_map).collect(),
            FetchedRows::Maps(rows) => rows,
        }
    }
}
