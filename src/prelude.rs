//! Convenient imports for common functionality.
//!
//! ```rust
//! use sql_model::prelude::*;
//! ```

pub use crate::config::{DbConfig, DbConfigBuilder};
pub use crate::debug::{
    ConsoleSink, DebugTrace, FileSink, MemorySink, QUERY_CAVEAT, TraceSink, render_query,
};
pub use crate::error::DataAccessError;
pub use crate::executor::{AnyExecutor, ExecOutcome, QueryExecutor};
pub use crate::model::{ListOptions, Model, RawExec, table_from_context};
pub use crate::params::BoundParams;
pub use crate::query_builder::QueryAndParams;
pub use crate::results::{FetchedRows, Record, ResultSet, ReturnMode};
pub use crate::types::{BindValue, Dialect, Environment, Fields, ParamKind, RowValue, infer, to_fields};

#[cfg(feature = "mysql")]
pub use crate::mysql::MysqlExecutor;
#[cfg(feature = "sqlite")]
pub use crate::sqlite::SqliteExecutor;
