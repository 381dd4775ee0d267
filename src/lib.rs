//! A table-oriented data-access layer over `SQLite` and `MySQL`.
//!
//! [`Model`] turns short calls (fetch by id, filter by column, insert a field map,
//! batch insert, count) into parameterized SQL, binds values with types inferred from
//! their JSON representation, runs the statement, and hands back [`Record`]s. With
//! debugging on, every statement is also rendered with its values substituted and sent
//! to standard output or a log file.
//!
//! ```rust
//! use sql_model::prelude::*;
//! use serde_json::json;
//!
//! assert_eq!(infer(&json!(42)), ParamKind::Int);
//! assert_eq!(infer(&json!("42")), ParamKind::Str);
//!
//! let mut params = BoundParams::named();
//! params.set("name", json!("o'neil"));
//! assert_eq!(
//!     render_query("SELECT * FROM users WHERE name = :name", &params, Dialect::Standard),
//!     "SELECT * FROM users WHERE name = 'o''neil'"
//! );
//! ```

pub mod config;
pub mod debug;
pub mod error;
pub mod executor;
pub mod model;
pub mod params;
pub mod placeholders;
pub mod prelude;
pub mod query_builder;
pub mod results;
pub mod types;

#[cfg(feature = "mysql")]
pub mod mysql;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use config::{DbConfig, DbConfigBuilder};
pub use error::DataAccessError;
pub use executor::{AnyExecutor, ExecOutcome, QueryExecutor};
pub use model::{ListOptions, Model, RawExec};
pub use params::BoundParams;
pub use results::{FetchedRows, Record, ResultSet, ReturnMode};
pub use types::{Dialect, Environment, Fields, ParamKind, RowValue};
