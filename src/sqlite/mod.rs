// SQLite backend for the embedded dialect
//
// - executor: connection ownership and the `QueryExecutor` implementation
// - params: typing and binding of named/positional parameters
// - query: statement execution and result extraction

pub mod executor;
pub mod params;
pub mod query;

pub use executor::SqliteExecutor;
pub use query::build_result_set;
