// MySQL / MariaDB backend for the standard dialect
//
// - executor: connection ownership and the `QueryExecutor` implementation
// - params: typing of named/positional parameters
// - query: result extraction

pub mod executor;
pub mod params;
pub mod query;

pub use executor::MysqlExecutor;
pub use params::convert_params;
pub use query::build_result_set;
