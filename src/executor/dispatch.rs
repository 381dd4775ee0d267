use async_trait::async_trait;

use crate::config::DbConfig;
use crate::error::DataAccessError;
use crate::params::BoundParams;
use crate::results::ResultSet;
use crate::types::Dialect;

#[cfg(feature = "mysql")]
use crate::mysql::MysqlExecutor;
#[cfg(feature = "sqlite")]
use crate::sqlite::SqliteExecutor;

use super::{ExecOutcome, QueryExecutor};

/// Whichever backend the configured dialect selects.
#[derive(Debug)]
pub enum AnyExecutor {
    #[cfg(feature = "sqlite")]
    Sqlite(SqliteExecutor),
    #[cfg(feature = "mysql")]
    Mysql(MysqlExecutor),
}

impl AnyExecutor {
    /// Open the connection described by `config`.
    ///
    /// # Errors
    /// Returns `DataAccessError::ConnectionError` if the connection cannot be opened, or
    /// `DataAccessError::Unimplemented` if the dialect's backend is not compiled in.
    pub async fn connect(config: &DbConfig) -> Result<Self, DataAccessError> {
        match config.dialect {
            Dialect::Embedded => connect_embedded(config).await,
            Dialect::Standard => connect_standard(config).await,
        }
    }
}

#[cfg(feature = "sqlite")]
async fn connect_embedded(config: &DbConfig) -> Result<AnyExecutor, DataAccessError> {
    SqliteExecutor::open(&config.sqlite_path())
        .await
        .map(AnyExecutor::Sqlite)
}

#[cfg(not(feature = "sqlite"))]
async fn connect_embedded(_config: &DbConfig) -> Result<AnyExecutor, DataAccessError> {
    Err(DataAccessError::Unimplemented(
        "the embedded dialect needs the `sqlite` feature".to_string(),
    ))
}

#[cfg(feature = "mysql")]
async fn connect_standard(config: &DbConfig) -> Result<AnyExecutor, DataAccessError> {
    MysqlExecutor::connect(config.mysql_opts()?)
        .await
        .map(AnyExecutor::Mysql)
}

#[cfg(not(feature = "mysql"))]
async fn connect_standard(_config: &DbConfig) -> Result<AnyExecutor, DataAccessError> {
    Err(DataAccessError::Unimplemented(
        "the standard dialect needs the `mysql` feature".to_string(),
    ))
}

#[async_trait]
impl QueryExecutor for AnyExecutor {
    fn dialect(&self) -> Dialect {
        match self {
            #[cfg(feature = "sqlite")]
            AnyExecutor::Sqlite(executor) => executor.dialect(),
            #[cfg(feature = "mysql")]
            AnyExecutor::Mysql(executor) => executor.dialect(),
            #[allow(unreachable_patterns)]
            _ => Dialect::default(),
        }
    }

    async fn fetch_all(
        &mut self,
        sql: &str,
        params: &BoundParams,
    ) -> Result<ResultSet, DataAccessError> {
        match self {
            #[cfg(feature = "sqlite")]
            AnyExecutor::Sqlite(executor) => executor.fetch_all(sql, params).await,
            #[cfg(feature = "mysql")]
            AnyExecutor::Mysql(executor) => executor.fetch_all(sql, params).await,
            #[allow(unreachable_patterns)]
            _ => Err(DataAccessError::Unimplemented(
                "This database type is not enabled in the current build".to_string(),
            )),
        }
    }

    async fn execute(
        &mut self,
        sql: &str,
        params: &BoundParams,
    ) -> Result<ExecOutcome, DataAccessError> {
        match self {
            #[cfg(feature = "sqlite")]
            AnyExecutor::Sqlite(executor) => executor.execute(sql, params).await,
            #[cfg(feature = "mysql")]
            AnyExecutor::Mysql(executor) => executor.execute(sql, params).await,
            #[allow(unreachable_patterns)]
            _ => Err(DataAccessError::Unimplemented(
                "This database type is not enabled in the current build".to_string(),
            )),
        }
    }
}
