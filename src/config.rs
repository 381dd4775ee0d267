use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::debug::{ConsoleSink, FileSink, TraceSink};
#[cfg(feature = "mysql")]
use crate::error::DataAccessError;
use crate::types::{Dialect, Environment};

/// Connection and debugging settings, fixed for the life of a [`crate::model::Model`].
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    /// Full connection string; overrides the discrete fields when non-empty.
    pub dsn: Option<String>,
    pub dialect: Dialect,
    pub debug: bool,
    pub debug_to_file: bool,
    pub debug_file: Option<PathBuf>,
    pub environment: Environment,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3306,
            user: "root".to_string(),
            password: String::new(),
            database: String::new(),
            dsn: None,
            dialect: Dialect::Standard,
            debug: false,
            debug_to_file: false,
            debug_file: None,
            environment: Environment::Production,
        }
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("dsn", &self.dsn.as_ref().map(|_| "<redacted>"))
            .field("dialect", &self.dialect)
            .field("debug", &self.debug)
            .field("debug_to_file", &self.debug_to_file)
            .field("debug_file", &self.debug_file)
            .field("environment", &self.environment)
            .finish()
    }
}

impl DbConfig {
    #[must_use]
    pub fn builder() -> DbConfigBuilder {
        DbConfigBuilder::default()
    }

    /// The connection string override, if one is set.
    #[must_use]
    pub fn dsn(&self) -> Option<&str> {
        self.dsn.as_deref().filter(|dsn| !dsn.is_empty())
    }

    /// Database file for the embedded dialect: the DSN (minus any `sqlite:` prefix), or
    /// the database name.
    #[must_use]
    pub fn sqlite_path(&self) -> String {
        match self.dsn() {
            Some(dsn) => dsn.strip_prefix("sqlite:").unwrap_or(dsn).to_string(),
            None => self.database.clone(),
        }
    }

    /// Where file debugging appends; defaults to `<database>_DEBUG.txt`.
    #[must_use]
    pub fn debug_file_path(&self) -> PathBuf {
        self.debug_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}_DEBUG.txt", self.database)))
    }

    /// The sink debug traces go to, or `None` when debugging is off.
    #[must_use]
    pub fn trace_sink(&self) -> Option<Arc<dyn TraceSink>> {
        if !self.debug {
            None
        } else if self.debug_to_file {
            Some(Arc::new(FileSink::new(self.debug_file_path())))
        } else {
            Some(Arc::new(ConsoleSink))
        }
    }

    /// Server connection options: the DSN when set, otherwise the discrete fields.
    ///
    /// # Errors
    /// Returns `DataAccessError::ConfigError` if the DSN is not a valid MySQL URL.
    #[cfg(feature = "mysql")]
    pub fn mysql_opts(&self) -> Result<mysql_async::Opts, DataAccessError> {
        match self.dsn() {
            Some(dsn) => mysql_async::Opts::from_url(dsn)
                .map_err(|e| DataAccessError::ConfigError(format!("invalid MySQL DSN: {e}"))),
            None => Ok(mysql_async::OptsBuilder::default()
                .ip_or_hostname(self.host.clone())
                .tcp_port(self.port)
                .user(Some(self.user.clone()))
                .pass(Some(self.password.clone()))
                .db_name((!self.database.is_empty()).then(|| self.database.clone()))
                .into()),
        }
    }
}

/// Fluent builder for [`DbConfig`].
#[derive(Debug, Clone, Default)]
pub struct DbConfigBuilder {
    config: DbConfig,
}

impl DbConfigBuilder {
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    #[must_use]
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.config.user = user.into();
        self
    }

    #[must_use]
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.config.password = password.into();
        self
    }

    #[must_use]
    pub fn database(mut self, database: impl Into<String>) -> Self {
        self.config.database = database.into();
        self
    }

    #[must_use]
    pub fn dsn(mut self, dsn: impl Into<String>) -> Self {
        self.config.dsn = Some(dsn.into());
        self
    }

    #[must_use]
    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.config.dialect = dialect;
        self
    }

    #[must_use]
    pub fn debug(mut self, debug: bool) -> Self {
        self.config.debug = debug;
        self
    }

    /// Send debug traces to `path` instead of standard output.
    #[must_use]
    pub fn debug_to_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.debug_to_file = true;
        self.config.debug_file = Some(path.into());
        self
    }

    #[must_use]
    pub fn environment(mut self, environment: Environment) -> Self {
        self.config.environment = environment;
        self
    }

    #[must_use]
    pub fn finish(self) -> DbConfig {
        self.config
    }
}
