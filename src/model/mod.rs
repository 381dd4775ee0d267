//! The table-oriented data-access facade.
//!
//! A [`Model`] owns one executor and a context identifier. Operations that take no
//! explicit table use the table named by the context (see [`table_from_context`]).
//! Every operation takes `&mut self`: one model runs one statement at a time.

mod options;
mod raw;
mod read;
mod write;

pub use options::ListOptions;
pub use raw::RawExec;

use std::fmt;
use std::sync::Arc;

use tracing::{debug, error, info};

use crate::config::DbConfig;
use crate::debug::{DebugTrace, QUERY_CAVEAT, TraceSink};
use crate::error::DataAccessError;
use crate::executor::{AnyExecutor, ExecOutcome, QueryExecutor};
use crate::query_builder::QueryAndParams;
use crate::results::ResultSet;
use crate::types::Environment;

/// Whether a debug trace of an operation carries the before-binding caveat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Caveat {
    Attach,
    Omit,
}

/// Table name implied by a context identifier: the last `-`-separated segment.
///
/// ```rust
/// use sql_model::model::table_from_context;
///
/// assert_eq!(table_from_context("admin-users"), "users");
/// assert_eq!(table_from_context("users"), "users");
/// ```
#[must_use]
pub fn table_from_context(context: &str) -> &str {
    context.rsplit('-').next().unwrap_or(context)
}

pub struct Model<E = AnyExecutor> {
    executor: E,
    context: String,
    trace_sink: Option<Arc<dyn TraceSink>>,
    environment: Environment,
}

impl<E: fmt::Debug> fmt::Debug for Model<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("executor", &self.executor)
            .field("context", &self.context)
            .field("tracing", &self.trace_sink.is_some())
            .field("environment", &self.environment)
            .finish()
    }
}

impl Model<AnyExecutor> {
    /// Connect using `config` and apply its debug and environment settings.
    ///
    /// # Errors
    /// Returns `DataAccessError::ConnectionError` (or `ConfigError`) if the connection
    /// cannot be established. Nothing is retried.
    pub async fn connect(
        config: &DbConfig,
        context: impl Into<String>,
    ) -> Result<Self, DataAccessError> {
        let executor = AnyExecutor::connect(config).await.inspect_err(|e| {
            error!(dialect = ?config.dialect, error = %e, "database connection failed");
        })?;
        info!(dialect = ?config.dialect, debug = config.debug, "database connection established");

        let mut model = Model::new(executor, context).with_environment(config.environment);
        model.trace_sink = config.trace_sink();
        Ok(model)
    }

    /// Like [`Model::connect`], but a failed connection reports the error and ends the
    /// process with exit status 1.
    pub async fn connect_or_exit(config: &DbConfig, context: impl Into<String>) -> Self {
        match Self::connect(config, context).await {
            Ok(model) => model,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    }
}

impl<E: QueryExecutor> Model<E> {
    pub fn new(executor: E, context: impl Into<String>) -> Self {
        Self {
            executor,
            context: context.into(),
            trace_sink: None,
            environment: Environment::Production,
        }
    }

    /// Render every statement to `sink` before it runs.
    #[must_use]
    pub fn with_trace_sink(mut self, sink: Arc<dyn TraceSink>) -> Self {
        self.trace_sink = Some(sink);
        self
    }

    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    #[must_use]
    pub fn context(&self) -> &str {
        &self.context
    }

    #[must_use]
    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn executor_mut(&mut self) -> &mut E {
        &mut self.executor
    }

    pub fn into_executor(self) -> E {
        self.executor
    }

    /// The explicit table if given, otherwise the context's table.
    #[must_use]
    pub fn resolve_table<'a>(&'a self, table: Option<&'a str>) -> &'a str {
        table.unwrap_or_else(|| table_from_context(&self.context))
    }

    fn trace(&self, query: &QueryAndParams, caveat: Caveat) -> Result<(), DataAccessError> {
        let Some(sink) = &self.trace_sink else {
            return Ok(());
        };
        let note = (caveat == Caveat::Attach).then_some(QUERY_CAVEAT);
        let trace = DebugTrace::new(&query.query, &query.params, note, self.executor.dialect());
        debug!(rendered = %trace.rendered, "query to be executed");
        sink.emit(&trace)
    }

    pub(crate) async fn fetch(
        &mut self,
        query: &QueryAndParams,
        caveat: Caveat,
    ) -> Result<ResultSet, DataAccessError> {
        self.trace(query, caveat)?;
        self.executor.fetch_all(&query.query, &query.params).await
    }

    pub(crate) async fn run(
        &mut self,
        query: &QueryAndParams,
        caveat: Caveat,
    ) -> Result<ExecOutcome, DataAccessError> {
        self.trace(query, caveat)?;
        self.executor.execute(&query.query, &query.params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_collapses_to_last_segment() {
        assert_eq!(table_from_context("admin-users"), "users");
        assert_eq!(table_from_context("shop-admin-orders"), "orders");
        assert_eq!(table_from_context("orders"), "orders");
    }
}
