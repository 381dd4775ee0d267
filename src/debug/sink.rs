use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, Mutex};

use regex::Regex;

use super::DebugTrace;
use crate::error::DataAccessError;

const BANNER: &str = "********************************************************************************";
const DRIVER_NOTE: &str = "The driver has no means of displaying the query actually executed.";

static REPEATED_SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ ]{2,}").expect("valid whitespace regex"));

/// Destination for debug traces.
pub trait TraceSink: Send + Sync {
    /// Emit one trace.
    ///
    /// # Errors
    /// Returns `DataAccessError::TraceError` if the destination cannot be written.
    fn emit(&self, trace: &DebugTrace) -> Result<(), DataAccessError>;
}

/// Writes traces to standard output as they happen.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub(crate) fn format(trace: &DebugTrace) -> String {
        let mut out = format!("QUERY TO BE EXECUTED:\n\n  -> {}\n", trace.rendered);
        if let Some(caveat) = &trace.caveat {
            out.push_str(&format!("\n  PLEASE NOTE: {caveat} {DRIVER_NOTE}\n"));
        }
        out
    }
}

impl TraceSink for ConsoleSink {
    fn emit(&self, trace: &DebugTrace) -> Result<(), DataAccessError> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(Self::format(trace).as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}

/// Appends traces to a log file, one banner-delimited entry per query.
///
/// The file is opened for each entry and closed when the entry is written or fails.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn format(trace: &DebugTrace) -> String {
        let entry = format!(
            "{BANNER}\n{}: QUERY TO BE EXECUTED -> \n\n{}\n\n",
            trace.at.format("%Y-%m-%d %H:%M:%S"),
            trace.rendered
        );
        REPEATED_SPACES.replace_all(&entry, " ").into_owned()
    }
}

impl TraceSink for FileSink {
    fn emit(&self, trace: &DebugTrace) -> Result<(), DataAccessError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(Self::format(trace).as_bytes())?;
        Ok(())
    }
}

/// Keeps traces in memory; clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    traces: Arc<Mutex<Vec<DebugTrace>>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far.
    #[must_use]
    pub fn traces(&self) -> Vec<DebugTrace> {
        match self.traces.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl TraceSink for MemorySink {
    fn emit(&self, trace: &DebugTrace) -> Result<(), DataAccessError> {
        let mut guard = match self.traces.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.push(trace.clone());
        Ok(())
    }
}
