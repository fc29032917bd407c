use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExportError {
    #[error("export write failed: {0}")]
    WriteFailed(String),
    #[error("no export destination configured")]
    NoDestination,
}

/// Destination for exported session data. A failed write is surfaced
/// to the caller; the session data stays intact and re-exportable.
pub trait ExportSink: Send + Sync {
    /// Write the rendered time-series document (CSV).
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if the write fails.
    fn write_timeseries(&self, content: &str) -> Result<PathBuf, ExportError>;

    /// Write the rendered session summary (text).
    ///
    /// # Errors
    ///
    /// Returns `ExportError` if the write fails.
    fn write_summary(&self, content: &str) -> Result<PathBuf, ExportError>;
}
