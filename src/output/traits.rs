//! Exporter trait and output error types
//!
//! Exporters persist or forward records as the retrieval loop produces
//! them. The lifecycle is open-once, write-per-record, close-once; the
//! orchestrator owns it. A write failure is logged and skipped by the
//! caller — one bad record never stops a crawl.

use crate::record::AppRecord;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Exporter used before open() or after close()")]
    NotOpen,
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for harvested records
pub trait Exporter {
    /// Prepares the destination (creates files, tables, headers)
    fn open(&mut self) -> OutputResult<()>;

    /// Delivers one record
    fn write(&mut self, record: &AppRecord) -> OutputResult<()>;

    /// Flushes and releases the destination
    fn close(&mut self) -> OutputResult<()>;
}
