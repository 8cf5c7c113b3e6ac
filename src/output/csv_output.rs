//! CSV exporter
//!
//! Writes one header row on open and one row per record, flushing on close.

use crate::output::traits::{Exporter, OutputError, OutputResult};
use crate::record::AppRecord;
use std::fs::File;
use std::path::PathBuf;

/// Exporter that appends records to a CSV file
pub struct CsvExporter {
    path: PathBuf,
    writer: Option<csv::Writer<File>>,
}

impl CsvExporter {
    /// Creates an exporter targeting `path`. Nothing is written until
    /// [`Exporter::open`] runs.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writer: None,
        }
    }
}

impl Exporter for CsvExporter {
    fn open(&mut self) -> OutputResult<()> {
        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.write_record(AppRecord::csv_header())?;
        self.writer = Some(writer);
        Ok(())
    }

    fn write(&mut self, record: &AppRecord) -> OutputResult<()> {
        let writer = self.writer.as_mut().ok_or(OutputError::NotOpen)?;
        writer.write_record(record.to_csv_record())?;
        Ok(())
    }

    fn close(&mut self) -> OutputResult<()> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush()?;
        }
        Ok(())
    }
}
