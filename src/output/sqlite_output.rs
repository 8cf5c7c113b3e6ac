//! SQLite exporter
//!
//! Persists records into a single `listings` table keyed by detail URL, so
//! re-running a crawl refreshes rows instead of duplicating them.

use crate::output::traits::{Exporter, OutputError, OutputResult};
use crate::record::AppRecord;
use rusqlite::{params, Connection};
use std::path::PathBuf;

const CREATE_LISTINGS: &str = "
CREATE TABLE IF NOT EXISTS listings (
    url           TEXT PRIMARY KEY,
    name          TEXT NOT NULL,
    developer     TEXT,
    category      TEXT,
    is_free       INTEGER NOT NULL,
    price         TEXT,
    score         REAL,
    review_count  INTEGER,
    description   TEXT,
    updated       TEXT,
    scraped_at    TEXT NOT NULL
);
";

const INSERT_LISTING: &str = "
INSERT OR REPLACE INTO listings
    (url, name, developer, category, is_free, price, score, review_count, description, updated, scraped_at)
VALUES
    (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
";

/// Exporter that upserts records into a SQLite database
pub struct SqliteExporter {
    path: PathBuf,
    conn: Option<Connection>,
}

impl SqliteExporter {
    /// Creates an exporter targeting the database at `path`. The file and
    /// schema are created on [`Exporter::open`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            conn: None,
        }
    }
}

impl Exporter for SqliteExporter {
    fn open(&mut self) -> OutputResult<()> {
        let conn = Connection::open(&self.path)?;
        conn.execute_batch(CREATE_LISTINGS)?;
        self.conn = Some(conn);
        Ok(())
    }

    fn write(&mut self, record: &AppRecord) -> OutputResult<()> {
        let conn = self.conn.as_ref().ok_or(OutputError::NotOpen)?;
        conn.execute(
            INSERT_LISTING,
            params![
                record.url,
                record.name,
                record.developer,
                record.category,
                record.is_free,
                record.price,
                record.score,
                record.review_count,
                record.description,
                record.updated,
                record.scraped_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    fn close(&mut self) -> OutputResult<()> {
        self.conn.take();
        Ok(())
    }
}
