//! Crawl statistics and end-of-run reporting
//!
//! Every keyword's pagination and retrieval counters are collected into a
//! [`CrawlReport`], printed when the run finishes. Anomalies are already on
//! the log as they happen; the report is the operator's summary view.

use chrono::{DateTime, Utc};

/// Counters for one keyword's crawl
#[derive(Debug, Clone, Default)]
pub struct KeywordStats {
    /// The search keyword
    pub keyword: String,

    /// Distinct identifiers discovered
    pub inserted: u32,

    /// Duplicate identifiers skipped during pagination
    pub skipped: u32,

    /// Search requests that failed (error-budget counter)
    pub errors: u32,

    /// Search requests issued
    pub requests: u32,

    /// Detail pages parsed into records
    pub parsed: u32,

    /// Detail fetches or parses that failed
    pub failed: u32,
}

/// Summary of one crawl run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub keywords: Vec<KeywordStats>,
}

impl CrawlReport {
    /// Creates a report stamped with the current time
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            keywords: Vec::new(),
        }
    }

    /// Appends one keyword's counters
    pub fn push(&mut self, stats: KeywordStats) {
        self.keywords.push(stats);
    }

    /// Stamps the finish time
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Total distinct identifiers discovered across keywords
    pub fn total_discovered(&self) -> u32 {
        self.keywords.iter().map(|k| k.inserted).sum()
    }

    /// Total records parsed across keywords
    pub fn total_parsed(&self) -> u32 {
        self.keywords.iter().map(|k| k.parsed).sum()
    }

    /// Total failed detail fetches/parses across keywords
    pub fn total_failed(&self) -> u32 {
        self.keywords.iter().map(|k| k.failed).sum()
    }

    /// Share of discovered identifiers that became records, as a percentage
    pub fn parse_rate(&self) -> f64 {
        let discovered = self.total_discovered();
        if discovered == 0 {
            return 0.0;
        }
        (self.total_parsed() as f64 / discovered as f64) * 100.0
    }
}

impl Default for CrawlReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Prints a report to stdout in a formatted manner
pub fn print_report(report: &CrawlReport) {
    println!("=== Crawl Report ===\n");

    println!("Run:");
    println!("  Started: {}", report.started_at.to_rfc3339());
    if let Some(finished) = report.finished_at {
        println!("  Finished: {}", finished.to_rfc3339());
        let duration = finished - report.started_at;
        println!("  Duration: {}s", duration.num_seconds());
    }
    println!();

    println!("Keywords:");
    for stats in &report.keywords {
        println!(
            "  {}: {} discovered ({} duplicates skipped), {} parsed, {} failed, {} requests ({} errors)",
            stats.keyword,
            stats.inserted,
            stats.skipped,
            stats.parsed,
            stats.failed,
            stats.requests,
            stats.errors,
        );
    }
    println!();

    println!("Totals:");
    println!("  Discovered: {}", report.total_discovered());
    println!("  Parsed: {}", report.total_parsed());
    println!("  Failed: {}", report.total_failed());
    println!("  Parse rate: {:.1}%", report.parse_rate());
}
