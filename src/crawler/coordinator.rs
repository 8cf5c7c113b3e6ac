//! Crawl orchestration
//!
//! Drives the whole run: exporter lifecycle around everything, then for each
//! keyword in order — pagination, the configured delay, retrieval — while
//! collecting per-keyword counters into the final report. Keywords are
//! strictly sequential, and there is no cross-keyword dedup: the same
//! listing may be harvested again under another keyword.

use crate::config::{Config, OutputFormat};
use crate::crawler::fetcher::build_http_client;
use crate::crawler::pagination::collect_listing_ids;
use crate::crawler::retrieval::fetch_listing_details;
use crate::extract::TokenExtractor;
use crate::output::{CrawlReport, CsvExporter, Exporter, KeywordStats, SqliteExporter};
use crate::record::AppRecord;
use crate::state::RetryState;
use crate::ScoutError;
use std::time::Duration;

/// Main crawler structure
pub struct Crawler {
    config: Config,
    tokens: TokenExtractor,
}

impl Crawler {
    /// Creates a crawler with the default continuation-token pattern
    pub fn new(config: Config) -> Self {
        Self {
            config,
            tokens: TokenExtractor::new(),
        }
    }

    /// Creates a crawler with a replacement token extractor
    pub fn with_token_extractor(config: Config, tokens: TokenExtractor) -> Self {
        Self { config, tokens }
    }

    /// Runs the full crawl.
    ///
    /// Opens the exporter once up front, processes every keyword in order
    /// (pagination, delay, retrieval), closes the exporter once at the end,
    /// and returns the per-keyword report.
    pub async fn run(
        &self,
        mut exporter: Option<&mut (dyn Exporter + '_)>,
        mut callback: Option<&mut (dyn FnMut(&AppRecord) + '_)>,
    ) -> Result<CrawlReport, ScoutError> {
        let mut report = CrawlReport::new();

        if let Some(exporter) = exporter.as_mut() {
            exporter.open()?;
        }

        let delay = Duration::from_millis(self.config.crawler.download_delay_ms);

        for keyword in &self.config.keywords {
            // Fresh client per keyword for the search loop, matching the
            // per-pass client in retrieval
            let client = build_http_client(&self.config.endpoints)?;

            let collected = collect_listing_ids(
                &client,
                &self.config.crawler,
                &self.config.endpoints,
                &self.tokens,
                keyword,
            )
            .await;

            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            let mut retry = RetryState::new();
            let retrieved = fetch_listing_details(
                &self.config.endpoints,
                &collected.ids,
                delay,
                exporter.as_deref_mut(),
                callback.as_deref_mut(),
                &mut retry,
            )
            .await?;

            report.push(KeywordStats {
                keyword: keyword.clone(),
                inserted: collected.inserted,
                skipped: collected.skipped,
                errors: collected.errors,
                requests: collected.requests,
                parsed: retrieved.parsed,
                failed: retrieved.failed,
            });
        }

        if let Some(exporter) = exporter.as_mut() {
            exporter.close()?;
        }

        report.finish();
        Ok(report)
    }
}

/// Runs a crawl with the exporter selected by the configuration
///
/// # Example
///
/// ```no_run
/// use playscout::config::load_config;
/// use playscout::crawler::run_crawl;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new("config.toml"))?;
/// let report = run_crawl(config).await?;
/// println!("Parsed {} listings", report.total_parsed());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: Config) -> Result<CrawlReport, ScoutError> {
    let mut exporter: Option<Box<dyn Exporter>> = match config.output.format {
        OutputFormat::Csv => Some(Box::new(CsvExporter::new(&config.output.csv_path))),
        OutputFormat::Sqlite => Some(Box::new(SqliteExporter::new(&config.output.database_path))),
        OutputFormat::Stdout => None,
    };

    let crawler = Crawler::new(config);
    crawler.run(exporter.as_deref_mut(), None).await
}
