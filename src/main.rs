//! Playscout main entry point
//!
//! Command-line interface for the keyword-driven app store listing
//! harvester.

use clap::Parser;
use playscout::config::{load_config_with_hash, Config, OutputFormat};
use playscout::crawler::run_crawl;
use playscout::output::print_report;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Playscout: a keyword-driven app store listing harvester
///
/// Playscout walks the store's token-paginated search stream for each
/// configured keyword, collects the unique listings it discovers, then
/// fetches and parses every listing's detail page into the configured
/// output.
#[derive(Parser, Debug)]
#[command(name = "playscout")]
#[command(version = "1.0.0")]
#[command(about = "A keyword-driven app store listing harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,

    /// Crawl these keywords instead of the configured ones (repeatable)
    #[arg(short = 'k', long = "keyword", value_name = "KEYWORD")]
    keywords: Vec<String>,

    /// Override max results per keyword (0 = unlimited)
    #[arg(long, value_name = "N")]
    max_results: Option<u32>,

    /// Override the delay between requests, in milliseconds
    #[arg(long, value_name = "MS")]
    delay_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let mut config = match load_config_with_hash(&cli.config) {
        Ok((cfg, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            cfg
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Apply command-line overrides
    if !cli.keywords.is_empty() {
        config.keywords = cli.keywords.clone();
    }
    if let Some(max_results) = cli.max_results {
        config.crawler.max_results_per_keyword = max_results;
    }
    if let Some(delay_ms) = cli.delay_ms {
        config.crawler.download_delay_ms = delay_ms;
    }

    if cli.dry_run {
        handle_dry_run(&config);
        Ok(())
    } else {
        handle_crawl(config).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("playscout=info,warn"),
            1 => EnvFilter::new("playscout=debug,info"),
            2 => EnvFilter::new("playscout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Playscout Dry Run ===\n");

    println!("Crawler Configuration:");
    println!(
        "  Max results per keyword: {}",
        config.crawler.max_results_per_keyword
    );
    println!("  Download delay: {}ms", config.crawler.download_delay_ms);
    println!(
        "  Request error budget: {}",
        config.crawler.max_request_errors
    );

    println!("\nEndpoints:");
    println!("  Search: {}", config.endpoints.search_url);
    println!("  Detail prefix: {}", config.endpoints.detail_url_prefix);
    println!("  Listing path: {}", config.endpoints.listing_path_prefix);
    println!("  Accept-Language: {}", config.endpoints.accept_language);

    println!("\nOutput:");
    match config.output.format {
        OutputFormat::Csv => println!("  CSV file: {}", config.output.csv_path),
        OutputFormat::Sqlite => println!("  SQLite database: {}", config.output.database_path),
        OutputFormat::Stdout => println!("  Plain-text records on stdout"),
    }

    println!("\nKeywords ({}):", config.keywords.len());
    for keyword in &config.keywords {
        println!("  - {}", keyword);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would crawl {} keywords", config.keywords.len());
}

/// Handles the main crawl operation
async fn handle_crawl(config: Config) -> anyhow::Result<()> {
    tracing::info!(
        "Starting crawl: {} keywords, max {} results each",
        config.keywords.len(),
        config.crawler.max_results_per_keyword
    );

    match run_crawl(config).await {
        Ok(report) => {
            print_report(&report);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
