use serde::Deserialize;

/// Main configuration structure for Playscout
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Search keywords, processed in order
    pub keywords: Vec<String>,

    pub crawler: CrawlerConfig,

    #[serde(default)]
    pub endpoints: EndpointConfig,

    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Maximum identifiers collected per keyword (0 = unlimited)
    #[serde(rename = "max-results-per-keyword", default)]
    pub max_results_per_keyword: u32,

    /// Delay between successful requests (milliseconds)
    #[serde(rename = "download-delay-ms", default)]
    pub download_delay_ms: u64,

    /// Search request failures tolerated before a keyword's pagination is
    /// abandoned
    #[serde(rename = "max-request-errors", default = "default_max_request_errors")]
    pub max_request_errors: u32,
}

fn default_max_request_errors() -> u32 {
    5
}

/// Store endpoint templates and transport headers
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointConfig {
    /// Search endpoint template; `{keyword}` is replaced per keyword
    #[serde(rename = "search-url", default = "default_search_url")]
    pub search_url: String,

    /// Base URL prefixed onto listing identifiers for detail fetches
    #[serde(rename = "detail-url-prefix", default = "default_detail_url_prefix")]
    pub detail_url_prefix: String,

    /// Href prefix that marks an anchor as a listing identifier
    #[serde(rename = "listing-path-prefix", default = "default_listing_path_prefix")]
    pub listing_path_prefix: String,

    /// POST body for the first search request of a keyword
    #[serde(rename = "initial-payload", default = "default_initial_payload")]
    pub initial_payload: String,

    /// POST body template for subsequent pages; `{token}` is replaced with
    /// the decoded continuation token
    #[serde(rename = "next-page-payload", default = "default_next_page_payload")]
    pub next_page_payload: String,

    /// Accept-Language header sent on every request
    #[serde(rename = "accept-language", default = "default_accept_language")]
    pub accept_language: String,

    /// User-Agent header sent on every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

fn default_search_url() -> String {
    "https://play.google.com/store/search?q={keyword}&c=apps".to_string()
}

fn default_detail_url_prefix() -> String {
    "https://play.google.com".to_string()
}

fn default_listing_path_prefix() -> String {
    "/store/apps/details".to_string()
}

fn default_initial_payload() -> String {
    "ipf=1&xhr=1".to_string()
}

fn default_next_page_payload() -> String {
    "start=0&num=0&numChildren=0&pagTok={token}&ipf=1&xhr=1".to_string()
}

fn default_accept_language() -> String {
    "en-US,en;q=0.8".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string()
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            search_url: default_search_url(),
            detail_url_prefix: default_detail_url_prefix(),
            listing_path_prefix: default_listing_path_prefix(),
            initial_payload: default_initial_payload(),
            next_page_payload: default_next_page_payload(),
            accept_language: default_accept_language(),
            user_agent: default_user_agent(),
        }
    }
}

/// Where harvested records go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// CSV file at `csv-path`
    Csv,
    /// SQLite database at `database-path`
    Sqlite,
    /// Plain-text records on stdout
    Stdout,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,

    /// Path to the CSV file (used when format = "csv")
    #[serde(rename = "csv-path", default = "default_csv_path")]
    pub csv_path: String,

    /// Path to the SQLite database (used when format = "sqlite")
    #[serde(rename = "database-path", default = "default_database_path")]
    pub database_path: String,
}

fn default_csv_path() -> String {
    "./apps.csv".to_string()
}

fn default_database_path() -> String {
    "./apps.db".to_string()
}
