//! Integration tests for the crawl engine
//!
//! These tests use wiremock to create mock search/detail endpoints and test
//! the pagination loop, the retrieval loop, and the full crawl end-to-end.

use playscout::config::{Config, CrawlerConfig, EndpointConfig, OutputConfig, OutputFormat};
use playscout::crawler::{
    build_http_client, collect_listing_ids, fetch_listing_details, run_crawl,
};
use playscout::extract::TokenExtractor;
use playscout::output::{Exporter, OutputResult};
use playscout::record::AppRecord;
use playscout::state::RetryState;
use std::time::Duration;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointed at the mock server
fn test_config(base_url: &str, max_results: u32) -> Config {
    Config {
        keywords: vec!["calculator".to_string()],
        crawler: CrawlerConfig {
            max_results_per_keyword: max_results,
            download_delay_ms: 0,
            max_request_errors: 2,
        },
        endpoints: EndpointConfig {
            search_url: format!("{}/store/search?q={{keyword}}&c=apps", base_url),
            detail_url_prefix: base_url.to_string(),
            ..EndpointConfig::default()
        },
        output: OutputConfig {
            format: OutputFormat::Stdout,
            csv_path: "./apps.csv".to_string(),
            database_path: "./apps.db".to_string(),
        },
    }
}

/// Builds a search response body with listing anchors and an optional
/// continuation token literal
fn search_page(ids: &[&str], token: Option<&str>) -> String {
    let mut body = String::from("<html><body>");
    for id in ids {
        body.push_str(&format!(
            r#"<a href="/store/apps/details?id={}">listing</a>"#,
            id
        ));
    }
    body.push_str("</body>");
    if let Some(token) = token {
        body.push_str(&format!(
            r"<script>var page = '[\42{}\42,42]\n';</script>",
            token
        ));
    }
    body.push_str("</html>");
    body
}

/// Builds a minimal parseable detail page
fn detail_page(name: &str) -> String {
    format!(
        r#"<html><body><div itemprop="name">{}</div><meta itemprop="price" content="0"></body></html>"#,
        name
    )
}

/// Exporter that collects records in memory
#[derive(Default)]
struct VecExporter {
    opened: bool,
    closed: bool,
    records: Vec<AppRecord>,
}

impl Exporter for VecExporter {
    fn open(&mut self) -> OutputResult<()> {
        self.opened = true;
        Ok(())
    }

    fn write(&mut self, record: &AppRecord) -> OutputResult<()> {
        self.records.push(record.clone());
        Ok(())
    }

    fn close(&mut self) -> OutputResult<()> {
        self.closed = true;
        Ok(())
    }
}

#[tokio::test]
async fn test_pagination_two_pages_with_duplicates() {
    let mock_server = MockServer::start().await;
    let config = test_config(&mock_server.uri(), 0);

    // Page 1: [a, b, a] plus a continuation token; consumed by the first POST
    Mock::given(method("POST"))
        .and(path("/store/search"))
        .and(query_param("q", "calculator"))
        .respond_with(ResponseTemplate::new(200).set_body_string(search_page(
            &["com.acme.a", "com.beta.b", "com.acme.a"],
            Some("GAEiAggU:S:ANO1"),
        )))
        .up_to_n_times(1)
        .expect(1)
        .mount(&mock_server)
        .await;

    // Page 2: [c], no token — must be requested with the embedded token
    Mock::given(method("POST"))
        .and(path("/store/search"))
        .and(body_string_contains("pagTok=GAEiAggU:S:ANO1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(search_page(&["com.gamma.c"], None)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = build_http_client(&config.endpoints).unwrap();
    let tokens = TokenExtractor::new();
    let outcome = collect_listing_ids(
        &client,
        &config.crawler,
        &config.endpoints,
        &tokens,
        "calculator",
    )
    .await;

    assert_eq!(
        outcome.ids,
        vec![
            "/store/apps/details?id=com.acme.a",
            "/store/apps/details?id=com.beta.b",
            "/store/apps/details?id=com.gamma.c",
        ]
    );
    assert_eq!(outcome.inserted, 3);
    assert_eq!(outcome.skipped, 1);
    assert_eq!(outcome.errors, 0);
    assert_eq!(outcome.requests, 2);
}

#[tokio::test]
async fn test_pagination_token_is_decoded_before_embedding() {
    let mock_server = MockServer::start().await;
    let config = test_config(&mock_server.uri(), 0);

    // The token literal carries a doubled escape for '='; the next payload
    // must contain the decoded character
    Mock::given(method("POST"))
        .and(path("/store/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(search_page(
            &["com.acme.a"],
            Some(r"GAEiAggU\\u003d:S:ANO1"),
        )))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/store/search"))
        .and(body_string_contains("pagTok=GAEiAggU=:S:ANO1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(search_page(&[], None)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = build_http_client(&config.endpoints).unwrap();
    let tokens = TokenExtractor::new();
    let outcome = collect_listing_ids(
        &client,
        &config.crawler,
        &config.endpoints,
        &tokens,
        "calculator",
    )
    .await;

    assert_eq!(outcome.requests, 2);
}

#[tokio::test]
async fn test_pagination_single_page_without_token() {
    let mock_server = MockServer::start().await;
    let config = test_config(&mock_server.uri(), 0);

    // No continuation token: exactly one request must be made
    Mock::given(method("POST"))
        .and(path("/store/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(search_page(&["com.acme.a", "com.beta.b"], None)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = build_http_client(&config.endpoints).unwrap();
    let tokens = TokenExtractor::new();
    let outcome = collect_listing_ids(
        &client,
        &config.crawler,
        &config.endpoints,
        &tokens,
        "calculator",
    )
    .await;

    assert_eq!(outcome.requests, 1);
    assert_eq!(outcome.inserted, 2);
}

#[tokio::test]
async fn test_pagination_cap_stops_mid_page() {
    let mock_server = MockServer::start().await;
    let config = test_config(&mock_server.uri(), 2);

    // Three fresh identifiers on one page, but the cap is 2; the token
    // would promise another page that must never be requested
    Mock::given(method("POST"))
        .and(path("/store/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(search_page(
            &["com.acme.a", "com.beta.b", "com.gamma.c"],
            Some("GAEiAggU:S:ANO1"),
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = build_http_client(&config.endpoints).unwrap();
    let tokens = TokenExtractor::new();
    let outcome = collect_listing_ids(
        &client,
        &config.crawler,
        &config.endpoints,
        &tokens,
        "calculator",
    )
    .await;

    assert_eq!(outcome.inserted, 2);
    assert_eq!(outcome.ids.len(), 2);
    assert_eq!(outcome.requests, 1);
}

#[tokio::test]
async fn test_pagination_error_budget_exhaustion() {
    let mock_server = MockServer::start().await;
    let config = test_config(&mock_server.uri(), 0);

    // Every search request fails; budget is 2, so the loop tries three
    // times before giving up with an empty (partial) result
    Mock::given(method("POST"))
        .and(path("/store/search"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = build_http_client(&config.endpoints).unwrap();
    let tokens = TokenExtractor::new();
    let outcome = collect_listing_ids(
        &client,
        &config.crawler,
        &config.endpoints,
        &tokens,
        "calculator",
    )
    .await;

    assert!(outcome.ids.is_empty());
    assert_eq!(outcome.errors, 3);
    assert_eq!(outcome.requests, 3);
}

#[tokio::test]
async fn test_retrieval_delivers_to_exporter_and_callback() {
    let mock_server = MockServer::start().await;
    let config = test_config(&mock_server.uri(), 0);

    Mock::given(method("GET"))
        .and(path("/store/apps/details"))
        .and(query_param("id", "com.acme.a"))
        .respond_with(ResponseTemplate::new(200).set_body_string(detail_page("App A")))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/store/apps/details"))
        .and(query_param("id", "com.beta.b"))
        .respond_with(ResponseTemplate::new(200).set_body_string(detail_page("App B")))
        .mount(&mock_server)
        .await;

    let ids = vec![
        "/store/apps/details?id=com.acme.a".to_string(),
        "/store/apps/details?id=com.beta.b".to_string(),
    ];

    let mut exporter = VecExporter::default();
    let mut seen = Vec::new();
    let mut callback = |record: &AppRecord| seen.push(record.name.clone());
    let mut retry = RetryState::new();

    let outcome = fetch_listing_details(
        &config.endpoints,
        &ids,
        Duration::ZERO,
        Some(&mut exporter),
        Some(&mut callback),
        &mut retry,
    )
    .await
    .unwrap();

    assert_eq!(outcome.parsed, 2);
    assert_eq!(outcome.failed, 0);
    assert_eq!(exporter.records.len(), 2);
    assert_eq!(exporter.records[0].name, "App A");
    assert_eq!(seen, vec!["App A", "App B"]);
}

#[tokio::test]
async fn test_retrieval_failure_backs_off_and_advances() {
    let mock_server = MockServer::start().await;
    let config = test_config(&mock_server.uri(), 0);

    // The failing listing must be hit exactly once: the policy inserts a
    // backoff before the next identifier, it does not re-fetch this one
    Mock::given(method("GET"))
        .and(path("/store/apps/details"))
        .and(query_param("id", "com.broken.x"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/store/apps/details"))
        .and(query_param("id", "com.acme.a"))
        .respond_with(ResponseTemplate::new(200).set_body_string(detail_page("App A")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let ids = vec![
        "/store/apps/details?id=com.broken.x".to_string(),
        "/store/apps/details?id=com.acme.a".to_string(),
    ];

    let mut exporter = VecExporter::default();
    let mut retry = RetryState::new();
    let started = std::time::Instant::now();

    let outcome = fetch_listing_details(
        &config.endpoints,
        &ids,
        Duration::ZERO,
        Some(&mut exporter),
        None,
        &mut retry,
    )
    .await
    .unwrap();

    // First failure sleeps 2^1 = 2 seconds before moving on
    assert!(started.elapsed() >= Duration::from_secs(2));

    assert_eq!(outcome.failed, 1);
    assert_eq!(outcome.parsed, 1);
    assert_eq!(exporter.records.len(), 1);
    assert_eq!(exporter.records[0].name, "App A");

    // The successful fetch reset the backoff counter
    assert_eq!(retry.counter(), 0);
}

#[tokio::test]
async fn test_full_crawl_writes_csv() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/store/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(search_page(&["com.acme.a"], None)),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/store/apps/details"))
        .and(query_param("id", "com.acme.a"))
        .respond_with(ResponseTemplate::new(200).set_body_string(detail_page("App A")))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("apps.csv");

    let mut config = test_config(&mock_server.uri(), 0);
    config.output = OutputConfig {
        format: OutputFormat::Csv,
        csv_path: csv_path.display().to_string(),
        database_path: "./apps.db".to_string(),
    };

    let report = run_crawl(config).await.unwrap();

    assert_eq!(report.total_discovered(), 1);
    assert_eq!(report.total_parsed(), 1);
    assert_eq!(report.total_failed(), 0);

    let contents = std::fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("name,"));
    assert!(lines[1].starts_with("App A,"));
}
