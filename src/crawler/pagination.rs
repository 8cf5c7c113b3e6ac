//! Search pagination loop
//!
//! Walks one keyword's search result stream: POST the current payload,
//! collect identifiers, pull the continuation token out of the body, embed
//! it in the next payload, repeat. The loop never fails — every exit path
//! returns whatever identifiers were accumulated.
//!
//! Failure policy here is deliberately different from the retrieval loop's:
//! a failed search request is retried immediately with the same payload,
//! bounded only by the error budget. No backoff, no client reset.

use crate::codec::encode_non_ascii;
use crate::config::{CrawlerConfig, EndpointConfig};
use crate::crawler::fetcher::{post_search, FetchOutcome};
use crate::extract::{extract_listing_paths, TokenExtractor};
use crate::state::KeywordSession;
use reqwest::Client;

/// What one keyword's pagination produced
#[derive(Debug, Default)]
pub struct CollectOutcome {
    /// Distinct identifiers, in discovery order
    pub ids: Vec<String>,

    /// Count of identifiers inserted
    pub inserted: u32,

    /// Count of duplicate identifiers skipped
    pub skipped: u32,

    /// Count of failed search requests
    pub errors: u32,

    /// Count of search requests issued
    pub requests: u32,
}

/// Collects listing identifiers for one keyword.
///
/// Terminates when the continuation token disappears (end of stream), when
/// `max-results-per-keyword` is reached (mid-page if need be), or when the
/// request error budget is exhausted. All three paths return the partial
/// result — callers get a best-effort set.
pub async fn collect_listing_ids(
    client: &Client,
    crawler: &CrawlerConfig,
    endpoints: &EndpointConfig,
    tokens: &TokenExtractor,
    keyword: &str,
) -> CollectOutcome {
    tracing::info!("Crawling search term [ {} ]", keyword);

    let search_url = endpoints
        .search_url
        .replace("{keyword}", &urlencoding::encode(keyword));

    let max_results = crawler.max_results_per_keyword;
    let mut session = KeywordSession::new();
    let mut payload = endpoints.initial_payload.clone();
    let mut errors = 0u32;
    let mut requests = 0u32;

    'pages: loop {
        requests += 1;

        let body = match post_search(client, &search_url, &payload).await {
            FetchOutcome::Success { body, .. } => body,
            failure => {
                tracing::error!("Search request failed: {}", failure.describe());
                errors += 1;
                if errors > crawler.max_request_errors {
                    tracing::info!("Search stopped: request error budget exhausted");
                    break 'pages;
                }
                // Retry the same payload immediately
                continue 'pages;
            }
        };

        for id in extract_listing_paths(&body, &endpoints.listing_path_prefix) {
            if session.insert(&id) {
                tracing::info!("Inserted listing: {}", id);
                if max_results > 0 && session.inserted() >= max_results {
                    tracing::info!("Reached max results for [ {} ]", keyword);
                    break 'pages;
                }
            } else {
                tracing::debug!("Duplicate listing skipped: {}", id);
            }
        }

        // No token means we have reached the end of the stream
        match tokens.extract(&body) {
            Some(token) => {
                payload = endpoints
                    .next_page_payload
                    .replace("{token}", &encode_non_ascii(&token));
            }
            None => break 'pages,
        }
    }

    tracing::info!(
        "Search term [ {} ] done: {} inserted, {} skipped, {} errors",
        keyword,
        session.inserted(),
        session.skipped(),
        errors
    );

    CollectOutcome {
        inserted: session.inserted(),
        skipped: session.skipped(),
        ids: session.into_ids(),
        errors,
        requests,
    }
}
