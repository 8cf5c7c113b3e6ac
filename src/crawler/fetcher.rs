//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the harvester:
//! - Building HTTP clients with the configured headers
//! - POST requests against the search endpoint
//! - GET requests for listing detail pages
//! - Outcome classification for the two retry policies upstream
//!
//! Response bodies are decoded with charset detection (UTF-8 default) by
//! reqwest. Cookie state lives inside the client, which is why the
//! retrieval loop sheds a misbehaving session by building a fresh client.

use crate::config::EndpointConfig;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT_LANGUAGE, CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use std::time::Duration;

/// Result of one search or detail fetch
#[derive(Debug)]
pub enum FetchOutcome {
    /// The server answered with a success status
    Success {
        /// HTTP status code
        status: u16,
        /// Decoded response body
        body: String,
    },

    /// The server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status: u16,
    },

    /// The request never completed (connection refused, timeout, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchOutcome {
    /// Short description of a failed outcome, for logging.
    ///
    /// A success with an empty body describes itself too — the retrieval
    /// loop treats that as a failure.
    pub fn describe(&self) -> String {
        match self {
            FetchOutcome::Success { body, .. } if body.is_empty() => "empty body".to_string(),
            FetchOutcome::Success { status, .. } => format!("HTTP {}", status),
            FetchOutcome::HttpError { status } => format!("HTTP {}", status),
            FetchOutcome::NetworkError { error } => format!("network error: {}", error),
        }
    }
}

/// Builds an HTTP client with the configured transport headers
///
/// # Arguments
///
/// * `endpoints` - Endpoint configuration carrying the headers
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(endpoints: &EndpointConfig) -> Result<Client, reqwest::Error> {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(&endpoints.accept_language) {
        headers.insert(ACCEPT_LANGUAGE, value);
    }
    if let Ok(value) = HeaderValue::from_str(&endpoints.user_agent) {
        headers.insert(USER_AGENT, value);
    }

    Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .cookie_store(true)
        .gzip(true)
        .brotli(true)
        .build()
}

/// POSTs a search payload and classifies the outcome
pub async fn post_search(client: &Client, url: &str, payload: &str) -> FetchOutcome {
    let request = client
        .post(url)
        .header(
            CONTENT_TYPE,
            "application/x-www-form-urlencoded;charset=UTF-8",
        )
        .body(payload.to_string());

    classify(request.send().await).await
}

/// GETs a listing detail page and classifies the outcome
pub async fn fetch_detail(client: &Client, url: &str) -> FetchOutcome {
    classify(client.get(url).send().await).await
}

/// Converts a reqwest result into a [`FetchOutcome`]
async fn classify(result: Result<reqwest::Response, reqwest::Error>) -> FetchOutcome {
    match result {
        Ok(response) => {
            let status = response.status();

            if !status.is_success() {
                return FetchOutcome::HttpError {
                    status: status.as_u16(),
                };
            }

            match response.text().await {
                Ok(body) => FetchOutcome::Success {
                    status: status.as_u16(),
                    body,
                },
                Err(e) => FetchOutcome::NetworkError {
                    error: e.to_string(),
                },
            }
        }
        Err(e) => {
            if e.is_timeout() {
                FetchOutcome::NetworkError {
                    error: "request timeout".to_string(),
                }
            } else if e.is_connect() {
                FetchOutcome::NetworkError {
                    error: "connection refused".to_string(),
                }
            } else {
                FetchOutcome::NetworkError {
                    error: e.to_string(),
                }
            }
        }
    }
}
