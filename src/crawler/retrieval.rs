//! Detail retrieval loop
//!
//! Fetches each discovered identifier's detail page, parses it, and hands
//! the record downstream. Failure handling treats the upstream as one
//! shared resource: the backoff counter spans the whole pass and grows on
//! every failure, whichever identifier it hit, resetting only when a fetch
//! succeeds. On failure the client is rebuilt to shed cookies and session
//! artifacts, the backoff wait is slept, and the loop moves on — the failed
//! identifier itself is not re-fetched.

use crate::config::EndpointConfig;
use crate::crawler::fetcher::{build_http_client, fetch_detail, FetchOutcome};
use crate::extract::parse_detail_page;
use crate::output::Exporter;
use crate::record::AppRecord;
use crate::state::RetryState;
use crate::ScoutError;
use std::time::Duration;

/// What one retrieval pass produced
#[derive(Debug, Default)]
pub struct RetrievalOutcome {
    /// Detail pages parsed and delivered
    pub parsed: u32,

    /// Fetches or parses that failed
    pub failed: u32,
}

/// Fetches and parses every identifier's detail page, in order.
///
/// Records go to `exporter` and/or `callback`; with neither configured they
/// are printed in their plain-text form. A single bad identifier — transport
/// failure, empty body, or unparseable page — is logged and counted, never
/// fatal to the pass.
///
/// `retry` is owned by the caller so a pass can start from an injected
/// counter value; it is mutated in place.
pub async fn fetch_listing_details(
    endpoints: &EndpointConfig,
    ids: &[String],
    download_delay: Duration,
    mut exporter: Option<&mut (dyn Exporter + '_)>,
    mut callback: Option<&mut (dyn FnMut(&AppRecord) + '_)>,
    retry: &mut RetryState,
) -> Result<RetrievalOutcome, ScoutError> {
    tracing::info!("Fetching {} listing pages...", ids.len());

    let mut client = build_http_client(endpoints)?;
    let mut outcome = RetrievalOutcome::default();

    for id in ids {
        let detail_url = format!("{}{}", endpoints.detail_url_prefix, id);

        let body = match fetch_detail(&client, &detail_url).await {
            FetchOutcome::Success { body, .. } if !body.is_empty() => body,
            failure => {
                tracing::info!(
                    "Error opening listing page {}: {}",
                    detail_url,
                    failure.describe()
                );
                outcome.failed += 1;

                // Shed cookies and connection state before the next attempt
                match build_http_client(endpoints) {
                    Ok(fresh) => client = fresh,
                    Err(e) => tracing::warn!("Could not rebuild HTTP client: {}", e),
                }

                let wait = retry.record_failure();
                tracing::info!(
                    "Backing off {}s before the next listing (retry counter {})",
                    wait.as_secs(),
                    retry.counter()
                );
                tokio::time::sleep(wait).await;
                continue;
            }
        };

        retry.record_success();

        match parse_detail_page(&body, &detail_url) {
            Ok(record) => {
                deliver(&record, &mut exporter, &mut callback);
                outcome.parsed += 1;

                if !download_delay.is_zero() {
                    tokio::time::sleep(download_delay).await;
                }
            }
            Err(e) => {
                // One unparseable page never aborts the pass
                tracing::error!("Failed to parse {}: {}", detail_url, e);
                outcome.failed += 1;
            }
        }
    }

    tracing::info!("Finished. Parsed listing count: {}", outcome.parsed);
    Ok(outcome)
}

/// Hands one record to the configured destinations
fn deliver(
    record: &AppRecord,
    exporter: &mut Option<&mut (dyn Exporter + '_)>,
    callback: &mut Option<&mut (dyn FnMut(&AppRecord) + '_)>,
) {
    tracing::info!("Parsed listing: {}", record.name);

    if let Some(exporter) = exporter.as_mut() {
        if let Err(e) = exporter.write(record) {
            tracing::error!("Exporter rejected record {}: {}", record.name, e);
        }
    }

    if let Some(callback) = callback.as_mut() {
        callback(record);
    }

    // Default action is printing to screen
    if exporter.is_none() && callback.is_none() {
        println!("{}", record);
    }
}
