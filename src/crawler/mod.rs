//! Crawler module: the crawl-and-retry engine
//!
//! This module contains the core crawling logic:
//! - HTTP fetching and outcome classification
//! - The search pagination loop (token chain, dedup, error budget, cap)
//! - The detail retrieval loop (backoff with ceiling, client reset)
//! - Overall crawl coordination and the run report

mod coordinator;
mod fetcher;
mod pagination;
mod retrieval;

pub use coordinator::{run_crawl, Crawler};
pub use fetcher::{build_http_client, fetch_detail, post_search, FetchOutcome};
pub use pagination::{collect_listing_ids, CollectOutcome};
pub use retrieval::{fetch_listing_details, RetrievalOutcome};
