//! Response-body extractors
//!
//! This module knows how to read the store's pages:
//! - [`listing`]: search response body → listing identifiers, in document
//!   order, duplicates included (dedup belongs to the pagination loop)
//! - [`token`]: search response body → optional continuation token
//! - [`detail`]: detail page body → structured [`crate::AppRecord`]
//!
//! Other layers decide when to fetch, how to retry, and where records go.

mod detail;
mod listing;
mod token;

pub use detail::parse_detail_page;
pub use listing::extract_listing_paths;
pub use token::TokenExtractor;

use thiserror::Error;

/// Errors that can occur while extracting structured data from a page
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}
