//! Listing identifier extraction from search result pages
//!
//! Search responses are HTML fragments full of anchors; the ones that matter
//! point at listing detail pages. Identifiers are returned in document order
//! with duplicates kept — the pagination loop owns dedup and its counters.

use scraper::{Html, Selector};

/// Extracts listing identifiers (detail-page hrefs) from a response body.
///
/// An anchor counts when its `href` starts with `path_prefix` (e.g.
/// `/store/apps/details`). The href is returned as-is: an opaque path
/// fragment that the retrieval loop later prefixes with the store base URL.
pub fn extract_listing_paths(html: &str, path_prefix: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut paths = Vec::new();

    if let Ok(anchor_selector) = Selector::parse("a[href]") {
        for element in document.select(&anchor_selector) {
            if let Some(href) = element.value().attr("href") {
                if href.starts_with(path_prefix) {
                    paths.push(href.to_string());
                }
            }
        }
    }

    paths
}
