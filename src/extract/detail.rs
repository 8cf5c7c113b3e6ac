//! Detail page parsing
//!
//! Turns one listing's detail page into an [`AppRecord`]. The store marks
//! its fields up with `itemprop` microdata; the name is the only field a
//! page must carry, everything else degrades to `None`.

use crate::extract::ExtractError;
use crate::record::AppRecord;
use scraper::{ElementRef, Html, Selector};

/// Parses a detail page body into a record.
///
/// # Arguments
///
/// * `html` - The detail page body
/// * `url` - The URL the page was fetched from (stored on the record)
///
/// # Returns
///
/// * `Ok(AppRecord)` - Parsed record, name field guaranteed non-empty
/// * `Err(ExtractError)` - The page carries no listing name
pub fn parse_detail_page(html: &str, url: &str) -> Result<AppRecord, ExtractError> {
    let document = Html::parse_document(html);

    let name = select_text(&document, "[itemprop='name']")
        .ok_or(ExtractError::MissingField("name"))?;

    let mut record = AppRecord::new(url, name);

    record.developer = select_text(&document, "[itemprop='author'] [itemprop='name']")
        .or_else(|| select_text(&document, "a[itemprop='author']"));
    record.category = select_text(&document, "[itemprop='genre']");
    record.description = select_text(&document, "[itemprop='description']");
    record.updated = select_text(&document, "[itemprop='datePublished']");

    // Price lives in a meta tag; "0" means free
    if let Some(price) = select_content(&document, "meta[itemprop='price']") {
        if price == "0" || price.is_empty() {
            record.is_free = true;
            record.price = None;
        } else {
            record.is_free = false;
            record.price = Some(price);
        }
    }

    record.score = select_content(&document, "meta[itemprop='ratingValue']")
        .and_then(|value| value.parse::<f64>().ok());
    record.review_count = select_content(&document, "meta[itemprop='reviewCount']")
        .and_then(|value| value.replace(',', "").parse::<u64>().ok());

    Ok(record)
}

/// First non-empty text content matched by `selector`
fn select_text(document: &Html, selector: &str) -> Option<String> {
    let parsed = Selector::parse(selector).ok()?;
    document
        .select(&parsed)
        .map(collect_text)
        .find(|text| !text.is_empty())
}

/// First non-empty `content` attribute matched by `selector`
fn select_content(document: &Html, selector: &str) -> Option<String> {
    let parsed = Selector::parse(selector).ok()?;
    document
        .select(&parsed)
        .filter_map(|element| element.value().attr("content"))
        .map(|content| content.trim().to_string())
        .find(|content| !content.is_empty())
}

fn collect_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
