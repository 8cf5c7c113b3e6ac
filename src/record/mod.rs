//! Listing record model
//!
//! The structured result of parsing one detail page. Records are owned by
//! the retrieval loop until they are handed to an exporter or callback;
//! when neither is configured they are printed in their plain-text form.

use chrono::{DateTime, Utc};
use std::fmt;

/// One harvested store listing
#[derive(Debug, Clone)]
pub struct AppRecord {
    /// Detail page URL the record was parsed from
    pub url: String,

    /// Listing name (the only required field)
    pub name: String,

    /// Publisher/developer name
    pub developer: Option<String>,

    /// Store category
    pub category: Option<String>,

    /// Whether the listing is free
    pub is_free: bool,

    /// Display price for paid listings
    pub price: Option<String>,

    /// Aggregate rating value
    pub score: Option<f64>,

    /// Number of reviews behind the rating
    pub review_count: Option<u64>,

    /// Listing description text
    pub description: Option<String>,

    /// Last-updated date as shown on the page
    pub updated: Option<String>,

    /// When this record was harvested
    pub scraped_at: DateTime<Utc>,
}

impl AppRecord {
    /// Creates a record with the required fields set and everything else empty
    pub fn new(url: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
            developer: None,
            category: None,
            is_free: true,
            price: None,
            score: None,
            review_count: None,
            description: None,
            updated: None,
            scraped_at: Utc::now(),
        }
    }

    /// Column names for CSV export, in `to_csv_record` order
    pub fn csv_header() -> &'static [&'static str] {
        &[
            "name",
            "developer",
            "category",
            "is_free",
            "price",
            "score",
            "review_count",
            "updated",
            "url",
            "scraped_at",
        ]
    }

    /// Flattens the record into one CSV row matching `csv_header`
    pub fn to_csv_record(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.developer.clone().unwrap_or_default(),
            self.category.clone().unwrap_or_default(),
            self.is_free.to_string(),
            self.price.clone().unwrap_or_default(),
            self.score.map(|s| s.to_string()).unwrap_or_default(),
            self.review_count.map(|c| c.to_string()).unwrap_or_default(),
            self.updated.clone().unwrap_or_default(),
            self.url.clone(),
            self.scraped_at.to_rfc3339(),
        ]
    }
}

impl fmt::Display for AppRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(dev) = &self.developer {
            write!(f, " by {}", dev)?;
        }
        if let Some(cat) = &self.category {
            write!(f, " [{}]", cat)?;
        }
        if self.is_free {
            write!(f, " (free)")?;
        } else if let Some(price) = &self.price {
            write!(f, " ({})", price)?;
        }
        if let (Some(score), Some(count)) = (self.score, self.review_count) {
            write!(f, " rated {:.1} over {} reviews", score, count)?;
        }
        write!(f, " <{}>", self.url)
    }
}
