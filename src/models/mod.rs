use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One scraped rental ad after extraction and normalization.
///
/// `None` means the corresponding element was absent from the markup;
/// extraction never produces `Some` with an empty string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub title: Option<String>,
    /// Raw price text as shown on the page, e.g. "1.200 €".
    pub price_text: Option<String>,
    /// Integer price parsed out of `price_text`; 0 when unparseable.
    pub price_value: i64,
    pub description: Option<String>,
    pub location: Option<String>,
    /// Publish date text as shown on the page.
    pub date: Option<String>,
    /// Absolute URL of the ad.
    pub link: Option<String>,
    pub scraped_at: DateTime<Utc>,
}

/// Summary of a completed scrape run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeOutcome {
    pub count: usize,
    pub output_path: PathBuf,
}
