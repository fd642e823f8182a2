use serde::{Deserialize, Serialize};

use crate::models::Listing;
use crate::scrapers::text::normalize_text;

/// Filter criteria for one scrape run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchFilter {
    /// Wanted neighbourhood names, matched as case-insensitive substrings
    /// of the listing location. Empty means "accept any location".
    pub locations: Vec<String>,
    /// Minimum price (EUR), inclusive.
    pub min_price: i64,
    /// Maximum price (EUR), inclusive.
    pub max_price: i64,
    /// Number of index pages to walk through.
    pub pages: u32,
}

impl Default for SearchFilter {
    fn default() -> Self {
        Self {
            locations: Vec::new(),
            min_price: 0,
            max_price: 9_999_999,
            pages: 5,
        }
    }
}

impl SearchFilter {
    /// True when the location passes the substring filter. An absent
    /// location is treated as the empty string, so it only passes when
    /// no locations were requested.
    pub fn location_ok(&self, location: Option<&str>) -> bool {
        if self.locations.is_empty() {
            return true;
        }
        let normalized = normalize_text(location.unwrap_or("")).to_lowercase();
        self.locations
            .iter()
            .any(|wanted| normalized.contains(&normalize_text(wanted).to_lowercase()))
    }

    /// True when the price falls within the inclusive bounds.
    pub fn price_ok(&self, value: i64) -> bool {
        self.min_price <= value && value <= self.max_price
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        self.location_ok(listing.location.as_deref()) && self.price_ok(listing.price_value)
    }
}
