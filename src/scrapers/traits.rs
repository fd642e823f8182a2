use crate::models::Listing;
use crate::scrapers::types::SearchFilter;
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for all listing scrapers
/// This allows easy addition of new classifieds sites in the future
#[async_trait]
pub trait ScraperTrait: Send + Sync {
    /// Scrape listings matching the filter from the source
    async fn scrape(&self, filter: &SearchFilter) -> Result<Vec<Listing>>;

    /// Get the name of the scraper source
    fn source_name(&self) -> &'static str;
}
