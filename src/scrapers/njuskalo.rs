use crate::models::Listing;
use crate::scrapers::text::{normalize_text, parse_price};
use crate::scrapers::traits::ScraperTrait;
use crate::scrapers::types::SearchFilter;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{debug, info, warn};

const LISTING_SELECTOR: &str = "li.EntityList-item";
const TITLE_SELECTOR: &str = "h3.entity-title a.link";
const DESCRIPTION_SELECTOR: &str = ".entity-description-main";
const DATE_SELECTOR: &str = ".entity-pub-date time";

/// Price element variants seen on the index page, tried in order.
const PRICE_SELECTORS: &[&str] = &[
    ".price--hrk",
    ".price--eur",
    ".price",
    "strong.price",
    ".entity-price",
];

/// Dedicated location span on the index page.
const LOCATION_SPAN_SELECTOR: &str = "span.ClassifiedDetailBasicDetails-textWrapContainer";

/// Literal marker some descriptions carry in front of the neighbourhood.
const LOCATION_MARKER: &str = "Lokacija:";

/// Last-resort location elements on the index page, tried in order.
const LOCATION_ALT_SELECTORS: &[&str] = &[
    ".entity-description-subtitle",
    ".entity-location",
    ".entity-location-link",
];

/// Location elements on an individual ad page, tried in order.
const DETAIL_LOCATION_SELECTORS: &[&str] = &[
    "span.ClassifiedDetailBasicDetails-textWrapContainer",
    "div.ClassifiedDetailBasicDetails div",
    ".classified-detail__basic .classified-detail__value",
];

/// Scraper configuration. Passed in at construction so tests can point
/// `base_url` at a local server instead of the live site.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Listing index endpoint; the page number goes into the `page`
    /// query parameter.
    pub base_url: String,
    /// Scheme and host prepended to relative ad hrefs.
    pub site_root: String,
    pub user_agent: String,
    pub timeout: Duration,
    /// Pause between index page requests.
    pub page_delay: Duration,
    /// When the index gives no location, fetch the individual ad page
    /// and look for one there.
    pub fetch_details: bool,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.njuskalo.hr/iznajmljivanje-stanova/zagreb".to_string(),
            site_root: "https://www.njuskalo.hr".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64)".to_string(),
            timeout: Duration::from_secs(15),
            page_delay: Duration::from_secs(2),
            fetch_details: false,
        }
    }
}

/// Njuškalo rental-listing scraper
pub struct NjuskaloScraper {
    client: Client,
    config: ScraperConfig,
}

fn element_text(el: ElementRef) -> String {
    normalize_text(&el.text().collect::<Vec<_>>().join(" "))
}

/// Text of the first element under `node` matching `selector`, or
/// `None` when the element is absent or its text is empty.
fn select_text(node: &ElementRef, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    node.select(&sel)
        .next()
        .map(element_text)
        .filter(|text| !text.is_empty())
}

fn first_matching_text(node: &ElementRef, selectors: &[&str]) -> Option<String> {
    selectors.iter().find_map(|sel| select_text(node, sel))
}

/// Location fallback chain on an index-page listing node: dedicated
/// span, then a "Lokacija:" marker inside the description, then the
/// alternative class selectors.
fn extract_location(ad: &ElementRef) -> Option<String> {
    if let Some(location) = select_text(ad, LOCATION_SPAN_SELECTOR) {
        return Some(location);
    }

    if let Some(description) = select_text(ad, DESCRIPTION_SELECTOR) {
        if let Some(pos) = description.rfind(LOCATION_MARKER) {
            let after = normalize_text(&description[pos + LOCATION_MARKER.len()..]);
            if !after.is_empty() {
                return Some(after);
            }
        }
    }

    first_matching_text(ad, LOCATION_ALT_SELECTORS)
}

/// Location fallback chain on an individual ad page.
fn location_from_detail_page(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    first_matching_text(&document.root_element(), DETAIL_LOCATION_SELECTORS)
}

impl NjuskaloScraper {
    /// Create a scraper against the live site with default settings
    pub fn new() -> Result<Self> {
        Self::with_config(ScraperConfig::default())
    }

    /// Create a scraper with custom configuration
    pub fn with_config(config: ScraperConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    /// Fetch one index page. Any non-200 status or transport error is
    /// logged and reported as `None`, which ends pagination.
    async fn fetch_page(&self, page: u32) -> Option<String> {
        let url = format!("{}?page={}", self.config.base_url, page);

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Request for page {} failed: {}", page, e);
                return None;
            }
        };

        if !response.status().is_success() {
            warn!("Page {} returned status {}", page, response.status());
            return None;
        }

        match response.text().await {
            Ok(body) => {
                debug!("Downloaded {} bytes for page {}", body.len(), page);
                Some(body)
            }
            Err(e) => {
                warn!("Failed to read body of page {}: {}", page, e);
                None
            }
        }
    }

    /// Fetch an individual ad page and try the detail-page location
    /// selectors. Failures yield `None`; the listing stays usable.
    async fn fetch_location_from_ad(&self, url: &str) -> Option<String> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!("Detail request for {} failed: {}", url, e);
                return None;
            }
        };

        if !response.status().is_success() {
            debug!("Detail page {} returned status {}", url, response.status());
            return None;
        }

        let body = response.text().await.ok()?;
        location_from_detail_page(&body)
    }

    fn extract_title_and_link(&self, ad: &ElementRef) -> (Option<String>, Option<String>) {
        let Ok(sel) = Selector::parse(TITLE_SELECTOR) else {
            return (None, None);
        };
        let Some(anchor) = ad.select(&sel).next() else {
            return (None, None);
        };

        let title = Some(element_text(anchor)).filter(|text| !text.is_empty());
        let link = anchor.value().attr("href").map(|href| {
            if href.starts_with("http") {
                href.to_string()
            } else {
                format!("{}{}", self.config.site_root, href)
            }
        });

        (title, link)
    }

    /// Extract every listing on one index page. No filtering happens
    /// here; absent elements become `None`.
    pub fn parse_listing_page(&self, html: &str) -> Vec<Listing> {
        let document = Html::parse_document(html);
        let ad_selector = Selector::parse(LISTING_SELECTOR).unwrap();

        let mut listings = Vec::new();
        for ad in document.select(&ad_selector) {
            let (title, link) = self.extract_title_and_link(&ad);
            let price_text = first_matching_text(&ad, PRICE_SELECTORS);
            let price_value = parse_price(price_text.as_deref().unwrap_or(""));

            listings.push(Listing {
                title,
                price_text,
                price_value,
                description: select_text(&ad, DESCRIPTION_SELECTOR),
                location: extract_location(&ad),
                date: select_text(&ad, DATE_SELECTOR),
                link,
                scraped_at: Utc::now(),
            });
        }

        debug!("Extracted {} listings from page", listings.len());
        listings
    }
}

#[async_trait]
impl ScraperTrait for NjuskaloScraper {
    async fn scrape(&self, filter: &SearchFilter) -> Result<Vec<Listing>> {
        info!(
            "Starting Njuškalo scrape: up to {} pages, price {}-{}, locations {:?}",
            filter.pages, filter.min_price, filter.max_price, filter.locations
        );

        let mut matches = Vec::new();

        for page in 1..=filter.pages {
            debug!("Fetching page {}", page);

            let Some(body) = self.fetch_page(page).await else {
                // Keep whatever was collected so far.
                break;
            };

            let mut listings = self.parse_listing_page(&body);

            // A page with zero raw listings means the result set has
            // ended. A page where everything gets filtered out does
            // not stop pagination.
            if listings.is_empty() {
                info!("Page {} has no listings, stopping", page);
                break;
            }

            if self.config.fetch_details {
                for listing in listings.iter_mut() {
                    if listing.location.is_none() {
                        if let Some(link) = listing.link.clone() {
                            listing.location = self.fetch_location_from_ad(&link).await;
                        }
                    }
                }
            }

            let raw_count = listings.len();
            let before = matches.len();
            matches.extend(listings.into_iter().filter(|l| filter.matches(l)));
            info!(
                "Page {}: kept {} of {} listings",
                page,
                matches.len() - before,
                raw_count
            );

            if page < filter.pages {
                tokio::time::sleep(self.config.page_delay).await;
            }
        }

        info!("Scrape finished with {} matching listings", matches.len());
        Ok(matches)
    }

    fn source_name(&self) -> &'static str {
        "Njuškalo"
    }
}
