//! Page content capabilities: rich scraping and raw HTTP fetching.
//!
//! Both are tiers of the same fallback chain. A scraper (JavaScript
//! rendering, markdown conversion) is tried first; the raw fetcher only
//! runs when the scrape produced no usable text.

use async_trait::async_trait;

use crate::error::SourceResult;
use crate::types::{FetchedPage, PagePayload};

/// Rich scraping provider.
#[async_trait]
pub trait PageScraper: Send + Sync {
    /// Scrape a single URL.
    async fn scrape(&self, url: &str) -> SourceResult<PagePayload>;

    /// Scraper name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}

/// Plain HTTP GET of a page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch a URL. Statuses of 400 and above are errors.
    async fn fetch(&self, url: &str) -> SourceResult<FetchedPage>;
}
