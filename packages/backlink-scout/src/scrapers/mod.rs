//! Page content providers.

mod firecrawl;
mod http;

pub use firecrawl::FirecrawlScraper;
pub use http::HttpFetcher;
