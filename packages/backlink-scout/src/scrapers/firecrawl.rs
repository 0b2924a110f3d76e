//! Firecrawl-based page scraper.
//!
//! Firecrawl renders JavaScript and converts the page to markdown, which
//! makes it the preferred first tier of the excerpt fallback chain.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{ensure_success, SourceError, SourceResult};
use crate::security::ApiKey;
use crate::traits::PageScraper;
use crate::types::PagePayload;

const FIRECRAWL_API_URL: &str = "https://api.firecrawl.dev/v1";

pub struct FirecrawlScraper {
    client: Client,
    api_key: ApiKey,
}

#[derive(Serialize)]
struct ScrapeRequest<'a> {
    url: &'a str,
    formats: [&'static str; 2],
}

#[derive(Deserialize)]
struct ScrapeResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

impl FirecrawlScraper {
    /// Create a new Firecrawl scraper with the given API key.
    pub fn new(api_key: ApiKey, timeout: Duration) -> SourceResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Http(Box::new(e)))?;

        Ok(Self { client, api_key })
    }
}

fn into_payload(response: ScrapeResponse) -> SourceResult<PagePayload> {
    if !response.success {
        return Err(SourceError::Decode("Firecrawl scrape failed".to_string()));
    }
    Ok(response.data.map(PagePayload::Json).unwrap_or_default())
}

#[async_trait]
impl PageScraper for FirecrawlScraper {
    async fn scrape(&self, url: &str) -> SourceResult<PagePayload> {
        let request = ScrapeRequest {
            url,
            formats: ["markdown", "html"],
        };

        let response = self
            .client
            .post(format!("{}/scrape", FIRECRAWL_API_URL))
            .header("Authorization", format!("Bearer {}", self.api_key.expose()))
            .json(&request)
            .send()
            .await?;

        let parsed: ScrapeResponse = ensure_success(response).await?.json().await?;
        into_payload(parsed)
    }

    fn name(&self) -> &str {
        "firecrawl"
    }
}
