//! Serper (Google search API) backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::error::{ensure_success, SourceError, SourceResult};
use crate::security::ApiKey;
use crate::traits::WebSearcher;
use crate::types::{QueryMode, SearchHit};

const SERPER_ROOT: &str = "https://google.serper.dev";
const SERPER_SEARCH_URL: &str = "https://google.serper.dev/search";

/// Google search results through the Serper API.
pub struct SerperSearcher {
    api_key: ApiKey,
    client: reqwest::Client,
    probe_timeout: Duration,
}

#[derive(Debug, Serialize)]
struct SerperRequest<'a> {
    q: &'a str,
    num: usize,
}

#[derive(Debug, Deserialize)]
struct SerperResponse {
    #[serde(default)]
    organic: Vec<SerperOrganic>,
}

#[derive(Debug, Deserialize)]
struct SerperOrganic {
    #[serde(default)]
    link: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    snippet: Option<String>,
}

impl SerperSearcher {
    /// Create a new Serper client
    pub fn new(api_key: ApiKey, search_timeout: Duration, probe_timeout: Duration) -> SourceResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(search_timeout)
            .build()
            .map_err(|e| SourceError::Http(Box::new(e)))?;

        Ok(Self {
            api_key,
            client,
            probe_timeout,
        })
    }
}

fn into_hits(response: SerperResponse, limit: usize) -> Vec<SearchHit> {
    response
        .organic
        .into_iter()
        .take(limit)
        .map(|r| SearchHit {
            url: r.link,
            title: r.title,
            snippet: r.snippet,
            highlights: Vec::new(),
        })
        .collect()
}

#[async_trait]
impl WebSearcher for SerperSearcher {
    fn name(&self) -> &str {
        "serper"
    }

    async fn reachable(&self) -> bool {
        match self
            .client
            .get(SERPER_ROOT)
            .timeout(self.probe_timeout)
            .send()
            .await
        {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "Serper probe failed");
                false
            }
        }
    }

    async fn search(&self, query: &str, limit: usize) -> SourceResult<Vec<SearchHit>> {
        let response = self
            .client
            .post(SERPER_SEARCH_URL)
            .header("X-API-KEY", self.api_key.expose())
            .json(&SerperRequest { q: query, num: limit })
            .send()
            .await?;

        let parsed: SerperResponse = ensure_success(response).await?.json().await?;
        Ok(into_hits(parsed, limit))
    }

    fn query_mode(&self) -> QueryMode {
        QueryMode::Standard
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_organic_results_map_to_hits() {
        let raw = r#"{
            "searchParameters": {"q": "ai tools 'write for us'"},
            "organic": [
                {"title": "Write for Us", "link": "https://a.com/write", "snippet": "Pitch us", "position": 1},
                {"link": "https://b.com/guest"},
                {"title": "Third", "link": "https://c.com"}
            ]
        }"#;
        let response: SerperResponse = serde_json::from_str(raw).unwrap();
        let hits = into_hits(response, 2);

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].url, "https://a.com/write");
        assert_eq!(hits[0].snippet_str(), "Pitch us");
        assert_eq!(hits[1].title, None);
    }

    #[test]
    fn test_missing_organic_is_empty() {
        let response: SerperResponse = serde_json::from_str("{}").unwrap();
        assert!(into_hits(response, 10).is_empty());
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(SerperRequest { q: "rust", num: 10 }).unwrap();
        assert_eq!(body, serde_json::json!({"q": "rust", "num": 10}));
    }
}
