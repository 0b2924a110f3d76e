//! Exa neural search and bulk contents.
//!
//! Both capabilities share one [`ExaClient`], so the request spacing holds
//! across search and contents calls alike.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::retry::RetryPolicy;
use crate::error::{ensure_success, SourceError, SourceResult};
use crate::pacer::Pacer;
use crate::security::ApiKey;
use crate::traits::{ContentsProvider, WebSearcher};
use crate::types::{PageContents, QueryMode, SearchHit};

const EXA_BASE_URL: &str = "https://api.exa.ai";

/// Exa caps `numResults` per search call.
pub const EXA_MAX_RESULTS: usize = 25;

/// Paced, retrying HTTP client for the Exa API.
pub struct ExaClient {
    api_key: ApiKey,
    client: reqwest::Client,
    pacer: Pacer,
    retry: RetryPolicy,
    probe_timeout: Duration,
    base_url: String,
}

impl ExaClient {
    pub fn new(
        api_key: ApiKey,
        request_timeout: Duration,
        probe_timeout: Duration,
        spacing: Duration,
        retry: RetryPolicy,
    ) -> SourceResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| SourceError::Http(Box::new(e)))?;

        Ok(Self {
            api_key,
            client,
            pacer: Pacer::new(spacing),
            retry,
            probe_timeout,
            base_url: EXA_BASE_URL.to_string(),
        })
    }

    /// Point the client at another host (for proxies and local stubs).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> SourceResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let url = format!("{}{}", self.base_url, path);
        self.retry
            .run(path, || async {
                self.pacer.wait().await;
                let response = self
                    .client
                    .post(&url)
                    .header("x-api-key", self.api_key.expose())
                    .json(body)
                    .send()
                    .await?;
                Ok::<T, SourceError>(ensure_success(response).await?.json::<T>().await?)
            })
            .await
    }

    /// Any HTTP answer at all (even 401) means the API is up.
    async fn probe(&self) -> bool {
        let url = format!("{}/search", self.base_url);
        match self
            .client
            .post(&url)
            .header("x-api-key", self.api_key.expose())
            .json(&serde_json::json!({"query": "ping", "numResults": 1}))
            .timeout(self.probe_timeout)
            .send()
            .await
        {
            Ok(_) => true,
            Err(e) => {
                debug!(error = %e, "Exa probe failed");
                false
            }
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExaSearchRequest<'a> {
    query: &'a str,
    #[serde(rename = "type")]
    search_type: &'static str,
    use_autoprompt: bool,
    num_results: usize,
    text: bool,
    highlights: bool,
}

#[derive(Debug, Serialize)]
struct ExaContentsRequest<'a> {
    urls: &'a [String],
    text: bool,
    highlights: bool,
    summary: bool,
}

#[derive(Debug, Deserialize)]
struct ExaResponse {
    #[serde(default)]
    results: Vec<ExaResult>,
}

#[derive(Debug, Deserialize)]
struct ExaResult {
    #[serde(default)]
    url: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    highlights: Vec<String>,
}

fn into_hits(response: ExaResponse, limit: usize) -> Vec<SearchHit> {
    response
        .results
        .into_iter()
        .take(limit)
        .map(|r| SearchHit {
            url: r.url,
            title: r.title,
            snippet: r.text,
            highlights: r.highlights,
        })
        .collect()
}

fn into_contents(response: ExaResponse) -> HashMap<String, PageContents> {
    response
        .results
        .into_iter()
        .filter(|r| !r.url.is_empty())
        .map(|r| {
            let contents = PageContents {
                text: r.text.unwrap_or_default(),
                summary: r.summary.unwrap_or_default(),
                highlights: r.highlights,
                title: r.title,
            };
            (r.url, contents)
        })
        .collect()
}

/// Neural search backend.
pub struct ExaSearcher {
    client: Arc<ExaClient>,
}

impl ExaSearcher {
    pub fn new(client: Arc<ExaClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl WebSearcher for ExaSearcher {
    fn name(&self) -> &str {
        "exa"
    }

    async fn reachable(&self) -> bool {
        self.client.probe().await
    }

    async fn search(&self, query: &str, limit: usize) -> SourceResult<Vec<SearchHit>> {
        let limit = limit.min(EXA_MAX_RESULTS);
        let request = ExaSearchRequest {
            query,
            search_type: "neural",
            use_autoprompt: true,
            num_results: limit,
            text: true,
            highlights: true,
        };
        let response: ExaResponse = self.client.post("/search", &request).await?;
        Ok(into_hits(response, limit))
    }

    fn query_mode(&self) -> QueryMode {
        QueryMode::Extended
    }
}

/// Bulk page contents from Exa.
pub struct ExaContents {
    client: Arc<ExaClient>,
}

impl ExaContents {
    pub fn new(client: Arc<ExaClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContentsProvider for ExaContents {
    async fn contents(&self, urls: &[String]) -> SourceResult<HashMap<String, PageContents>> {
        if urls.is_empty() {
            return Ok(HashMap::new());
        }
        let request = ExaContentsRequest {
            urls,
            text: true,
            highlights: true,
            summary: true,
        };
        let response: ExaResponse = self.client.post("/contents", &request).await?;
        Ok(into_contents(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_request_uses_exa_field_names() {
        let request = ExaSearchRequest {
            query: "ai tools 'guest post'",
            search_type: "neural",
            use_autoprompt: true,
            num_results: 25,
            text: true,
            highlights: true,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "query": "ai tools 'guest post'",
                "type": "neural",
                "useAutoprompt": true,
                "numResults": 25,
                "text": true,
                "highlights": true
            })
        );
    }

    #[test]
    fn test_results_become_hits_with_highlights() {
        let raw = r#"{"results": [
            {"url": "https://a.com/write-for-us", "title": "Write for us", "text": "We take pitches", "highlights": ["pitch editor@a.com"]},
            {"url": "https://b.com"}
        ]}"#;
        let hits = into_hits(serde_json::from_str(raw).unwrap(), 10);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].snippet_str(), "We take pitches");
        assert_eq!(hits[0].highlights, vec!["pitch editor@a.com".to_string()]);
        assert!(hits[1].highlights.is_empty());
    }

    #[test]
    fn test_contents_keyed_by_url() {
        let raw = r#"{"results": [
            {"url": "https://a.com", "text": "full text", "summary": "short", "highlights": []},
            {"url": "", "text": "orphan"}
        ]}"#;
        let contents = into_contents(serde_json::from_str(raw).unwrap());
        assert_eq!(contents.len(), 1);
        assert_eq!(contents["https://a.com"].summary, "short");
        assert_eq!(contents["https://a.com"].text, "full text");
    }

    #[tokio::test]
    async fn test_empty_contents_request_skips_network() {
        let client = ExaClient::new(
            ApiKey::new("exa-test"),
            Duration::from_secs(1),
            Duration::from_secs(1),
            Duration::from_millis(100),
            RetryPolicy::none(),
        )
        .unwrap()
        .with_base_url("http://127.0.0.1:9");
        let contents = ExaContents::new(Arc::new(client));
        assert!(contents.contents(&[]).await.unwrap().is_empty());
    }
}
