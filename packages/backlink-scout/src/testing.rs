//! Testing utilities including mock implementations.
//!
//! These let the pipeline run end to end without any network access.
//! Every mock records its calls so tests can assert on early stopping
//! and tier order.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::error::{SourceError, SourceResult};
use crate::traits::{
    BulkSender, ContentsProvider, PageFetcher, PageScraper, TextGenerator, WebSearcher,
};
use crate::types::{FetchedPage, OutgoingEmail, PageContents, PagePayload, QueryMode, SearchHit};

fn not_found() -> SourceError {
    SourceError::Status {
        status: 404,
        body: "not found".to_string(),
    }
}

fn server_error() -> SourceError {
    SourceError::Status {
        status: 500,
        body: "mock failure".to_string(),
    }
}

/// A mock search backend.
///
/// Returns per-query results when configured, otherwise the default result
/// list for every query.
pub struct MockSearcher {
    name: String,
    reachable: bool,
    mode: QueryMode,
    default_results: Vec<SearchHit>,
    results: Arc<RwLock<HashMap<String, Vec<SearchHit>>>>,
    failing: Arc<RwLock<HashSet<String>>>,
    /// Queries in the order they were issued
    queries: Arc<RwLock<Vec<String>>>,
}

impl Default for MockSearcher {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSearcher {
    pub fn new() -> Self {
        Self {
            name: "mock".to_string(),
            reachable: true,
            mode: QueryMode::Standard,
            default_results: Vec::new(),
            results: Arc::new(RwLock::new(HashMap::new())),
            failing: Arc::new(RwLock::new(HashSet::new())),
            queries: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Make the reachability probe fail.
    pub fn unreachable(mut self) -> Self {
        self.reachable = false;
        self
    }

    pub fn with_mode(mut self, mode: QueryMode) -> Self {
        self.mode = mode;
        self
    }

    /// Results returned for any query without a specific entry.
    pub fn with_default_results(mut self, hits: Vec<SearchHit>) -> Self {
        self.default_results = hits;
        self
    }

    /// Results for one exact query string.
    pub fn with_results(self, query: impl Into<String>, hits: Vec<SearchHit>) -> Self {
        self.results.write().unwrap().insert(query.into(), hits);
        self
    }

    /// Make one exact query fail with a server error.
    pub fn failing_on(self, query: impl Into<String>) -> Self {
        self.failing.write().unwrap().insert(query.into());
        self
    }

    /// Queries issued so far.
    pub fn queries(&self) -> Vec<String> {
        self.queries.read().unwrap().clone()
    }
}

#[async_trait]
impl WebSearcher for MockSearcher {
    fn name(&self) -> &str {
        &self.name
    }

    async fn reachable(&self) -> bool {
        self.reachable
    }

    async fn search(&self, query: &str, limit: usize) -> SourceResult<Vec<SearchHit>> {
        self.queries.write().unwrap().push(query.to_string());

        if self.failing.read().unwrap().contains(query) {
            return Err(server_error());
        }

        let hits = self
            .results
            .read()
            .unwrap()
            .get(query)
            .cloned()
            .unwrap_or_else(|| self.default_results.clone());
        Ok(hits.into_iter().take(limit).collect())
    }

    fn query_mode(&self) -> QueryMode {
        self.mode
    }
}

/// A mock scraper.
///
/// Unknown URLs scrape to [`PagePayload::Absent`] unless a default builder
/// is set.
#[derive(Default)]
pub struct MockScraper {
    pages: Arc<RwLock<HashMap<String, PagePayload>>>,
    page_for_url: Option<Box<dyn Fn(&str) -> PagePayload + Send + Sync>>,
    fail_all: bool,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockScraper {
    pub fn new() -> Self {
        Self::default()
    }

    /// A scraper whose every call fails.
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Default::default()
        }
    }

    pub fn with_page(self, url: impl Into<String>, payload: PagePayload) -> Self {
        self.pages.write().unwrap().insert(url.into(), payload);
        self
    }

    /// Build the payload for any URL without a fixed page.
    pub fn with_page_for_url<F>(mut self, build: F) -> Self
    where
        F: Fn(&str) -> PagePayload + Send + Sync + 'static,
    {
        self.page_for_url = Some(Box::new(build));
        self
    }

    /// URLs scraped so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl PageScraper for MockScraper {
    async fn scrape(&self, url: &str) -> SourceResult<PagePayload> {
        self.calls.write().unwrap().push(url.to_string());

        if self.fail_all {
            return Err(server_error());
        }
        if let Some(payload) = self.pages.read().unwrap().get(url) {
            return Ok(payload.clone());
        }
        Ok(self
            .page_for_url
            .as_ref()
            .map(|build| build(url))
            .unwrap_or_default())
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// A mock raw fetcher. Unknown URLs answer 404.
#[derive(Default)]
pub struct MockFetcher {
    pages: Arc<RwLock<HashMap<String, FetchedPage>>>,
    fail_all: bool,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Default::default()
        }
    }

    pub fn with_page(self, url: impl Into<String>, html: impl Into<String>) -> Self {
        let url = url.into();
        let page = FetchedPage::new(url.clone(), html);
        self.pages.write().unwrap().insert(url, page);
        self
    }

    /// Serve `html` for `url` as if the request was redirected to `final_url`.
    pub fn with_redirect(
        self,
        url: impl Into<String>,
        final_url: impl Into<String>,
        html: impl Into<String>,
    ) -> Self {
        let page = FetchedPage::new(final_url, html);
        self.pages.write().unwrap().insert(url.into(), page);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> SourceResult<FetchedPage> {
        self.calls.write().unwrap().push(url.to_string());

        if self.fail_all {
            return Err(SourceError::Timeout { url: url.to_string() });
        }
        self.pages
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(not_found)
    }
}

/// A mock bulk contents provider.
#[derive(Default)]
pub struct MockContents {
    pages: Arc<RwLock<HashMap<String, PageContents>>>,
    fail_all: bool,
    requests: Arc<RwLock<Vec<Vec<String>>>>,
}

impl MockContents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Default::default()
        }
    }

    pub fn with_page(self, url: impl Into<String>, contents: PageContents) -> Self {
        self.pages.write().unwrap().insert(url.into(), contents);
        self
    }

    /// URL batches requested so far.
    pub fn requests(&self) -> Vec<Vec<String>> {
        self.requests.read().unwrap().clone()
    }
}

#[async_trait]
impl ContentsProvider for MockContents {
    async fn contents(&self, urls: &[String]) -> SourceResult<HashMap<String, PageContents>> {
        self.requests.write().unwrap().push(urls.to_vec());

        if self.fail_all {
            return Err(server_error());
        }
        let pages = self.pages.read().unwrap();
        Ok(urls
            .iter()
            .filter_map(|url| pages.get(url).map(|c| (url.clone(), c.clone())))
            .collect())
    }
}

/// A mock text generator that answers with a fixed completion.
pub struct MockTextGenerator {
    response: Option<String>,
    model: String,
    prompts: Arc<RwLock<Vec<String>>>,
}

impl MockTextGenerator {
    /// Always answer with `response`.
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: Some(response.into()),
            model: "mock-model".to_string(),
            prompts: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Fail every generation.
    pub fn failing() -> Self {
        Self {
            response: None,
            ..Self::new("")
        }
    }

    /// Prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.read().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, prompt: &str) -> SourceResult<String> {
        self.prompts.write().unwrap().push(prompt.to_string());
        self.response.clone().ok_or_else(server_error)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

/// A mock email provider. Accepts every message with 202 unless told to
/// reject a recipient.
#[derive(Default)]
pub struct MockSender {
    rejections: Arc<RwLock<HashMap<String, u16>>>,
    sent: Arc<RwLock<Vec<OutgoingEmail>>>,
}

impl MockSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `status` for messages to `to_email`.
    pub fn failing_for(self, to_email: impl Into<String>, status: u16) -> Self {
        self.rejections.write().unwrap().insert(to_email.into(), status);
        self
    }

    /// Messages the provider was asked to deliver, rejected ones included.
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.read().unwrap().clone()
    }
}

#[async_trait]
impl BulkSender for MockSender {
    fn name(&self) -> &str {
        "mock"
    }

    async fn send_one(&self, email: &OutgoingEmail) -> SourceResult<u16> {
        self.sent.write().unwrap().push(email.clone());

        match self.rejections.read().unwrap().get(&email.to_email) {
            Some(status) => Err(SourceError::Status {
                status: *status,
                body: "rejected".to_string(),
            }),
            None => Ok(202),
        }
    }
}
