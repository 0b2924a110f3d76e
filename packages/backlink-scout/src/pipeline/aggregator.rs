//! The opportunity finder: query batch, dedup map, global cap.

use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, info, warn};
use url::Url;

use super::contents::merge_contents;
use super::enrich::PageSources;
use crate::config::ScoutConfig;
use crate::content::ContentExtractor;
use crate::error::{Result, ScoutError, SourceError};
use crate::generators::OpenAiGenerator;
use crate::queries::generate_queries;
use crate::scrapers::{FirecrawlScraper, HttpFetcher};
use crate::searchers::{ExaClient, ExaContents, ExaSearcher, SerperSearcher};
use crate::traits::{ContentsProvider, PageFetcher, PageScraper, TextGenerator, WebSearcher};
use crate::types::Opportunity;

/// A research run: either a keyword search or an explicit URL list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearchRequest {
    pub keyword: Option<String>,
    /// When non-empty, these pages are analysed directly and no search runs.
    pub urls: Vec<String>,
    pub max_results: usize,
}

impl ResearchRequest {
    pub fn for_keyword(keyword: impl Into<String>) -> Self {
        Self {
            keyword: Some(keyword.into()),
            urls: Vec::new(),
            max_results: 10,
        }
    }

    pub fn for_urls(urls: Vec<String>) -> Self {
        Self {
            keyword: None,
            urls,
            max_results: 10,
        }
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }
}

/// Finds guest-post opportunities for a keyword.
///
/// # Example
///
/// ```rust,ignore
/// use backlink_scout::{OpportunityFinder, ScoutConfig};
///
/// let config = ScoutConfig::from_env()?;
/// let finder = OpportunityFinder::from_config(&config)?;
/// let opportunities = finder.find_opportunities("ai tools", 10).await?;
/// ```
pub struct OpportunityFinder {
    searchers: Vec<Arc<dyn WebSearcher>>,
    sources: PageSources,
    contents: Option<Arc<dyn ContentsProvider>>,
    generator: Option<Arc<dyn TextGenerator>>,
    results_per_query: usize,
}

impl Default for OpportunityFinder {
    fn default() -> Self {
        Self::new()
    }
}

impl OpportunityFinder {
    /// A finder with no capabilities attached. It finds nothing until a
    /// searcher is added.
    pub fn new() -> Self {
        Self {
            searchers: Vec::new(),
            sources: PageSources::default(),
            contents: None,
            generator: None,
            results_per_query: 10,
        }
    }

    /// Wire the concrete adapters a config has credentials for.
    pub fn from_config(config: &ScoutConfig) -> Result<Self> {
        let setup = |what: &str, e: SourceError| ScoutError::Config(format!("{what}: {e}"));
        let mut finder = Self::new().with_results_per_query(config.results_per_query);

        if config.backend.uses_serper() {
            match &config.serper_api_key {
                Some(key) => {
                    let serper = SerperSearcher::new(key.clone(), config.search_timeout, config.probe_timeout)
                        .map_err(|e| setup("serper client", e))?;
                    finder = finder.with_searcher(Arc::new(serper));
                }
                None => info!("SERPER_API_KEY not set, Serper search disabled"),
            }
        }

        if config.backend.uses_exa() {
            match &config.exa_api_key {
                Some(key) => {
                    let client = Arc::new(
                        ExaClient::new(
                            key.clone(),
                            config.search_timeout,
                            config.exa_probe_timeout,
                            config.exa_request_spacing,
                            config.retry,
                        )
                        .map_err(|e| setup("exa client", e))?,
                    );
                    finder = finder
                        .with_searcher(Arc::new(ExaSearcher::new(client.clone())))
                        .with_contents_provider(Arc::new(ExaContents::new(client)));
                }
                None => info!("EXA_API_KEY not set, Exa search disabled"),
            }
        }

        if let Some(key) = &config.firecrawl_api_key {
            let scraper = FirecrawlScraper::new(key.clone(), config.search_timeout)
                .map_err(|e| setup("firecrawl client", e))?;
            finder = finder.with_scraper(Arc::new(scraper));
        }

        let fetcher = HttpFetcher::new(config.fetch_timeout).map_err(|e| setup("http client", e))?;
        finder = finder.with_fetcher(Arc::new(fetcher));

        if let Some(key) = &config.openai_api_key {
            let generator = OpenAiGenerator::new(key.clone(), config.openai_model.clone(), config.search_timeout)
                .map_err(|e| setup("openai client", e))?;
            finder = finder.with_generator(Arc::new(generator));
        }

        Ok(finder)
    }

    /// Add a search backend. Backends run in the order they were added.
    pub fn with_searcher(mut self, searcher: Arc<dyn WebSearcher>) -> Self {
        self.searchers.push(searcher);
        self
    }

    pub fn with_scraper(mut self, scraper: Arc<dyn PageScraper>) -> Self {
        self.sources.scraper = Some(scraper);
        self
    }

    pub fn with_fetcher(mut self, fetcher: Arc<dyn PageFetcher>) -> Self {
        self.sources.fetcher = Some(fetcher);
        self
    }

    pub fn with_extractor(mut self, extractor: Arc<dyn ContentExtractor>) -> Self {
        self.sources.extractor = extractor;
        self
    }

    /// Attach a bulk contents provider for the second enrichment phase.
    pub fn with_contents_provider(mut self, contents: Arc<dyn ContentsProvider>) -> Self {
        self.contents = Some(contents);
        self
    }

    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Organic results requested per query.
    pub fn with_results_per_query(mut self, results_per_query: usize) -> Self {
        self.results_per_query = results_per_query.max(1);
        self
    }

    /// The text generator configured for outreach drafting, if any.
    pub fn generator(&self) -> Option<&dyn TextGenerator> {
        self.generator.as_deref()
    }

    /// Search, enrich and deduplicate opportunities for `keyword`.
    ///
    /// Returns at most `max_results` records in first-seen order. A URL seen
    /// again later replaces its earlier record in place. Missing or
    /// unreachable backends and failing calls are not errors: they just
    /// contribute nothing. Only a blank keyword is rejected.
    pub async fn find_opportunities(&self, keyword: &str, max_results: usize) -> Result<Vec<Opportunity>> {
        if keyword.trim().is_empty() {
            return Err(ScoutError::MissingKeyword);
        }
        if max_results == 0 {
            return Ok(Vec::new());
        }

        let mut active: Vec<&Arc<dyn WebSearcher>> = Vec::with_capacity(self.searchers.len());
        for searcher in &self.searchers {
            if searcher.reachable().await {
                active.push(searcher);
            } else {
                info!(backend = searcher.name(), "Search backend unreachable, skipping");
            }
        }
        if active.is_empty() {
            info!(keyword = %keyword, "No search backend available, returning no opportunities");
            return Ok(Vec::new());
        }

        let mut found: IndexMap<String, Opportunity> = IndexMap::new();

        'backends: for searcher in active {
            let queries = generate_queries(keyword, searcher.query_mode());
            info!(backend = searcher.name(), queries = queries.len(), "Running query batch");

            for query in &queries {
                if found.len() >= max_results {
                    break 'backends;
                }

                let hits = match searcher.search(query, self.results_per_query).await {
                    Ok(hits) => hits,
                    Err(e) => {
                        warn!(backend = searcher.name(), query = %query, error = %e, "Search failed");
                        continue;
                    }
                };
                debug!(query = %query, hits = hits.len(), "Search returned");

                for hit in hits {
                    if found.len() >= max_results {
                        break 'backends;
                    }
                    let url = hit.url.trim();
                    if url.is_empty() {
                        continue;
                    }

                    let opportunity = self
                        .sources
                        .enrich(
                            url,
                            hit.title.as_deref(),
                            hit.snippet.as_deref(),
                            hit.highlights.clone(),
                            keyword,
                        )
                        .await;
                    found.insert(url.to_string(), opportunity);
                }
            }
        }

        let mut opportunities: Vec<Opportunity> = found.into_values().take(max_results).collect();
        self.enrich_with_contents(&mut opportunities, keyword).await;

        info!(keyword = %keyword, count = opportunities.len(), "Opportunity search finished");
        Ok(opportunities)
    }

    /// Run a research request.
    ///
    /// With URLs, each page is analysed directly (no search, no snippet
    /// tier, untitled). Otherwise this is [`Self::find_opportunities`].
    pub async fn research(&self, request: &ResearchRequest) -> Result<Vec<Opportunity>> {
        let keyword = request.keyword.as_deref().unwrap_or("");

        if request.urls.is_empty() {
            return self.find_opportunities(keyword, request.max_results).await;
        }

        let mut urls: Vec<&str> = Vec::new();
        for raw in &request.urls {
            let url = raw.trim();
            if url.is_empty() || urls.contains(&url) {
                continue;
            }
            if Url::parse(url).is_err() {
                return Err(ScoutError::InvalidUrl { url: url.to_string() });
            }
            urls.push(url);
        }

        let mut opportunities = Vec::with_capacity(urls.len().min(request.max_results));
        for url in urls.into_iter().take(request.max_results) {
            opportunities.push(self.build_from_url(url, keyword).await);
        }
        self.enrich_with_contents(&mut opportunities, keyword).await;

        info!(count = opportunities.len(), "URL research finished");
        Ok(opportunities)
    }

    /// Analyse a single page without searching for it.
    pub async fn build_from_url(&self, url: &str, keyword: &str) -> Opportunity {
        self.sources.enrich(url, None, None, Vec::new(), keyword).await
    }

    async fn enrich_with_contents(&self, opportunities: &mut [Opportunity], keyword: &str) {
        let Some(provider) = &self.contents else {
            return;
        };
        if opportunities.is_empty() {
            return;
        }

        let urls: Vec<String> = opportunities.iter().map(|o| o.url.clone()).collect();
        match provider.contents(&urls).await {
            Ok(contents) => {
                let merged = merge_contents(opportunities, &contents, keyword);
                debug!(merged, requested = urls.len(), "Merged page contents");
            }
            Err(e) => warn!(error = %e, "Contents enrichment failed, keeping search results"),
        }
    }
}
