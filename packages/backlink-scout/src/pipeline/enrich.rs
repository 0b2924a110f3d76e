//! Per-URL enrichment: excerpt fallback chain, contacts, support links, notes.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::contacts::{choose_best_email, extract_emails};
use crate::content::{collapse_whitespace, default_extractor, normalize, truncate_chars, ContentExtractor};
use crate::links::{classify_support_links, extract_links};
use crate::notes::compose_notes;
use crate::traits::{PageFetcher, PageScraper};
use crate::types::{
    ContextSource, Opportunity, PageViews, MAX_EMAILS_KEPT, MAX_EXCERPT_CHARS, MAX_SNIPPET_CHARS,
};

/// Everything the fallback chain can draw page text from.
#[derive(Clone)]
pub struct PageSources {
    pub scraper: Option<Arc<dyn PageScraper>>,
    pub fetcher: Option<Arc<dyn PageFetcher>>,
    pub extractor: Arc<dyn ContentExtractor>,
}

impl Default for PageSources {
    fn default() -> Self {
        Self {
            scraper: None,
            fetcher: None,
            extractor: default_extractor(),
        }
    }
}

/// Outcome of the excerpt fallback chain for one URL.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedPage {
    pub views: PageViews,
    pub excerpt: String,
    pub source: ContextSource,
    /// Base for relative links in `views.html`: the URL after redirects
    /// when the raw fetch tier supplied the HTML.
    pub base_url: String,
}

fn clip(text: &str, max_chars: usize) -> String {
    truncate_chars(&collapse_whitespace(text), max_chars)
        .trim_end()
        .to_string()
}

impl PageSources {
    /// Walk the tiers: scrape, raw fetch, then the search snippet.
    pub async fn resolve(&self, url: &str, snippet: Option<&str>) -> ResolvedPage {
        let mut views = PageViews::default();
        let mut base_url = url.to_string();

        if let Some(scraper) = &self.scraper {
            match scraper.scrape(url).await {
                Ok(payload) => views = normalize(&payload),
                Err(e) => warn!(url = %url, scraper = scraper.name(), error = %e, "Scrape failed"),
            }

            let mut raw = views.text.trim().to_string();
            if raw.is_empty() && !views.html.trim().is_empty() {
                raw = self.extractor.extract_main_content(&views.html);
            }
            let excerpt = clip(&raw, MAX_EXCERPT_CHARS);
            if !excerpt.is_empty() {
                debug!(url = %url, "Excerpt from scrape");
                return ResolvedPage {
                    views,
                    excerpt,
                    source: ContextSource::Scrape,
                    base_url,
                };
            }
        }

        if let Some(fetcher) = &self.fetcher {
            match fetcher.fetch(url).await {
                Ok(page) => {
                    let text = self.extractor.extract_main_content(&page.html);
                    let excerpt = clip(&text, MAX_EXCERPT_CHARS);
                    views.html = page.html;
                    if !page.final_url.is_empty() {
                        base_url = page.final_url;
                    }
                    if !excerpt.is_empty() {
                        debug!(url = %url, base_url = %base_url, "Excerpt from raw fetch");
                        return ResolvedPage {
                            views,
                            excerpt,
                            source: ContextSource::HttpFallback,
                            base_url,
                        };
                    }
                }
                Err(e) => warn!(url = %url, error = %e, "Raw fetch failed"),
            }
        }

        if let Some(snippet) = snippet {
            let excerpt = clip(snippet, MAX_SNIPPET_CHARS);
            if !excerpt.is_empty() {
                debug!(url = %url, "Excerpt from search snippet");
                return ResolvedPage {
                    views,
                    excerpt,
                    source: ContextSource::SearchSnippet,
                    base_url,
                };
            }
        }

        debug!(url = %url, "No excerpt available");
        ResolvedPage {
            views,
            excerpt: String::new(),
            source: ContextSource::Empty,
            base_url,
        }
    }

    /// Full record for one URL.
    pub async fn enrich(
        &self,
        url: &str,
        title: Option<&str>,
        snippet: Option<&str>,
        highlights: Vec<String>,
        keyword: &str,
    ) -> Opportunity {
        let resolved = self.resolve(url, snippet).await;

        let mut opportunity = Opportunity::new(url);
        if let Some(title) = title {
            opportunity = opportunity.with_title(title);
        }
        opportunity.page_excerpt = resolved.excerpt;
        opportunity.context_source = resolved.source;
        opportunity.highlights = highlights;

        apply_contacts(&mut opportunity, &extract_emails(&resolved.views.combined()));

        let links = extract_links(&resolved.views.html, &resolved.base_url);
        let support = classify_support_links(&links);
        opportunity.contact_form_url = support.contact;
        opportunity.guidelines_url = support.guidelines;
        if opportunity.guidelines_url.is_none()
            && opportunity.title_str().to_lowercase().contains("write")
        {
            opportunity.guidelines_url = Some(url.to_string());
        }

        opportunity.notes = compose_notes(&opportunity, keyword);
        opportunity
    }
}

/// Fill the contact fields from a sorted email list.
pub(crate) fn apply_contacts(opportunity: &mut Opportunity, emails: &[String]) {
    opportunity.contact_email = choose_best_email(emails, &opportunity.domain);
    opportunity.contact_emails_all = emails.iter().take(MAX_EMAILS_KEPT).cloned().collect();
}
