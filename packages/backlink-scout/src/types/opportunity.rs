//! The opportunity record produced by the scout.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length, in characters, of [`Opportunity::page_excerpt`].
pub const MAX_EXCERPT_CHARS: usize = 1500;

/// Maximum length, in characters, of an excerpt taken from a search snippet.
pub const MAX_SNIPPET_CHARS: usize = 600;

/// Maximum number of addresses kept in [`Opportunity::contact_emails_all`].
pub const MAX_EMAILS_KEPT: usize = 5;

/// Which fallback tier produced an opportunity's excerpt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ContextSource {
    /// Full page content from the scraping provider.
    Scrape,
    /// Raw HTTP fetch of the page, tags stripped.
    HttpFallback,
    /// The search engine's own result snippet.
    SearchSnippet,
    /// Supplied afterwards by a bulk contents provider.
    ContentsApi,
    /// No excerpt could be produced.
    #[default]
    Empty,
}

impl ContextSource {
    /// Stable wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContextSource::Scrape => "scrape",
            ContextSource::HttpFallback => "http_fallback",
            ContextSource::SearchSnippet => "search_snippet",
            ContextSource::ContentsApi => "contents_api",
            ContextSource::Empty => "empty",
        }
    }

    /// Whether a richer excerpt should replace this one when available.
    pub fn is_weak(&self) -> bool {
        matches!(self, ContextSource::SearchSnippet | ContextSource::Empty)
    }
}

impl fmt::Display for ContextSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One candidate page for guest-post outreach.
///
/// `url` is the natural key within a run. Records are built by the
/// pipeline and treated as read-only once returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Opportunity {
    pub url: String,
    pub domain: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Best-ranked address, or empty.
    #[serde(default)]
    pub contact_email: String,
    /// Up to five placeholder-free addresses, sorted.
    #[serde(default)]
    pub contact_emails_all: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_form_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guidelines_url: Option<String>,
    /// Whitespace-collapsed, at most [`MAX_EXCERPT_CHARS`] characters.
    #[serde(default)]
    pub page_excerpt: String,
    #[serde(default)]
    pub context_source: ContextSource,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

impl Opportunity {
    /// Start a record for a URL, deriving the domain from it.
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        let domain = domain_of(&url);
        Self {
            url,
            domain,
            ..Default::default()
        }
    }

    /// Set the title (blank titles are dropped).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        self.title = if title.trim().is_empty() {
            None
        } else {
            Some(title)
        };
        self
    }

    /// Title or empty string.
    pub fn title_str(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    pub fn has_contact_email(&self) -> bool {
        !self.contact_email.is_empty()
    }
}

/// Host part of a URL, or the URL itself when it cannot be parsed.
pub fn domain_of(url: &str) -> String {
    url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_is_derived_from_url() {
        let opp = Opportunity::new("https://blog.foo.com/write-for-us?ref=1");
        assert_eq!(opp.domain, "blog.foo.com");
        assert_eq!(opp.context_source, ContextSource::Empty);
    }

    #[test]
    fn test_unparseable_url_falls_back_to_itself() {
        assert_eq!(domain_of("not a url"), "not a url");
    }

    #[test]
    fn test_context_source_wire_names() {
        let json = serde_json::to_string(&ContextSource::HttpFallback).unwrap();
        assert_eq!(json, "\"http_fallback\"");
        assert_eq!(ContextSource::SearchSnippet.to_string(), "search_snippet");
        let parsed: ContextSource = serde_json::from_str("\"contents_api\"").unwrap();
        assert_eq!(parsed, ContextSource::ContentsApi);
    }

    #[test]
    fn test_blank_title_is_none() {
        assert_eq!(Opportunity::new("https://a.com").with_title("  ").title, None);
        assert_eq!(
            Opportunity::new("https://a.com").with_title("Write for us").title_str(),
            "Write for us"
        );
    }
}
