//! Page content shapes flowing from scrapers and fetchers into the pipeline.

use serde::{Deserialize, Serialize};

/// A scrape result in whatever shape the provider produced it.
///
/// Providers disagree on what they hand back: a typed document, a loose
/// JSON object, or a bare string. The pipeline only ever looks at
/// [`PageViews`], produced by [`crate::content::normalize`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PagePayload {
    /// Nothing was scraped (no provider configured, or the call failed).
    #[default]
    Absent,
    /// Raw text or markdown.
    Raw(String),
    /// A typed scrape document.
    Document(ScrapedDocument),
    /// A key-value payload as returned by a JSON API.
    Json(serde_json::Value),
}

impl PagePayload {
    pub fn is_absent(&self) -> bool {
        matches!(self, PagePayload::Absent)
    }
}

impl From<String> for PagePayload {
    fn from(value: String) -> Self {
        PagePayload::Raw(value)
    }
}

impl From<&str> for PagePayload {
    fn from(value: &str) -> Self {
        PagePayload::Raw(value.to_string())
    }
}

impl From<ScrapedDocument> for PagePayload {
    fn from(value: ScrapedDocument) -> Self {
        PagePayload::Document(value)
    }
}

/// Typed scrape document with every text-bearing field a provider may fill.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrapedDocument {
    #[serde(default)]
    pub markdown: Option<String>,
    #[serde(default)]
    pub md: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
}

impl ScrapedDocument {
    pub fn markdown(markdown: impl Into<String>) -> Self {
        Self {
            markdown: Some(markdown.into()),
            ..Default::default()
        }
    }

    pub fn with_html(mut self, html: impl Into<String>) -> Self {
        self.html = Some(html.into());
        self
    }
}

/// The two plain-text views every payload is reduced to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageViews {
    /// Markdown / plain text view.
    pub text: String,
    /// HTML view (empty when the payload carried no HTML).
    pub html: String,
}

impl PageViews {
    pub fn new(text: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            html: html.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty() && self.html.trim().is_empty()
    }

    /// Text and HTML joined, for scanning both at once.
    pub fn combined(&self) -> String {
        format!("{}\n{}", self.text, self.html)
    }
}

/// Body of a raw HTTP fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FetchedPage {
    /// URL after redirects.
    pub final_url: String,
    pub html: String,
}

impl FetchedPage {
    pub fn new(final_url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            final_url: final_url.into(),
            html: html.into(),
        }
    }
}

/// Full page contents returned by a bulk contents provider.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PageContents {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combined_view_keeps_both_parts() {
        let views = PageViews::new("md", "<p>x</p>");
        assert_eq!(views.combined(), "md\n<p>x</p>");
        assert!(!views.is_empty());
        assert!(PageViews::default().is_empty());
    }

    #[test]
    fn test_document_deserializes_partial_fields() {
        let doc: ScrapedDocument =
            serde_json::from_str(r##"{"markdown": "# Hi", "html": "<h1>Hi</h1>"}"##).unwrap();
        assert_eq!(doc.markdown.as_deref(), Some("# Hi"));
        assert_eq!(doc.text, None);
        assert_eq!(doc.html.as_deref(), Some("<h1>Hi</h1>"));
    }
}
