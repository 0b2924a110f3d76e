//! Search results as the pipeline sees them.

use serde::{Deserialize, Serialize};

/// One organic result from a search backend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchHit {
    /// Result URL. Blank URLs are skipped by the pipeline.
    pub url: String,

    /// Title of the result (if the backend returned one).
    #[serde(default)]
    pub title: Option<String>,

    /// Snippet/description shown by the search engine.
    #[serde(default)]
    pub snippet: Option<String>,

    /// Key passages picked by a semantic backend.
    #[serde(default)]
    pub highlights: Vec<String>,
}

impl SearchHit {
    /// Create a hit from a URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Add a title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add a snippet.
    pub fn with_snippet(mut self, snippet: impl Into<String>) -> Self {
        self.snippet = Some(snippet.into());
        self
    }

    /// Add highlights.
    pub fn with_highlights(mut self, highlights: Vec<String>) -> Self {
        self.highlights = highlights;
        self
    }

    /// Snippet text, empty when absent.
    pub fn snippet_str(&self) -> &str {
        self.snippet.as_deref().unwrap_or("")
    }
}

/// Which template family a backend wants its queries built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryMode {
    /// The canonical footprint templates.
    #[default]
    Standard,
    /// Canonical templates plus industry-targeting and contact-discovery ones.
    Extended,
}
