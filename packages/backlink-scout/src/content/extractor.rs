//! Main-content extraction strategies.

use regex::Regex;
use std::sync::{Arc, LazyLock};

use super::normalize::{collapse_whitespace, strip_tags};

static RE_NON_CONTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)<script\b[^>]*>.*?</script>|<style\b[^>]*>.*?</style>|<noscript\b[^>]*>.*?</noscript>",
    )
    .unwrap()
});

/// Turns a page's HTML into readable text.
///
/// Implementations are best-effort: malformed input yields whatever text
/// could be recovered, or an empty string. They never panic.
pub trait ContentExtractor: Send + Sync {
    fn extract_main_content(&self, html: &str) -> String;

    /// Strategy name (for logging).
    fn name(&self) -> &str;
}

/// Regex tag strip. Always available.
#[derive(Debug, Clone, Copy, Default)]
pub struct TagStripExtractor;

impl TagStripExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl ContentExtractor for TagStripExtractor {
    fn extract_main_content(&self, html: &str) -> String {
        let without_code = RE_NON_CONTENT.replace_all(html, " ");
        collapse_whitespace(&strip_tags(&without_code))
    }

    fn name(&self) -> &str {
        "tag_strip"
    }
}

/// The richest extractor compiled into this build.
pub fn default_extractor() -> Arc<dyn ContentExtractor> {
    #[cfg(feature = "structured-html")]
    {
        Arc::new(super::StructuredExtractor::new())
    }
    #[cfg(not(feature = "structured-html"))]
    {
        Arc::new(TagStripExtractor::new())
    }
}
