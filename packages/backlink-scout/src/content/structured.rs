//! DOM-based main-content extraction (feature `structured-html`).
//!
//! Looks for the content-like container with the best text density,
//! falls back to a paragraph/div scan, and keeps whichever of that result
//! and a plain tag strip scores higher on [`quality_score`].

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::extractor::{ContentExtractor, TagStripExtractor};
use super::normalize::collapse_whitespace;
use super::quality::quality_score;

/// Content-like containers, most specific first.
const CANDIDATE_SELECTORS: &[&str] = &[
    "article",
    "main",
    "[role='main']",
    "#content",
    ".content",
    ".post-content",
    ".entry-content",
    ".article-body",
    ".post",
    ".entry",
];

/// Elements whose text never counts as content.
const SKIPPED_TAGS: &[&str] = &["script", "style", "noscript", "iframe", "embed", "object"];

/// Candidates shorter than this are ignored (a tiny `.post` badge is not the article).
const MIN_CANDIDATE_CHARS: usize = 80;

/// Paragraphs shorter than this are treated as chrome during the fallback scan.
const MIN_BLOCK_CHARS: usize = 40;

#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredExtractor;

impl StructuredExtractor {
    pub fn new() -> Self {
        Self
    }

    fn best_candidate(document: &Html) -> Option<String> {
        let mut best: Option<(f64, String)> = None;

        for selector_str in CANDIDATE_SELECTORS {
            let Ok(selector) = Selector::parse(selector_str) else {
                continue;
            };
            for element in document.select(&selector) {
                let text = visible_text(element);
                let chars = text.chars().count();
                if chars < MIN_CANDIDATE_CHARS {
                    continue;
                }
                let markup = element.html().len().max(1);
                let density = chars as f64 / markup as f64;
                if best.as_ref().map_or(true, |(d, _)| density > *d) {
                    best = Some((density, text));
                }
            }
        }

        best.map(|(_, text)| text)
    }

    fn block_scan(document: &Html) -> String {
        let Ok(selector) = Selector::parse("p, div") else {
            return String::new();
        };
        let mut blocks: Vec<String> = Vec::new();
        for element in document.select(&selector) {
            // divs only count when they hold text directly, not via nested blocks
            if element.value().name() == "div" && has_block_children(element) {
                continue;
            }
            let text = visible_text(element);
            if text.chars().count() >= MIN_BLOCK_CHARS && !blocks.contains(&text) {
                blocks.push(text);
            }
        }
        blocks.join(" ")
    }
}

impl ContentExtractor for StructuredExtractor {
    fn extract_main_content(&self, html: &str) -> String {
        if html.trim().is_empty() {
            return String::new();
        }

        let document = Html::parse_document(html);
        let structured = Self::best_candidate(&document).unwrap_or_else(|| Self::block_scan(&document));
        let stripped = TagStripExtractor.extract_main_content(html);

        let structured_score = quality_score(&structured);
        let stripped_score = quality_score(&stripped);
        debug!(structured_score, stripped_score, "Scored extraction strategies");

        if !structured.is_empty() && structured_score >= stripped_score {
            structured
        } else {
            stripped
        }
    }

    fn name(&self) -> &str {
        "structured"
    }
}

fn visible_text(element: ElementRef<'_>) -> String {
    let mut raw = String::new();
    collect_text(element, &mut raw);
    collapse_whitespace(&raw)
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            out.push(' ');
        } else if let Some(child_element) = ElementRef::wrap(child) {
            if !SKIPPED_TAGS.contains(&child_element.value().name()) {
                collect_text(child_element, out);
            }
        }
    }
}

fn has_block_children(element: ElementRef<'_>) -> bool {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .any(|child| matches!(child.value().name(), "p" | "div"))
}
