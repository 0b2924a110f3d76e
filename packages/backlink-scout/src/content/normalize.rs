//! Payload normalization and plain-text helpers.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::{PagePayload, PageViews, ScrapedDocument};

/// Text-bearing fields in the order they are concatenated.
const TEXT_FIELDS: [&str; 4] = ["markdown", "md", "content", "text"];

static RE_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Reduce any payload shape to its text and HTML views.
///
/// Each present text field is appended on its own line; the HTML view is
/// only filled from a string `html` field.
pub fn normalize(payload: &PagePayload) -> PageViews {
    match payload {
        PagePayload::Absent => PageViews::default(),
        PagePayload::Raw(text) => PageViews::new(text.clone(), ""),
        PagePayload::Document(doc) => normalize_document(doc),
        PagePayload::Json(value) => normalize_json(value),
    }
}

fn normalize_document(doc: &ScrapedDocument) -> PageViews {
    let fields = [&doc.markdown, &doc.md, &doc.content, &doc.text];
    let mut text = String::new();
    for value in fields.into_iter().flatten() {
        text.push('\n');
        text.push_str(value);
    }
    PageViews::new(text, doc.html.clone().unwrap_or_default())
}

fn normalize_json(value: &serde_json::Value) -> PageViews {
    match value {
        serde_json::Value::String(s) => PageViews::new(s.clone(), ""),
        serde_json::Value::Object(map) => {
            let mut text = String::new();
            for field in TEXT_FIELDS {
                if let Some(serde_json::Value::String(s)) = map.get(field) {
                    text.push('\n');
                    text.push_str(s);
                }
            }
            let html = match map.get("html") {
                Some(serde_json::Value::String(s)) => s.clone(),
                _ => String::new(),
            };
            PageViews::new(text, html)
        }
        _ => PageViews::default(),
    }
}

/// Replace every `<...>` tag with a space.
pub fn strip_tags(html: &str) -> String {
    RE_TAG.replace_all(html, " ").into_owned()
}

/// Split on whitespace runs and rejoin with single spaces.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Keep at most `max_chars` characters, never splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
