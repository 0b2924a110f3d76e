//! Keyword sanitizing and footprint query generation.
//!
//! Template order matters: under a result cap, earlier queries get the
//! search budget first.

use indexmap::IndexSet;
use regex::Regex;
use std::sync::LazyLock;

use crate::content::collapse_whitespace;
use crate::types::QueryMode;

/// Footprint phrases users tend to paste into the keyword, longest first so
/// that "guest post" never eats part of "submit guest post".
const FOOTPRINT_PHRASES: &[&str] = &[
    "intitle:write for us",
    "inurl:write-for-us",
    "become a guest blogger",
    "editorial guidelines",
    "submit guest post",
    "guest contributor",
    "submit article",
    "guest bloggers",
    "guest blogger",
    "write for us",
    "guest posts",
    "guest post",
    "contribute",
    "submission",
    "guidelines",
];

static RE_FOOTPRINTS: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = FOOTPRINT_PHRASES
        .iter()
        .map(|p| regex::escape(p))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!("(?i){alternation}")).unwrap()
});

const CANONICAL_FOOTPRINTS: &[&str] = &[
    "'write for us'",
    "'guest post'",
    "'submit guest post'",
    "'guest contributor'",
    "'become a guest blogger'",
    "'editorial guidelines'",
    "'contribute'",
    "'submit article'",
];

const INDUSTRY_FOOTPRINTS: &[&str] = &[
    "'blog' 'write for us'",
    "'magazine' 'guest post'",
    "'publication' 'submit article'",
    "'content marketing' 'guest contributor'",
    "'industry blog' 'write for us'",
];

const CONTACT_FOOTPRINTS: &[&str] = &[
    "'contact us' 'editorial team'",
    "'submission guidelines' 'guest post'",
    "'write for us' 'contact'",
    "'guest post' 'submission process'",
    "'contribute' 'editorial guidelines'",
];

/// Strip quoting, `+` operators and footprint phrases from a raw keyword.
pub fn sanitize_keyword(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .replace('+', " ")
        .chars()
        .filter(|c| *c != '"' && *c != '\'')
        .collect();
    let lowered = cleaned.to_lowercase();
    let without_footprints = RE_FOOTPRINTS.replace_all(&lowered, " ");
    collapse_whitespace(&without_footprints)
}

/// The ordered query batch for `keyword`.
pub fn generate_queries(keyword: &str, mode: QueryMode) -> Vec<String> {
    let keyword = sanitize_keyword(keyword);
    let render = |footprint: &str| {
        if keyword.is_empty() {
            footprint.to_string()
        } else {
            format!("{keyword} {footprint}")
        }
    };

    let mut queries: IndexSet<String> = CANONICAL_FOOTPRINTS.iter().map(|f| render(f)).collect();
    if mode == QueryMode::Extended {
        queries.extend(INDUSTRY_FOOTPRINTS.iter().map(|f| render(f)));
        queries.extend(CONTACT_FOOTPRINTS.iter().map(|f| render(f)));
    }
    queries.into_iter().collect()
}

/// Number of queries [`generate_queries`] yields for a mode.
pub fn template_count(mode: QueryMode) -> usize {
    match mode {
        QueryMode::Standard => CANONICAL_FOOTPRINTS.len(),
        QueryMode::Extended => {
            CANONICAL_FOOTPRINTS.len() + INDUSTRY_FOOTPRINTS.len() + CONTACT_FOOTPRINTS.len()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_removes_operators_quotes_and_footprints() {
        let cleaned = sanitize_keyword("\"AI Writers\" + guest post");
        assert_eq!(cleaned, "ai writers");
        assert!(!cleaned.contains('+'));
        assert!(!cleaned.contains('"'));
        assert!(!cleaned.contains("guest post"));
    }

    #[test]
    fn test_sanitize_prefers_longer_phrases() {
        assert_eq!(sanitize_keyword("fintech submit guest post"), "fintech");
        assert_eq!(sanitize_keyword("SaaS inurl:write-for-us"), "saas");
        assert_eq!(sanitize_keyword("travel Guest Bloggers guidelines"), "travel");
    }

    #[test]
    fn test_sanitize_removes_contribute() {
        assert_eq!(sanitize_keyword("ai Contribute"), "ai");
        assert_eq!(
            generate_queries("ai contribute", QueryMode::Standard)[6],
            "ai 'contribute'"
        );
    }

    #[test]
    fn test_sanitize_blank() {
        assert_eq!(sanitize_keyword("   "), "");
        assert_eq!(sanitize_keyword("write for us"), "");
    }

    #[test]
    fn test_standard_queries_follow_template_order() {
        let queries = generate_queries("ai tools", QueryMode::Standard);
        assert_eq!(queries.len(), template_count(QueryMode::Standard));
        assert_eq!(queries[0], "ai tools 'write for us'");
        assert_eq!(queries[1], "ai tools 'guest post'");
        assert_eq!(queries[7], "ai tools 'submit article'");
    }

    #[test]
    fn test_extended_queries_append_after_canonical() {
        let standard = generate_queries("ai tools", QueryMode::Standard);
        let extended = generate_queries("ai tools", QueryMode::Extended);
        assert_eq!(extended.len(), 18);
        assert_eq!(extended.len(), template_count(QueryMode::Extended));
        assert_eq!(&extended[..standard.len()], standard.as_slice());
        assert_eq!(extended[8], "ai tools 'blog' 'write for us'");
    }

    #[test]
    fn test_generate_queries_is_pure() {
        assert_eq!(
            generate_queries("\"Rust\" + guest post", QueryMode::Extended),
            generate_queries("\"Rust\" + guest post", QueryMode::Extended)
        );
        assert_eq!(
            generate_queries("rust", QueryMode::Standard)[0],
            "rust 'write for us'"
        );
    }
}
