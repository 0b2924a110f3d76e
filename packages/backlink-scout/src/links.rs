//! Link discovery and guest-post support link classification.

use indexmap::IndexSet;
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static RE_HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"href\s*=\s*["']([^"']+)["']"#).unwrap());

const GUIDELINE_KEYWORDS: &[&str] = &[
    "write-for-us",
    "write for us",
    "guest",
    "contribute",
    "submission",
    "submit",
    "guidelines",
    "editorial",
];

const CONTACT_KEYWORDS: &[&str] = &["contact", "contact-us", "contactus", "contact_us", "form"];

/// Support pages found among a page's links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupportLinks {
    pub guidelines: Option<String>,
    pub contact: Option<String>,
}

/// Absolute URLs of every `href` in `html`, first-seen order, no duplicates.
///
/// `javascript:` links and hrefs that cannot be resolved are skipped.
pub fn extract_links(html: &str, base_url: &str) -> Vec<String> {
    let base = Url::parse(base_url).ok();
    let mut links = IndexSet::new();

    for cap in RE_HREF.captures_iter(html) {
        let href = cap[1].trim();
        if href.to_ascii_lowercase().starts_with("javascript:") {
            continue;
        }
        let resolved = match &base {
            Some(base) => base.join(href),
            None => Url::parse(href),
        };
        if let Ok(url) = resolved {
            links.insert(url.to_string());
        }
    }

    links.into_iter().collect()
}

/// First guidelines-looking and first contact-looking link, independently.
pub fn classify_support_links(links: &[String]) -> SupportLinks {
    let mut found = SupportLinks::default();

    for link in links {
        let lower = link.to_lowercase();
        if found.guidelines.is_none() && GUIDELINE_KEYWORDS.iter().any(|k| lower.contains(k)) {
            found.guidelines = Some(link.clone());
        }
        if found.contact.is_none() && CONTACT_KEYWORDS.iter().any(|k| lower.contains(k)) {
            found.contact = Some(link.clone());
        }
        if found.guidelines.is_some() && found.contact.is_some() {
            break;
        }
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_extract_links_resolves_and_dedups() {
        let html = r#"
            <a href="/write-for-us">Write</a>
            <a href='contact'>Contact</a>
            <a href="javascript:void(0)">x</a>
            <a href="JavaScript:alert(1)">y</a>
            <a href="https://x.com/write-for-us">dup</a>
            <a href = "https://other.org/a">ext</a>
        "#;
        assert_eq!(
            extract_links(html, "https://x.com/blog/"),
            strings(&[
                "https://x.com/write-for-us",
                "https://x.com/blog/contact",
                "https://other.org/a",
            ])
        );
    }

    #[test]
    fn test_extract_links_with_unparseable_base_keeps_absolute_only() {
        let html = r#"<a href="/relative">r</a><a href="https://x.com/abs">a</a>"#;
        assert_eq!(extract_links(html, "not a url"), strings(&["https://x.com/abs"]));
    }

    #[test]
    fn test_classify_first_seen_wins() {
        let links = strings(&[
            "https://x.com/about",
            "https://x.com/write-for-us",
            "https://x.com/contact",
        ]);
        assert_eq!(
            classify_support_links(&links),
            SupportLinks {
                guidelines: Some("https://x.com/write-for-us".to_string()),
                contact: Some("https://x.com/contact".to_string()),
            }
        );
    }

    #[test]
    fn test_one_link_can_fill_both_slots() {
        let links = strings(&["https://x.com/guest-submission-form", "https://x.com/contact"]);
        let found = classify_support_links(&links);
        assert_eq!(found.guidelines, found.contact);
        assert_eq!(found.guidelines.as_deref(), Some("https://x.com/guest-submission-form"));
    }

    #[test]
    fn test_no_matches() {
        let links = strings(&["https://x.com/", "https://x.com/about"]);
        assert_eq!(classify_support_links(&links), SupportLinks::default());
    }
}
