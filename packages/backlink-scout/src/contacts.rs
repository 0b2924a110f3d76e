//! Contact email extraction and ranking.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static RE_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").unwrap()
});

/// Substrings that mark an address as a placeholder or unmonitored inbox.
const PLACEHOLDER_MARKERS: &[&str] = &["example.com", "no-reply", "noreply"];

/// Local-part words suggesting an editorial inbox.
const ROLE_KEYWORDS: &[&str] = &[
    "editor", "content", "submit", "contrib", "press", "contact", "info",
];

/// Local-part words suggesting an inbox that won't handle pitches.
const PENALTY_KEYWORDS: &[&str] = &["sales", "job", "career", "support"];

/// All distinct emails in `text`, lowercased and sorted.
pub fn extract_emails(text: &str) -> Vec<String> {
    let found: BTreeSet<String> = RE_EMAIL
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .filter(|email| !PLACEHOLDER_MARKERS.iter().any(|p| email.contains(p)))
        .collect();
    found.into_iter().collect()
}

/// Pick the address most likely to reach an editor of `domain`.
///
/// Returns an empty string when there are no candidates. Ties go to the
/// lexicographically smallest address.
pub fn choose_best_email(emails: &[String], domain: &str) -> String {
    let page_domain = domain.trim().to_lowercase();

    emails
        .iter()
        .map(|email| (score_email(email, &page_domain), email))
        .min_by(|(sa, ea), (sb, eb)| sb.cmp(sa).then_with(|| ea.cmp(eb)))
        .map(|(_, email)| email.clone())
        .unwrap_or_default()
}

fn score_email(email: &str, page_domain: &str) -> i32 {
    let email = email.to_lowercase();
    let (local, email_domain) = email.split_once('@').unwrap_or((email.as_str(), ""));

    let mut score = 0;
    if !page_domain.is_empty() && email_domain.ends_with(page_domain) {
        score += 3;
    }
    if ROLE_KEYWORDS.iter().any(|k| local.contains(k)) {
        score += 2;
    }
    if PENALTY_KEYWORDS.iter().any(|k| local.contains(k)) {
        score -= 1;
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_extract_emails_sorted_lowercase_unique() {
        let text = "Reach Editor@Foo.com or sales@foo.com. Again: editor@foo.com";
        assert_eq!(
            extract_emails(text),
            vec!["editor@foo.com".to_string(), "sales@foo.com".to_string()]
        );
    }

    #[test]
    fn test_extract_emails_drops_placeholders() {
        let text = "you@example.com no-reply@site.io noreply@site.io real@site.io";
        assert_eq!(extract_emails(text), vec!["real@site.io".to_string()]);
    }

    #[test]
    fn test_extract_emails_requires_alpha_tld() {
        assert!(extract_emails("user@host.1").is_empty());
        assert!(extract_emails("nothing here").is_empty());
    }

    #[test]
    fn test_choose_best_email_prefers_domain_and_role() {
        let emails = vec!["a@example.org".to_string(), "editor@foo.com".to_string()];
        assert_eq!(choose_best_email(&emails, "foo.com"), "editor@foo.com");
    }

    #[test]
    fn test_choose_best_email_matches_page_domain_as_given() {
        // "foo.com" does not end with "www.foo.com", so only the role word counts.
        let emails = vec!["ed@foo.com".to_string(), "editor@zzz.org".to_string()];
        assert_eq!(choose_best_email(&emails, "www.foo.com"), "editor@zzz.org");
        assert_eq!(choose_best_email(&emails, "foo.com"), "ed@foo.com");
    }

    #[test]
    fn test_choose_best_email_penalizes_sales() {
        let emails = vec!["sales@foo.com".to_string(), "team@foo.com".to_string()];
        assert_eq!(choose_best_email(&emails, "foo.com"), "team@foo.com");
    }

    #[test]
    fn test_choose_best_email_tie_breaks_alphabetically() {
        let emails = vec!["zed@x.io".to_string(), "amy@y.io".to_string()];
        assert_eq!(choose_best_email(&emails, ""), "amy@y.io");
    }

    #[test]
    fn test_choose_best_email_empty() {
        assert_eq!(choose_best_email(&[], "foo.com"), "");
    }

    proptest! {
        #[test]
        fn prop_extract_emails_is_idempotent_and_clean(
            locals in proptest::collection::vec("[A-Za-z]{1,8}", 0..6),
            noise in "[ a-z.,;]{0,40}",
        ) {
            let mut text = noise.clone();
            for (i, local) in locals.iter().enumerate() {
                let host = if i % 2 == 0 { "Example.com" } else { "Blog.IO" };
                text.push_str(&format!(" {}@{} {}", local, host, noise));
            }

            let first = extract_emails(&text);
            let second = extract_emails(&first.join(" "));
            prop_assert_eq!(&first, &second);

            let mut sorted = first.clone();
            sorted.sort();
            sorted.dedup();
            prop_assert_eq!(&first, &sorted);

            for email in &first {
                prop_assert_eq!(email.clone(), email.to_lowercase());
                prop_assert!(!email.contains("example.com"));
                prop_assert!(!email.contains("noreply") && !email.contains("no-reply"));
            }
        }
    }
}
