//! Second-phase merge of bulk page contents into finished records.

use std::collections::HashMap;

use super::enrich::apply_contacts;
use crate::contacts::extract_emails;
use crate::content::{collapse_whitespace, truncate_chars};
use crate::notes::compose_notes;
use crate::types::{ContextSource, Opportunity, PageContents, MAX_EXCERPT_CHARS};

/// Merge contents into the matching records by URL.
///
/// Highlights only fill empty lists, excerpts are only replaced when they
/// came from a weak tier, and emails are only searched for when none were
/// found on the page itself. Returns how many records matched.
pub fn merge_contents(
    opportunities: &mut [Opportunity],
    contents: &HashMap<String, PageContents>,
    keyword: &str,
) -> usize {
    let mut merged = 0;

    for opportunity in opportunities.iter_mut() {
        let Some(page) = contents.get(&opportunity.url) else {
            continue;
        };
        merged += 1;

        if opportunity.highlights.is_empty() && !page.highlights.is_empty() {
            opportunity.highlights = page.highlights.clone();
        }

        if opportunity.context_source.is_weak() {
            let source = if page.summary.trim().is_empty() {
                &page.text
            } else {
                &page.summary
            };
            let excerpt = truncate_chars(&collapse_whitespace(source), MAX_EXCERPT_CHARS)
                .trim_end()
                .to_string();
            if !excerpt.is_empty() {
                opportunity.page_excerpt = excerpt;
                opportunity.context_source = ContextSource::ContentsApi;
            }
        }

        if !opportunity.has_contact_email() {
            let emails = extract_emails(&page.text);
            if !emails.is_empty() {
                apply_contacts(opportunity, &emails);
            }
        }

        opportunity.notes = compose_notes(opportunity, keyword);
    }

    merged
}
