//! Human-readable signal summary for an opportunity.

use crate::queries::sanitize_keyword;
use crate::types::Opportunity;

/// Comma-joined signals, in fixed order: guidelines, contact channel, title match.
pub fn compose_notes(opportunity: &Opportunity, keyword: &str) -> String {
    let mut notes: Vec<&str> = Vec::with_capacity(3);

    if opportunity.guidelines_url.is_some() {
        notes.push("guidelines page");
    }

    if opportunity.has_contact_email() {
        notes.push("email found");
    } else if opportunity.contact_form_url.is_some() {
        notes.push("contact form");
    } else {
        notes.push("no contact");
    }

    let keyword = sanitize_keyword(keyword);
    if let Some(token) = keyword.split_whitespace().next() {
        if opportunity
            .title_str()
            .to_lowercase()
            .contains(&token.to_lowercase())
        {
            notes.push("keyword in title");
        }
    }

    notes.join(", ")
}
