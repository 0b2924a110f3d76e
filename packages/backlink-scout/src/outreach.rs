//! Outreach email drafting from finished opportunities.
//!
//! Drafts are produced, never sent.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::content::truncate_chars;
use crate::traits::TextGenerator;
use crate::types::{ContextSource, Opportunity};

const MAX_INSIGHT_CHARS: usize = 1200;

/// Who is pitching, and what about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftRequest {
    pub subject: String,
    pub your_name: String,
    pub your_email: String,
    pub topic: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DraftStatus {
    /// Body written by the text generator.
    Ok,
    /// Placeholder body; no generator, or generation failed.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailDraft {
    pub to_email: String,
    pub subject: String,
    pub body: String,
    pub url: String,
    pub domain: String,
    pub title: String,
    pub context_source: ContextSource,
    pub excerpt_chars: usize,
    pub status: DraftStatus,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub note: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub model: String,
}

/// Up to `take` rows, those with a contact email first. Order is otherwise kept.
pub fn select_for_outreach(opportunities: &[Opportunity], take: usize) -> Vec<Opportunity> {
    let (with_email, without): (Vec<&Opportunity>, Vec<&Opportunity>) =
        opportunities.iter().partition(|o| o.has_contact_email());
    with_email
        .into_iter()
        .chain(without)
        .take(take)
        .cloned()
        .collect()
}

/// What the draft should lean on: the excerpt, else the notes, else the URL.
pub fn insights_for(opportunity: &Opportunity) -> String {
    if !opportunity.page_excerpt.trim().is_empty() {
        truncate_chars(opportunity.page_excerpt.trim(), MAX_INSIGHT_CHARS)
    } else if !opportunity.notes.trim().is_empty() {
        opportunity.notes.trim().to_string()
    } else {
        format!("Page: {}", opportunity.url)
    }
}

fn build_prompt(opportunity: &Opportunity, request: &DraftRequest) -> String {
    format!(
        "Write a short guest post pitch email to the editors of {site}.\n\
         Page: {url}\n\
         Page title: {title}\n\
         What the page says: {insights}\n\n\
         Proposed topic: {topic}\n\
         Sender: {name} <{email}>\n\n\
         Reference something specific from the page, propose the topic in one or two \
         sentences, and keep it under 150 words. Return only the email body.",
        site = opportunity.domain,
        url = opportunity.url,
        title = opportunity.title_str(),
        insights = insights_for(opportunity),
        topic = request.topic,
        name = request.your_name,
        email = request.your_email,
    )
}

/// Drop a leading `Subject:` line some models add despite instructions.
pub fn strip_subject_line(body: &str) -> String {
    let trimmed = body.trim_start();
    let first_line = trimmed.lines().next().unwrap_or("");
    if first_line.trim_start().to_lowercase().starts_with("subject:") {
        trimmed[first_line.len()..].trim().to_string()
    } else {
        body.trim().to_string()
    }
}

fn placeholder_body(opportunity: &Opportunity, request: &DraftRequest) -> String {
    format!(
        "[AI Draft] Hi {site} team,\n\n\
         I'd love to contribute a guest post on \"{topic}\" for your readers.\n\n\
         Best,\n{name}\n{email}",
        site = opportunity.domain,
        topic = request.topic,
        name = request.your_name,
        email = request.your_email,
    )
}

/// Draft one email per row.
///
/// Without a generator, or when generation fails, the row still gets a
/// placeholder draft with status [`DraftStatus::Fallback`].
pub async fn draft_emails(
    rows: &[Opportunity],
    generator: Option<&dyn TextGenerator>,
    request: &DraftRequest,
) -> Vec<EmailDraft> {
    let mut drafts = Vec::with_capacity(rows.len());

    for opportunity in rows {
        let (body, status, note) = match generator {
            None => (
                placeholder_body(opportunity, request),
                DraftStatus::Fallback,
                "no text generator configured".to_string(),
            ),
            Some(generator) => match generator.generate(&build_prompt(opportunity, request)).await {
                Ok(text) if !strip_subject_line(&text).is_empty() => {
                    (strip_subject_line(&text), DraftStatus::Ok, String::new())
                }
                Ok(_) => (
                    placeholder_body(opportunity, request),
                    DraftStatus::Fallback,
                    "generator returned an empty draft".to_string(),
                ),
                Err(e) => {
                    warn!(url = %opportunity.url, error = %e, "Draft generation failed");
                    (
                        placeholder_body(opportunity, request),
                        DraftStatus::Fallback,
                        format!("generation failed: {e}"),
                    )
                }
            },
        };

        drafts.push(EmailDraft {
            to_email: opportunity.contact_email.clone(),
            subject: request.subject.clone(),
            body,
            url: opportunity.url.clone(),
            domain: opportunity.domain.clone(),
            title: opportunity.title_str().to_string(),
            context_source: opportunity.context_source,
            excerpt_chars: opportunity.page_excerpt.chars().count(),
            status,
            note,
            model: generator.map(|g| g.model().to_string()).unwrap_or_default(),
        });
    }

    info!(count = drafts.len(), "Drafted outreach emails");
    drafts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockTextGenerator;

    fn request() -> DraftRequest {
        DraftRequest {
            subject: "Guest post idea".to_string(),
            your_name: "Sam".to_string(),
            your_email: "sam@writer.io".to_string(),
            topic: "Evaluating AI coding tools".to_string(),
        }
    }

    fn row(url: &str, email: &str) -> Opportunity {
        let mut opp = Opportunity::new(url);
        opp.contact_email = email.to_string();
        opp
    }

    #[test]
    fn test_select_prefers_rows_with_email() {
        let rows = vec![
            row("https://a.com", ""),
            row("https://b.com", "ed@b.com"),
            row("https://c.com", ""),
            row("https://d.com", "ed@d.com"),
        ];
        let picked: Vec<String> = select_for_outreach(&rows, 3).into_iter().map(|o| o.url).collect();
        assert_eq!(picked, vec!["https://b.com", "https://d.com", "https://a.com"]);
    }

    #[test]
    fn test_insights_fallback_order() {
        let mut opp = Opportunity::new("https://a.com");
        assert_eq!(insights_for(&opp), "Page: https://a.com");
        opp.notes = "no contact".to_string();
        assert_eq!(insights_for(&opp), "no contact");
        opp.page_excerpt = "We accept guest posts".to_string();
        assert_eq!(insights_for(&opp), "We accept guest posts");
    }

    #[test]
    fn test_strip_subject_line() {
        assert_eq!(strip_subject_line("Subject: Hi\n\nHello there"), "Hello there");
        assert_eq!(strip_subject_line("  subject: x\nBody"), "Body");
        assert_eq!(strip_subject_line("Hello\nSubject: later"), "Hello\nSubject: later");
    }

    #[tokio::test]
    async fn test_generated_draft_is_ok() {
        let generator = MockTextGenerator::new("Subject: Pitch\nHi editors, here is my idea.");
        let rows = vec![row("https://b.com", "ed@b.com")];

        let drafts = draft_emails(&rows, Some(&generator), &request()).await;

        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].status, DraftStatus::Ok);
        assert_eq!(drafts[0].body, "Hi editors, here is my idea.");
        assert_eq!(drafts[0].to_email, "ed@b.com");
        assert_eq!(drafts[0].model, "mock-model");
        assert!(generator.prompts()[0].contains("Evaluating AI coding tools"));
    }

    #[tokio::test]
    async fn test_failed_generation_falls_back() {
        let generator = MockTextGenerator::failing();
        let drafts = draft_emails(&[row("https://b.com", "")], Some(&generator), &request()).await;

        assert_eq!(drafts[0].status, DraftStatus::Fallback);
        assert!(drafts[0].body.starts_with("[AI Draft]"));
        assert!(drafts[0].note.starts_with("generation failed"));
    }

    #[tokio::test]
    async fn test_no_generator_falls_back() {
        let drafts = draft_emails(&[row("https://b.com", "")], None, &request()).await;
        assert_eq!(drafts[0].status, DraftStatus::Fallback);
        assert!(drafts[0].body.contains("Sam"));
        assert_eq!(drafts[0].model, "");
    }

    #[test]
    fn test_draft_serializes_status_lowercase() {
        let draft = EmailDraft {
            to_email: String::new(),
            subject: "s".to_string(),
            body: "b".to_string(),
            url: "https://a.com".to_string(),
            domain: "a.com".to_string(),
            title: String::new(),
            context_source: ContextSource::Empty,
            excerpt_chars: 0,
            status: DraftStatus::Fallback,
            note: String::new(),
            model: String::new(),
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["status"], "fallback");
        assert_eq!(value["context_source"], "empty");
        assert!(value.get("note").is_none());
    }
}
