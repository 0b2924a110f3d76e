//! Bulk email dispatch with pacing and per-row outcomes.
//!
//! A failing row never stops the batch; its outcome records why.

use std::time::Duration;
use tracing::{info, warn};

use crate::error::SourceError;
use crate::outreach::EmailDraft;
use crate::pacer::Pacer;
use crate::traits::BulkSender;
use crate::types::{OutgoingEmail, SendOutcome, SendStatus};

/// How a bulk send is run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SendOptions {
    /// Upper bound on messages per second. Values below 1 count as 1.
    pub rate_limit_per_sec: f64,
    /// Record what would be sent without calling the provider.
    pub dry_run: bool,
}

impl Default for SendOptions {
    fn default() -> Self {
        Self {
            rate_limit_per_sec: 10.0,
            dry_run: false,
        }
    }
}

impl SendOptions {
    /// Minimum spacing between two provider calls.
    pub fn spacing(&self) -> Duration {
        let rate = if self.rate_limit_per_sec.is_finite() {
            self.rate_limit_per_sec.max(1.0)
        } else {
            1.0
        };
        Duration::from_secs_f64(1.0 / rate)
    }
}

/// Turn drafts into sendable rows, keeping only those with a recipient.
pub fn outgoing_from_drafts(drafts: &[EmailDraft]) -> Vec<OutgoingEmail> {
    drafts
        .iter()
        .filter(|d| !d.to_email.trim().is_empty())
        .map(|d| OutgoingEmail::new(d.to_email.trim(), d.subject.clone(), d.body.clone()))
        .collect()
}

/// Send every row through `sender`, one at a time, at most
/// `options.rate_limit_per_sec` per second.
pub async fn send_bulk(
    rows: &[OutgoingEmail],
    sender: &dyn BulkSender,
    options: &SendOptions,
) -> Vec<SendOutcome> {
    let pacer = Pacer::new(options.spacing());
    let mut outcomes = Vec::with_capacity(rows.len());

    for (index, email) in rows.iter().enumerate() {
        let row = index + 1;
        let outcome = |status, code: String, message: String| SendOutcome {
            row,
            to_email: email.to_email.trim().to_string(),
            status,
            code,
            message,
        };

        if !email.is_complete() {
            outcomes.push(outcome(
                SendStatus::Error,
                "missing_data".to_string(),
                "Missing required field(s)".to_string(),
            ));
            continue;
        }

        if options.dry_run {
            outcomes.push(outcome(
                SendStatus::DryRun,
                "200".to_string(),
                "Would send email".to_string(),
            ));
            continue;
        }

        pacer.wait().await;
        match sender.send_one(email).await {
            Ok(status) => outcomes.push(outcome(
                SendStatus::Sent,
                status.to_string(),
                "Email sent successfully".to_string(),
            )),
            Err(e) => {
                warn!(row, provider = sender.name(), error = %e, "Send failed");
                outcomes.push(outcome(SendStatus::Error, failure_code(&e), e.to_string()));
            }
        }
    }

    let sent = outcomes.iter().filter(|o| o.is_sent()).count();
    info!(provider = sender.name(), rows = rows.len(), sent, dry_run = options.dry_run, "Bulk send finished");
    outcomes
}

fn failure_code(error: &SourceError) -> String {
    match error {
        SourceError::Status { status, .. } => status.to_string(),
        SourceError::RetriesExhausted { last, .. } => failure_code(last),
        SourceError::Timeout { .. } => "timeout".to_string(),
        _ => "exception".to_string(),
    }
}
