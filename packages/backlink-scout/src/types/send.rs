//! Rows and outcomes of a bulk email send.

use serde::{Deserialize, Serialize};

/// One message to dispatch. Plain text only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingEmail {
    pub to_email: String,
    pub subject: String,
    pub body: String,
}

impl OutgoingEmail {
    pub fn new(
        to_email: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            to_email: to_email.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// A row needs a recipient, a subject and a body to be sendable.
    pub fn is_complete(&self) -> bool {
        !self.to_email.trim().is_empty()
            && !self.subject.trim().is_empty()
            && !self.body.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SendStatus {
    Sent,
    DryRun,
    Error,
}

/// Per-row result of a bulk send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendOutcome {
    /// 1-based position of the row in the input.
    pub row: usize,
    pub to_email: String,
    pub status: SendStatus,
    /// Provider status code, or a short failure tag such as `missing_data`.
    pub code: String,
    pub message: String,
}

impl SendOutcome {
    pub fn is_sent(&self) -> bool {
        self.status == SendStatus::Sent
    }
}
