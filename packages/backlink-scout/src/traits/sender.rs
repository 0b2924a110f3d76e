//! Email dispatch capability.

use async_trait::async_trait;

use crate::error::SourceResult;
use crate::types::OutgoingEmail;

/// A provider that delivers one plain-text email per call.
///
/// The paced loop over many rows lives in [`crate::dispatch::send_bulk`];
/// implementations only handle a single message.
///
/// # Implementations
///
/// - `SendGridSender` - SendGrid v3 mail send
/// - `MailerSendSender` - MailerSend email API
/// - `MockSender` - records messages, for tests
#[async_trait]
pub trait BulkSender: Send + Sync {
    /// Provider name for logging and outcome messages.
    fn name(&self) -> &str;

    /// Deliver one message. Returns the provider's HTTP status on acceptance.
    async fn send_one(&self, email: &OutgoingEmail) -> SourceResult<u16>;
}
