//! Email providers.

mod mailersend;
mod sendgrid;

pub use mailersend::MailerSendSender;
pub use sendgrid::SendGridSender;

use std::sync::Arc;

use crate::config::{EmailProvider, ScoutConfig};
use crate::error::{Result, ScoutError, SourceError};
use crate::traits::BulkSender;

/// Build the configured email provider.
///
/// Unlike search, sending is only attempted on request, so a missing
/// provider, sender address or key is a configuration error.
pub fn sender_from_config(config: &ScoutConfig, sandbox: bool) -> Result<Arc<dyn BulkSender>> {
    let provider = config
        .email_provider
        .ok_or_else(|| ScoutError::Config("EMAIL_PROVIDER is not set".to_string()))?;
    let from_email = config
        .from_email
        .clone()
        .ok_or_else(|| ScoutError::Config("FROM_EMAIL is not set".to_string()))?;
    let setup = |e: SourceError| ScoutError::Config(format!("email client: {e}"));

    match provider {
        EmailProvider::SendGrid => {
            let key = config
                .sendgrid_api_key
                .clone()
                .ok_or_else(|| ScoutError::Config("SENDGRID_API_KEY is not set".to_string()))?;
            let sender = SendGridSender::new(key, from_email, config.send_timeout, config.retry)
                .map_err(setup)?
                .with_sandbox(sandbox);
            Ok(Arc::new(sender))
        }
        EmailProvider::MailerSend => {
            let key = config
                .mailersend_api_key
                .clone()
                .ok_or_else(|| ScoutError::Config("MAILERSEND_API_KEY is not set".to_string()))?;
            let sender = MailerSendSender::new(key, from_email, config.send_timeout, config.retry)
                .map_err(setup)?;
            Ok(Arc::new(sender))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::ApiKey;

    #[test]
    fn test_missing_provider_settings_are_config_errors() {
        let config = ScoutConfig::default();
        let err = sender_from_config(&config, false).err().unwrap();
        assert!(err.to_string().contains("EMAIL_PROVIDER"));

        let config = ScoutConfig {
            from_email: Some("me@writer.io".to_string()),
            ..ScoutConfig::default()
        }
        .with_email_provider(EmailProvider::MailerSend);
        let err = sender_from_config(&config, false).err().unwrap();
        assert!(err.to_string().contains("MAILERSEND_API_KEY"));
    }

    #[test]
    fn test_builds_selected_provider() {
        let config = ScoutConfig {
            from_email: Some("me@writer.io".to_string()),
            sendgrid_api_key: Some(ApiKey::new("sg-1")),
            ..ScoutConfig::default()
        }
        .with_email_provider(EmailProvider::SendGrid);

        let sender = sender_from_config(&config, true).unwrap();
        assert_eq!(sender.name(), "sendgrid");
    }
}
