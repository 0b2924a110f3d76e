//! SendGrid v3 mail send.

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

use crate::error::{ensure_success, SourceError, SourceResult};
use crate::searchers::RetryPolicy;
use crate::security::ApiKey;
use crate::traits::BulkSender;
use crate::types::OutgoingEmail;

const SENDGRID_BASE_URL: &str = "https://api.sendgrid.com";

pub struct SendGridSender {
    client: reqwest::Client,
    api_key: ApiKey,
    from_email: String,
    sandbox: bool,
    retry: RetryPolicy,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct MailSend<'a> {
    personalizations: [Personalization<'a>; 1],
    from: Address<'a>,
    subject: &'a str,
    content: [Content<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    mail_settings: Option<MailSettings>,
}

#[derive(Debug, Serialize)]
struct Personalization<'a> {
    to: [Address<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Address<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(rename = "type")]
    content_type: &'static str,
    value: &'a str,
}

#[derive(Debug, Serialize)]
struct MailSettings {
    sandbox_mode: Toggle,
}

#[derive(Debug, Serialize)]
struct Toggle {
    enable: bool,
}

impl SendGridSender {
    pub fn new(
        api_key: ApiKey,
        from_email: impl Into<String>,
        timeout: Duration,
        retry: RetryPolicy,
    ) -> SourceResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Http(Box::new(e)))?;

        Ok(Self {
            client,
            api_key,
            from_email: from_email.into(),
            sandbox: false,
            retry,
            base_url: SENDGRID_BASE_URL.to_string(),
        })
    }

    /// Validate requests without delivering them.
    pub fn with_sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn body<'a>(&'a self, email: &'a OutgoingEmail) -> MailSend<'a> {
        MailSend {
            personalizations: [Personalization {
                to: [Address {
                    email: &email.to_email,
                }],
            }],
            from: Address {
                email: &self.from_email,
            },
            subject: &email.subject,
            content: [Content {
                content_type: "text/plain",
                value: &email.body,
            }],
            mail_settings: self.sandbox.then_some(MailSettings {
                sandbox_mode: Toggle { enable: true },
            }),
        }
    }
}

#[async_trait]
impl BulkSender for SendGridSender {
    fn name(&self) -> &str {
        "sendgrid"
    }

    async fn send_one(&self, email: &OutgoingEmail) -> SourceResult<u16> {
        let url = format!("{}/v3/mail/send", self.base_url);
        let body = self.body(email);
        self.retry
            .run("sendgrid", || async {
                let response = self
                    .client
                    .post(&url)
                    .header("Authorization", format!("Bearer {}", self.api_key.expose()))
                    .json(&body)
                    .send()
                    .await?;
                Ok::<u16, SourceError>(ensure_success(response).await?.status().as_u16())
            })
            .await
    }
}
