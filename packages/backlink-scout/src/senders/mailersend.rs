//! MailerSend email API.

use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

use crate::error::{ensure_success, SourceError, SourceResult};
use crate::searchers::RetryPolicy;
use crate::security::ApiKey;
use crate::traits::BulkSender;
use crate::types::OutgoingEmail;

const MAILERSEND_BASE_URL: &str = "https://api.mailersend.com";
const SENDER_NAME: &str = "Backlink Scout";

pub struct MailerSendSender {
    client: reqwest::Client,
    api_key: ApiKey,
    from_email: String,
    retry: RetryPolicy,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct EmailRequest<'a> {
    from: Sender<'a>,
    to: [Recipient<'a>; 1],
    subject: &'a str,
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct Sender<'a> {
    email: &'a str,
    name: &'static str,
}

#[derive(Debug, Serialize)]
struct Recipient<'a> {
    email: &'a str,
}

impl MailerSendSender {
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
            retry,
            base_url: MAILERSEND_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn body<'a>(&'a self, email: &'a OutgoingEmail) -> EmailRequest<'a> {
        EmailRequest {
            from: Sender {
                email: &self.from_email,
                name: SENDER_NAME,
            },
            to: [Recipient {
                email: &email.to_email,
            }],
            subject: &email.subject,
            text: &email.body,
        }
    }
}

#[async_trait]
impl BulkSender for MailerSendSender {
    fn name(&self) -> &str {
        "mailersend"
    }

    async fn send_one(&self, email: &OutgoingEmail) -> SourceResult<u16> {
        let url = format!("{}/v1/email", self.base_url);
        let body = self.body(email);
        self.retry
            .run("mailersend", || async {
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
