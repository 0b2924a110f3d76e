//! Runtime configuration, read from the environment in one place.

use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Result, ScoutError};
use crate::searchers::RetryPolicy;
use crate::security::ApiKey;

/// Which search backends a run queries, in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchBackend {
    #[default]
    Serper,
    Exa,
    Both,
}

impl SearchBackend {
    pub fn uses_serper(&self) -> bool {
        matches!(self, SearchBackend::Serper | SearchBackend::Both)
    }

    pub fn uses_exa(&self) -> bool {
        matches!(self, SearchBackend::Exa | SearchBackend::Both)
    }
}

impl FromStr for SearchBackend {
    type Err = ScoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "serper" => Ok(SearchBackend::Serper),
            "exa" => Ok(SearchBackend::Exa),
            "both" => Ok(SearchBackend::Both),
            other => Err(ScoutError::Config(format!(
                "SEARCH_BACKEND must be serper, exa or both (got {other:?})"
            ))),
        }
    }
}

/// Which provider delivers outreach email.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailProvider {
    SendGrid,
    MailerSend,
}

impl FromStr for EmailProvider {
    type Err = ScoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "sendgrid" => Ok(EmailProvider::SendGrid),
            "mailersend" => Ok(EmailProvider::MailerSend),
            other => Err(ScoutError::Config(format!(
                "EMAIL_PROVIDER must be sendgrid or mailersend (got {other:?})"
            ))),
        }
    }
}

/// Scout configuration.
///
/// Built once at the edge of the program and handed to
/// [`crate::OpportunityFinder::from_config`]. Nothing inside the library
/// reads the environment.
#[derive(Debug, Clone)]
pub struct ScoutConfig {
    pub serper_api_key: Option<ApiKey>,
    pub exa_api_key: Option<ApiKey>,
    pub firecrawl_api_key: Option<ApiKey>,
    pub openai_api_key: Option<ApiKey>,
    pub openai_model: String,
    pub sendgrid_api_key: Option<ApiKey>,
    pub mailersend_api_key: Option<ApiKey>,
    pub email_provider: Option<EmailProvider>,
    /// Sender address for outreach email.
    pub from_email: Option<String>,
    pub send_rate_limit_per_sec: f64,
    pub send_timeout: Duration,
    pub backend: SearchBackend,
    pub max_results: usize,
    pub results_per_query: usize,
    pub search_timeout: Duration,
    pub probe_timeout: Duration,
    pub exa_probe_timeout: Duration,
    pub fetch_timeout: Duration,
    pub exa_request_spacing: Duration,
    pub retry: RetryPolicy,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            serper_api_key: None,
            exa_api_key: None,
            firecrawl_api_key: None,
            openai_api_key: None,
            openai_model: "gpt-4o-mini".to_string(),
            sendgrid_api_key: None,
            mailersend_api_key: None,
            email_provider: None,
            from_email: None,
            send_rate_limit_per_sec: 10.0,
            send_timeout: Duration::from_secs(30),
            backend: SearchBackend::default(),
            max_results: 10,
            results_per_query: 10,
            search_timeout: Duration::from_secs(30),
            probe_timeout: Duration::from_secs(3),
            exa_probe_timeout: Duration::from_secs(5),
            fetch_timeout: Duration::from_secs(15),
            exa_request_spacing: Duration::from_millis(100),
            retry: RetryPolicy::default(),
        }
    }
}

impl ScoutConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from any variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let key = |name: &str| lookup(name).and_then(ApiKey::non_empty);
        let defaults = Self::default();

        let backend = match var("SEARCH_BACKEND") {
            Some(value) => value.parse()?,
            None => defaults.backend,
        };

        let max_results = match var("MAX_RESULTS") {
            Some(value) => value.trim().parse::<usize>().map_err(|_| {
                ScoutError::Config(format!("MAX_RESULTS must be an integer (got {value:?})"))
            })?,
            None => defaults.max_results,
        };

        let email_provider = var("EMAIL_PROVIDER")
            .map(|value| value.parse::<EmailProvider>())
            .transpose()?;

        let send_rate_limit_per_sec = match var("SEND_RATE_LIMIT") {
            Some(value) => value
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|rate| rate.is_finite() && *rate > 0.0)
                .ok_or_else(|| {
                    ScoutError::Config(format!(
                        "SEND_RATE_LIMIT must be a positive number (got {value:?})"
                    ))
                })?,
            None => defaults.send_rate_limit_per_sec,
        };

        Ok(Self {
            serper_api_key: key("SERPER_API_KEY"),
            exa_api_key: key("EXA_API_KEY"),
            firecrawl_api_key: key("FIRECRAWL_API_KEY"),
            openai_api_key: key("OPENAI_API_KEY"),
            openai_model: var("OPENAI_MODEL")
                .map(|m| m.trim().to_string())
                .unwrap_or_else(|| defaults.openai_model.clone()),
            sendgrid_api_key: key("SENDGRID_API_KEY"),
            mailersend_api_key: key("MAILERSEND_API_KEY"),
            email_provider,
            from_email: var("FROM_EMAIL").map(|v| v.trim().to_string()),
            send_rate_limit_per_sec,
            backend,
            max_results,
            ..defaults
        })
    }

    /// Override the backend selection.
    pub fn with_backend(mut self, backend: SearchBackend) -> Self {
        self.backend = backend;
        self
    }

    /// Override the email provider.
    pub fn with_email_provider(mut self, provider: EmailProvider) -> Self {
        self.email_provider = Some(provider);
        self
    }

    /// Override the result cap.
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }
}
