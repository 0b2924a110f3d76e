//! Command-line entry point.
//!
//! Prints opportunities (and optional outreach drafts and send outcomes)
//! as JSON on stdout. Logs go to stderr.

use anyhow::{Context, Result};
use backlink_scout::{
    draft_emails, outgoing_from_drafts, select_for_outreach, send_bulk,
    senders::sender_from_config, DraftRequest, EmailDraft, EmailProvider, Opportunity,
    OpportunityFinder, ResearchRequest, ScoutConfig, SearchBackend, SendOptions, SendOutcome,
};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "backlink-scout")]
#[command(about = "Find guest-post opportunities for a keyword")]
struct Cli {
    /// Topic keyword, e.g. "ai tools"
    keyword: Option<String>,

    /// Maximum number of opportunities (defaults to MAX_RESULTS or 10)
    #[arg(long)]
    max_results: Option<usize>,

    /// Analyse these URLs instead of searching (comma-separated)
    #[arg(long, value_delimiter = ',')]
    urls: Vec<String>,

    /// Search backend(s) to query (defaults to SEARCH_BACKEND or serper)
    #[arg(long, value_enum)]
    backend: Option<BackendArg>,

    /// Draft outreach emails for the top N opportunities
    #[arg(long)]
    draft: Option<usize>,

    #[arg(long, default_value = "Guest post idea")]
    subject: String,

    #[arg(long, default_value = "")]
    your_name: String,

    #[arg(long, default_value = "")]
    your_email: String,

    /// Topic to pitch (defaults to the keyword)
    #[arg(long)]
    topic: Option<String>,

    /// Send the drafts through this provider
    #[arg(long, value_enum, requires = "draft")]
    send: Option<ProviderArg>,

    /// Sender address (defaults to FROM_EMAIL)
    #[arg(long)]
    from_email: Option<String>,

    /// Maximum emails per second (defaults to SEND_RATE_LIMIT or 10)
    #[arg(long)]
    rate_limit: Option<f64>,

    /// Record what would be sent without sending
    #[arg(long)]
    dry_run: bool,

    /// Ask the provider to validate without delivering (SendGrid only)
    #[arg(long)]
    sandbox: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum BackendArg {
    Serper,
    Exa,
    Both,
}

impl From<BackendArg> for SearchBackend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Serper => SearchBackend::Serper,
            BackendArg::Exa => SearchBackend::Exa,
            BackendArg::Both => SearchBackend::Both,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ProviderArg {
    Sendgrid,
    Mailersend,
}

impl From<ProviderArg> for EmailProvider {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Sendgrid => EmailProvider::SendGrid,
            ProviderArg::Mailersend => EmailProvider::MailerSend,
        }
    }
}

#[derive(Serialize)]
struct Output {
    opportunities: Vec<Opportunity>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    drafts: Vec<EmailDraft>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    sends: Vec<SendOutcome>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "backlink_scout=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true),
        )
        .init();

    let cli = Cli::parse();

    let mut config = ScoutConfig::from_env().context("Failed to load configuration")?;
    if let Some(backend) = cli.backend {
        config = config.with_backend(backend.into());
    }
    if let Some(max_results) = cli.max_results {
        config = config.with_max_results(max_results);
    }
    if let Some(provider) = cli.send {
        config = config.with_email_provider(provider.into());
    }
    if let Some(from_email) = cli.from_email.clone() {
        config.from_email = Some(from_email);
    }
    if let Some(rate) = cli.rate_limit {
        config.send_rate_limit_per_sec = rate;
    }

    let finder = OpportunityFinder::from_config(&config).context("Failed to set up providers")?;
    let sender = match cli.send {
        Some(_) => Some(
            sender_from_config(&config, cli.sandbox).context("Failed to set up email provider")?,
        ),
        None => None,
    };

    let request = ResearchRequest {
        keyword: cli.keyword.clone(),
        urls: cli.urls.clone(),
        max_results: config.max_results,
    };
    let opportunities = finder
        .research(&request)
        .await
        .context("Opportunity research failed")?;

    let drafts = match cli.draft {
        Some(take) if take > 0 => {
            let draft_request = DraftRequest {
                subject: cli.subject,
                your_name: cli.your_name,
                your_email: cli.your_email,
                topic: cli.topic.or(cli.keyword).unwrap_or_default(),
            };
            let rows = select_for_outreach(&opportunities, take);
            draft_emails(&rows, finder.generator(), &draft_request).await
        }
        _ => Vec::new(),
    };

    let sends = match &sender {
        Some(sender) => {
            let options = SendOptions {
                rate_limit_per_sec: config.send_rate_limit_per_sec,
                dry_run: cli.dry_run,
            };
            send_bulk(&outgoing_from_drafts(&drafts), sender.as_ref(), &options).await
        }
        None => Vec::new(),
    };

    let output = Output {
        opportunities,
        drafts,
        sends,
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&output).context("Failed to serialize results")?
    );

    Ok(())
}
