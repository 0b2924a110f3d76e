//! Guest-Post Opportunity Scout
//!
//! Turns a topic keyword into a ranked, deduplicated list of sites that
//! accept guest contributions, with the best contact channel for each.
//!
//! # Pipeline
//!
//! 1. Sanitize the keyword and expand it into footprint queries
//!    ("write for us", "guest post", ...).
//! 2. Run the queries against every reachable search backend.
//! 3. For each result, resolve a page excerpt through a fallback chain
//!    (scrape → raw fetch → search snippet), then extract emails, support
//!    links and a notes summary.
//! 4. Keep one record per URL (last write wins) under a global result cap.
//! 5. Optionally merge bulk page contents and draft outreach emails.
//! 6. Optionally send the drafts through an email provider, paced and
//!    with one outcome per row.
//!
//! Missing credentials and failing calls never fail a run; they just
//! contribute nothing. The only hard error is a blank keyword.
//!
//! # Usage
//!
//! ```rust,ignore
//! use backlink_scout::{OpportunityFinder, ScoutConfig};
//!
//! let config = ScoutConfig::from_env()?;
//! let finder = OpportunityFinder::from_config(&config)?;
//! let opportunities = finder.find_opportunities("ai tools", config.max_results).await?;
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Capability seams (searcher, scraper, fetcher, contents, generator)
//! - [`content`] - Payload normalization and main-text extraction
//! - [`contacts`], [`links`], [`queries`], [`notes`] - Pure heuristics
//! - [`pipeline`] - The opportunity finder
//! - [`searchers`], [`scrapers`], [`generators`] - HTTP adapters
//! - [`outreach`] - Email drafting
//! - [`dispatch`], [`senders`] - Paced bulk sending and email providers
//! - [`testing`] - Mock implementations for testing

pub mod config;
pub mod contacts;
pub mod content;
pub mod dispatch;
pub mod error;
pub mod generators;
pub mod links;
pub mod notes;
pub mod outreach;
pub mod pacer;
pub mod pipeline;
pub mod queries;
pub mod scrapers;
pub mod searchers;
pub mod security;
pub mod senders;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use config::{EmailProvider, ScoutConfig, SearchBackend};
pub use error::{Result, ScoutError, SourceError, SourceResult};
pub use pipeline::{merge_contents, OpportunityFinder, PageSources, ResearchRequest};
pub use traits::{
    BulkSender, ContentsProvider, PageFetcher, PageScraper, TextGenerator, WebSearcher,
};
pub use types::{
    ContextSource, FetchedPage, Opportunity, OutgoingEmail, PageContents, PagePayload, PageViews,
    QueryMode, ScrapedDocument, SearchHit, SendOutcome, SendStatus,
};

// Re-export the heuristics
pub use contacts::{choose_best_email, extract_emails};
pub use content::{collapse_whitespace, normalize, strip_tags, ContentExtractor};
pub use links::{classify_support_links, extract_links, SupportLinks};
pub use notes::compose_notes;
pub use queries::{generate_queries, sanitize_keyword};

// Re-export outreach
pub use outreach::{draft_emails, select_for_outreach, DraftRequest, DraftStatus, EmailDraft};

// Re-export dispatch
pub use dispatch::{outgoing_from_drafts, send_bulk, SendOptions};
