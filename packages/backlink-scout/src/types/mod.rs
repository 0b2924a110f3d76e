//! Data types shared across the scout.

pub mod opportunity;
pub mod page;
pub mod search;
pub mod send;

pub use opportunity::{
    domain_of, ContextSource, Opportunity, MAX_EMAILS_KEPT, MAX_EXCERPT_CHARS, MAX_SNIPPET_CHARS,
};
pub use page::{FetchedPage, PageContents, PagePayload, PageViews, ScrapedDocument};
pub use search::{QueryMode, SearchHit};
pub use send::{OutgoingEmail, SendOutcome, SendStatus};
