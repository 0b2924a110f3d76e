//! Opportunity aggregation.
//!
//! ```text
//! keyword ─► queries ─► searchers ─► hits ─► enrich (scrape → fetch → snippet)
//!                                             │
//!                         url-keyed dedup map ◄┘ ─► contents merge ─► results
//! ```

mod aggregator;
mod contents;
mod enrich;

pub use aggregator::{OpportunityFinder, ResearchRequest};
pub use contents::merge_contents;
pub use enrich::{PageSources, ResolvedPage};
