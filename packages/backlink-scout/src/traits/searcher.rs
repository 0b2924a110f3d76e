//! Web searcher trait for opportunity discovery.
//!
//! Abstracts over search providers (Serper keyword search, Exa neural
//! search). The pipeline drives every configured searcher through the same
//! query batch and keeps the results in one dedup map.

use async_trait::async_trait;

use crate::error::SourceResult;
use crate::types::{QueryMode, SearchHit};

/// Search backend.
///
/// # Implementations
///
/// - `SerperSearcher` - Google results via Serper
/// - `ExaSearcher` - Exa neural search
/// - `MockSearcher` - For testing
#[async_trait]
pub trait WebSearcher: Send + Sync {
    /// Backend name (for logging).
    fn name(&self) -> &str;

    /// Cheap reachability probe, run once before the query batch.
    ///
    /// Must not error: an unreachable backend is a `false`, not a failure.
    async fn reachable(&self) -> bool;

    /// Run one query, returning at most `limit` organic results.
    async fn search(&self, query: &str, limit: usize) -> SourceResult<Vec<SearchHit>>;

    /// Template family this backend's queries should be generated from.
    fn query_mode(&self) -> QueryMode {
        QueryMode::Standard
    }
}
