//! Bulk page-contents provider used by the second enrichment phase.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::error::SourceResult;
use crate::types::PageContents;

/// Fetches full text, summary and highlights for many URLs in one call.
#[async_trait]
pub trait ContentsProvider: Send + Sync {
    /// Contents keyed by URL. URLs the provider could not resolve are absent.
    async fn contents(&self, urls: &[String]) -> SourceResult<HashMap<String, PageContents>>;
}
