//! Text generation capability used to draft outreach emails.

use async_trait::async_trait;

use crate::error::SourceResult;

/// Opaque prompt-in, text-out language model.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for the prompt.
    async fn generate(&self, prompt: &str) -> SourceResult<String>;

    /// Model identifier reported on drafts.
    fn model(&self) -> &str {
        ""
    }
}
