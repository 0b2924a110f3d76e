//! Search backends.

mod exa;
mod retry;
mod serper;

pub use exa::{ExaClient, ExaContents, ExaSearcher, EXA_MAX_RESULTS};
pub use retry::RetryPolicy;
pub use serper::SerperSearcher;
