//! Capability seams.
//!
//! Every external service the pipeline talks to sits behind one of these
//! traits so the heuristics can be exercised against mocks.

pub mod contents;
pub mod generator;
pub mod scraper;
pub mod searcher;
pub mod sender;

pub use contents::ContentsProvider;
pub use generator::TextGenerator;
pub use scraper::{PageFetcher, PageScraper};
pub use searcher::WebSearcher;
pub use sender::BulkSender;
