//! Content normalization and main-text extraction.
//!
//! Every step here is best-effort. Bad payloads and broken HTML degrade to
//! less text, never to an error.

mod extractor;
mod normalize;
mod quality;
#[cfg(feature = "structured-html")]
mod structured;

pub use extractor::{default_extractor, ContentExtractor, TagStripExtractor};
pub use normalize::{collapse_whitespace, normalize, strip_tags, truncate_chars};
pub use quality::quality_score;
#[cfg(feature = "structured-html")]
pub use structured::StructuredExtractor;
