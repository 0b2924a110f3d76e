//! Text generators for outreach drafting.

mod openai;

pub use openai::OpenAiGenerator;
