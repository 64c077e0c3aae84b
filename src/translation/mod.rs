mod client;
mod language;
mod prompt;
mod sse_parser;

pub use client::{ModelClient, ModelClientFactory};
pub use language::{AUTO, CandidateLanguages};
pub use prompt::{build_detection_prompt, build_translation_prompt, render_translation_prompt};
