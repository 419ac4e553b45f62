// Verdict Service: score and markdown verdict for one (job description, resume) pair.
// Provider calls go through llm_client::CompletionProvider.

pub mod handlers;
pub mod prompts;
pub mod service;

pub use service::{VerdictRequest, VerdictResponse, VerdictService};
