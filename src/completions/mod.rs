//! Text completion against an OpenAI-style `/completions` endpoint.
//!
//! One call, one request: the prompt goes out with the configured model and
//! token budget, the first choice comes back trimmed.

pub mod client;

pub use client::{CompletionClient, CompletionConfig};
