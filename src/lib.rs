//! # chatgpt-agent
//!
//! A small, honest client for text completion APIs. One prompt in, one
//! request out, the first choice back with its whitespace trimmed.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatgpt_agent::{ApiKey, CompletionClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CompletionClient::new(ApiKey::Default)?.with_max_tokens(64)?;
//!     let text = client.complete("Say hello to Rust.").await?;
//!     println!("{text}");
//!     Ok(())
//! }
//! ```
//!
//! ## Errors
//!
//! Every failure is an [`LlmError`]:
//! - `Configuration`: empty or missing API key, invalid defaults. Raised when the client is built.
//! - `Transport`: connection failures, timeouts and non-success HTTP statuses.
//! - `MalformedResponse`: the provider answered without a usable first choice.
//!
//! The API key never appears in `Debug` output, logs or error messages.

pub mod completions;
pub mod core;
pub mod logging;
pub mod provider;
pub mod setup;

pub use crate::completions::{CompletionClient, CompletionConfig};
pub use crate::core::{
    ApiKey, Credential, HttpClientConfig, LlmError, RequestConfig, TextCompletion,
};
pub use crate::provider::Provider;
