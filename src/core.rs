pub mod credential;
pub mod error;
pub mod http;
pub mod traits;
pub mod types;

pub use credential::{ApiKey, Credential};
pub use error::LlmError;
pub use http::{HttpClient, HttpClientConfig};
pub use traits::TextCompletion;
pub use types::RequestConfig;
pub(crate) use types::CompletionResponse;
