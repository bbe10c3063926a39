use async_trait::async_trait;

use super::error::LlmError;

/// Anything that turns a prompt into normalized completion text.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}
