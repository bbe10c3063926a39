use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::{
    Provider,
    core::{
        ApiKey, CompletionResponse, Credential, HttpClient, HttpClientConfig, LlmError,
        RequestConfig, TextCompletion,
    },
    provider::constants::openai::DEFAULT_MAX_TOKENS,
};

/// Client-level defaults applied to every completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionConfig {
    pub provider: Provider,
    pub model: String,
    pub max_tokens: u32,
    /// Base URL without the endpoint, e.g. `https://api.openai.com/v1`
    pub base_url: String,
    pub http: HttpClientConfig,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self::for_provider(Provider::OpenAI)
    }
}

impl CompletionConfig {
    pub fn for_provider(provider: Provider) -> Self {
        Self {
            provider,
            model: provider.default_model().to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            base_url: provider.api_base().to_string(),
            http: HttpClientConfig::default(),
        }
    }

    fn validate(&self) -> Result<(), LlmError> {
        if self.model.trim().is_empty() {
            return Err(LlmError::Configuration(
                "Model identifier must not be empty".to_string(),
            ));
        }
        if self.max_tokens == 0 {
            return Err(LlmError::Configuration(
                "max_tokens must be greater than zero".to_string(),
            ));
        }
        if self.base_url.trim().is_empty() {
            return Err(LlmError::Configuration(
                "Base URL must not be empty".to_string(),
            ));
        }
        self.http.validate()
    }

    fn endpoint_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.provider.completions_endpoint()
        )
    }
}

/// Sends prompts to a completion endpoint and returns the trimmed first choice.
///
/// The client owns its API key and holds no mutable state, so a single
/// instance can serve concurrent calls from many tasks (wrap it in an `Arc`).
pub struct CompletionClient {
    credential: Credential,
    config: CompletionConfig,
    http: HttpClient,
}

impl CompletionClient {
    /// Create a client with the default model, token budget and timeout.
    ///
    /// Performs no network I/O. Fails with [`LlmError::Configuration`] when the
    /// key is empty or cannot be found.
    pub fn new(api_key: impl Into<ApiKey>) -> Result<Self, LlmError> {
        Self::with_config(api_key, CompletionConfig::default())
    }

    pub fn with_config(
        api_key: impl Into<ApiKey>,
        config: CompletionConfig,
    ) -> Result<Self, LlmError> {
        let credential = api_key.into().resolve()?;
        Self::from_credential(credential, config)
    }

    pub fn from_credential(
        credential: Credential,
        config: CompletionConfig,
    ) -> Result<Self, LlmError> {
        config.validate()?;
        let http = HttpClient::new(config.http.clone(), None)?;

        Ok(Self {
            credential,
            config,
            http,
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Result<Self, LlmError> {
        self.config.model = model.into();
        self.config.validate()?;
        Ok(self)
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Result<Self, LlmError> {
        self.config.max_tokens = max_tokens;
        self.config.validate()?;
        Ok(self)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, LlmError> {
        self.config.base_url = base_url.into();
        self.config.validate()?;
        Ok(self)
    }

    /// Default per-call deadline. Shorthand for adjusting `http.timeout`.
    pub fn with_timeout(self, timeout: Duration) -> Result<Self, LlmError> {
        let http = HttpClientConfig {
            timeout,
            ..self.config.http.clone()
        };
        self.with_http_config(http)
    }

    pub fn with_http_config(mut self, http: HttpClientConfig) -> Result<Self, LlmError> {
        self.http = HttpClient::new(http.clone(), None)?;
        self.config.http = http;
        Ok(self)
    }

    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    /// Complete `prompt` within the configured default timeout.
    pub async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.complete_with_timeout(prompt, self.http.config().timeout)
            .await
    }

    /// Complete `prompt`, giving up after `timeout`.
    ///
    /// The prompt is forwarded unchanged, empty or not. Zero choices, a missing
    /// `choices` list or a choice without `text` are [`LlmError::MalformedResponse`].
    #[tracing::instrument(
        name = "complete",
        skip(self, prompt),
        fields(
            model = %self.config.model,
            max_tokens = self.config.max_tokens,
            prompt_len = prompt.len()
        ),
        err
    )]
    pub async fn complete_with_timeout(
        &self,
        prompt: &str,
        timeout: Duration,
    ) -> Result<String, LlmError> {
        let request = RequestConfig {
            model: &self.config.model,
            prompt,
            max_tokens: self.config.max_tokens,
        };

        let response: CompletionResponse = self
            .http
            .post_json(
                &self.config.endpoint_url(),
                &self.credential,
                &request,
                timeout,
            )
            .await?;

        let text = response.into_text()?;
        tracing::debug!(len = text.len(), "Completion received");
        Ok(text)
    }
}

impl fmt::Debug for CompletionClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionClient")
            .field("credential", &self.credential)
            .field("config", &self.config)
            .finish()
    }
}

#[async_trait]
impl TextCompletion for CompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        CompletionClient::complete(self, prompt).await
    }
}
