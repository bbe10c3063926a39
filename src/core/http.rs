//! Shared HTTP client used by the completion client.

use std::time::Duration;

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use super::credential::Credential;
use super::error::LlmError;

/// Configuration for HTTP client resilience
#[derive(Debug, Clone, PartialEq)]
pub struct HttpClientConfig {
    /// Deadline for a single attempt
    pub timeout: Duration,
    /// Extra attempts after the first one. Zero means exactly one request per call.
    pub max_retries: u32,
    /// Base duration for exponential backoff
    pub initial_retry_delay: Duration,
    /// Cap on the backoff duration
    pub max_retry_delay: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 0,
            initial_retry_delay: Duration::from_millis(500),
            max_retry_delay: Duration::from_secs(10),
        }
    }
}

impl HttpClientConfig {
    pub(crate) fn validate(&self) -> Result<(), LlmError> {
        if self.timeout.is_zero() {
            return Err(LlmError::Configuration(
                "HTTP timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

pub struct HttpClient {
    client: reqwest::Client,
    config: HttpClientConfig,
}

impl HttpClient {
    pub fn new(config: HttpClientConfig, user_agent: Option<&str>) -> Result<Self, LlmError> {
        config.validate()?;

        let default_ua = format!("chatgpt-agent/{}", env!("CARGO_PKG_VERSION"));
        let ua = user_agent.unwrap_or(&default_ua);

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(ua)
            .build()
            .map_err(|e| {
                LlmError::Configuration(format!("Failed to build reqwest client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// POST `body` as JSON with bearer auth and decode the JSON reply.
    ///
    /// Each attempt is bounded by `timeout`. With the default config there is
    /// exactly one attempt; otherwise 429, 5xx and connection failures are
    /// retried up to `max_retries` times with exponential backoff.
    #[tracing::instrument(
        name = "http_post_json",
        skip(self, credential, body),
        fields(url = %url),
        err
    )]
    pub async fn post_json<Req, Res>(
        &self,
        url: &str,
        credential: &Credential,
        body: &Req,
        timeout: Duration,
    ) -> Result<Res, LlmError>
    where
        Req: Serialize,
        Res: DeserializeOwned,
    {
        if timeout.is_zero() {
            return Err(LlmError::Configuration(
                "Request timeout must be greater than zero".to_string(),
            ));
        }

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..=self.config.max_retries {
            match self.send_once(url, credential, body, timeout).await {
                Ok(text) => {
                    // serde_json errors quote body values, so only their position is kept.
                    return serde_json::from_str(&text).map_err(|e| {
                        LlmError::malformed(format!(
                            "Failed to parse API response ({:?} error at line {}, column {})",
                            e.classify(),
                            e.line(),
                            e.column()
                        ))
                    });
                }
                Err(err) if err.is_retryable() && attempt < self.config.max_retries => {
                    warn!(attempt, error = %err, "Request failed, retrying");
                    last_error = Some(err);
                    tokio::time::sleep(self.backoff(attempt)).await;
                }
                Err(err) => return Err(err),
            }
        }

        Err(last_error.unwrap_or_else(|| LlmError::Transport {
            message: format!(
                "Request failed after max retries ({}) with unknown error",
                self.config.max_retries
            ),
            status_code: None,
            source: None,
        }))
    }

    /// One round trip. Returns the body of a successful response.
    async fn send_once<Req: Serialize>(
        &self,
        url: &str,
        credential: &Credential,
        body: &Req,
        timeout: Duration,
    ) -> Result<String, LlmError> {
        let res = self
            .client
            .post(url)
            .header(reqwest::header::AUTHORIZATION, credential.bearer())
            .timeout(timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                let message = if e.is_timeout() {
                    format!("Request timed out after {timeout:?}")
                } else {
                    "Failed to complete request".to_string()
                };
                LlmError::Transport {
                    message,
                    status_code: None,
                    source: Some(Box::new(e.without_url())),
                }
            })?;

        let status = res.status();
        if !status.is_success() {
            let error_text = res
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(status = %status, "API returned error status");

            return Err(LlmError::Transport {
                message: format!("API returned {status}: {}", credential.redact(&error_text)),
                status_code: Some(status.as_u16()),
                source: None,
            });
        }

        debug!(status = %status, "HTTP request successful");

        res.text().await.map_err(|e| LlmError::Transport {
            message: if e.is_timeout() {
                format!("Timed out reading response body after {timeout:?}")
            } else {
                "Failed to read response body".to_string()
            },
            status_code: Some(status.as_u16()),
            source: Some(Box::new(e.without_url())),
        })
    }

    fn backoff(&self, attempt: u32) -> Duration {
        let base_delay =
            self.config.initial_retry_delay.as_millis() as f64 * 2_f64.powi(attempt as i32);

        // +/- 10% jitter (0.9 to 1.1)
        let jitter_factor = rand::random::<f64>() * 0.2 + 0.9;
        let delay_ms = (base_delay * jitter_factor) as u64;

        Duration::from_millis(delay_ms).min(self.config.max_retry_delay)
    }
}
