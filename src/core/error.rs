use thiserror::Error;

pub(crate) type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Everything that can go wrong between building a client and reading a completion back.
#[derive(Error, Debug)]
pub enum LlmError {
    /// The client could not be configured: missing or empty API key, invalid defaults.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The request never produced a usable HTTP response: connection failure,
    /// timeout, or a non-success status from the provider.
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        status_code: Option<u16>,
        #[source]
        source: Option<BoxError>,
    },

    /// The provider answered, but not with the shape we expect.
    #[error("Malformed response: {message}")]
    MalformedResponse {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl LlmError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        LlmError::MalformedResponse {
            message: message.into(),
            source: None,
        }
    }

    /// HTTP status returned by the provider, if the failure carried one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            LlmError::Transport { status_code, .. } => *status_code,
            _ => None,
        }
    }

    /// Whether an opt-in retry policy may try the request again.
    ///
    /// Only transport failures qualify: connection errors, timeouts, 429 and 5xx.
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::Transport {
                status_code: Some(code),
                ..
            } => *code == 429 || (500..600).contains(code),
            LlmError::Transport {
                status_code: None, ..
            } => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(status_code: Option<u16>) -> LlmError {
        LlmError::Transport {
            message: "boom".to_string(),
            status_code,
            source: None,
        }
    }

    #[test]
    fn only_transient_transport_failures_are_retryable() {
        assert!(transport(None).is_retryable());
        assert!(transport(Some(429)).is_retryable());
        assert!(transport(Some(503)).is_retryable());
        assert!(!transport(Some(401)).is_retryable());
        assert!(!transport(Some(400)).is_retryable());
        assert!(!LlmError::Configuration("x".into()).is_retryable());
        assert!(!LlmError::malformed("no choices").is_retryable());
    }

    #[test]
    fn display_names_the_category() {
        assert_eq!(
            LlmError::Configuration("API key is empty".into()).to_string(),
            "Configuration error: API key is empty"
        );
        assert_eq!(
            LlmError::malformed("no choices").to_string(),
            "Malformed response: no choices"
        );
        assert_eq!(transport(Some(500)).status_code(), Some(500));
    }
}
