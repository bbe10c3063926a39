//! API credentials and the places they can be loaded from.

use std::fmt;
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use super::error::LlmError;
use crate::provider::Provider;

const REDACTED: &str = "[REDACTED]";

/// A non-empty API key. Never printed, never logged.
pub struct Credential(SecretString);

impl Credential {
    pub fn new(value: impl Into<String>) -> Result<Self, LlmError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(LlmError::Configuration(
                "API key is empty. Provide a non-empty key.".to_string(),
            ));
        }
        Ok(Self(SecretString::new(value)))
    }

    pub(crate) fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    pub(crate) fn bearer(&self) -> String {
        format!("Bearer {}", self.expose())
    }

    /// Replace every occurrence of the key in `text`.
    pub(crate) fn redact(&self, text: &str) -> String {
        text.replace(self.expose(), REDACTED)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential({REDACTED})")
    }
}

impl TryFrom<Option<String>> for Credential {
    type Error = LlmError;

    fn try_from(value: Option<String>) -> Result<Self, Self::Error> {
        match value {
            Some(value) => Credential::new(value),
            None => Err(LlmError::Configuration("API key is missing.".to_string())),
        }
    }
}

/// Where to get the API key from.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiKey {
    /// `OPENAI_API_KEY`, after loading `.env` from the working directory.
    Default,
    /// A custom variable name, after loading `.env` from the working directory.
    Env(String),
    /// A variable read straight out of a dotenv file. The process environment is left alone.
    EnvFile { path: PathBuf, var: String },
    Custom(String),
}

impl ApiKey {
    pub fn resolve(self) -> Result<Credential, LlmError> {
        match self {
            ApiKey::Default => from_env(Provider::OpenAI.default_api_key_env_var()),
            ApiKey::Env(var) => from_env(&var),
            ApiKey::EnvFile { path, var } => {
                let entries = dotenv::from_path_iter(&path).map_err(|e| {
                    LlmError::Configuration(format!(
                        "Failed to open env file {}: {e}",
                        path.display()
                    ))
                })?;

                for entry in entries {
                    // The parse error echoes the offending line, which may hold the key.
                    let (key, value) = entry.map_err(|_| {
                        LlmError::Configuration(format!(
                            "Failed to parse env file {}",
                            path.display()
                        ))
                    })?;
                    if key == var {
                        debug!(var = %var, path = %path.display(), "Loaded API key from env file");
                        return Credential::new(value);
                    }
                }

                Err(LlmError::Configuration(format!(
                    "{var} not found in {}. Run the setup helper first.",
                    path.display()
                )))
            }
            ApiKey::Custom(value) => Credential::new(value),
        }
    }
}

fn from_env(var: &str) -> Result<Credential, LlmError> {
    // dotenv::var loads .env once, without overriding variables that are already set.
    let value = dotenv::var(var).map_err(|_| {
        LlmError::Configuration(format!(
            "{var} not set. Export it or add it to a .env file."
        ))
    })?;
    debug!(var = %var, "Loaded API key from environment");
    Credential::new(value)
}

impl From<String> for ApiKey {
    fn from(value: String) -> Self {
        ApiKey::Custom(value)
    }
}

impl From<&str> for ApiKey {
    fn from(value: &str) -> Self {
        ApiKey::Custom(value.to_string())
    }
}
