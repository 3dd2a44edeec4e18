//! Configuration for the generation client

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{defaults, env};

/// Error types for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing service credential: set the {0} environment variable")]
    MissingCredential(&'static str),
}

/// Connection settings for the image generation service
#[derive(Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Service-access credential
    pub api_key: String,
    /// Target model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL of the service (overridable for local testing)
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Optional request timeout; `None` waits for the service indefinitely
    #[serde(default = "default_timeout")]
    pub timeout_secs: Option<u64>,
}

fn default_model() -> String {
    defaults::MODEL.to_string()
}

fn default_base_url() -> String {
    defaults::BASE_URL.to_string()
}

fn default_timeout() -> Option<u64> {
    Some(defaults::TIMEOUT_SECS)
}

impl GenerationConfig {
    /// Create a configuration with the default model and endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }

    /// Load the credential from the environment
    ///
    /// The credential is the only value read from the environment; everything
    /// else uses the built-in defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(env::API_KEY) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key)),
            _ => Err(ConfigError::MissingCredential(env::API_KEY)),
        }
    }

    /// Point the client at a different service root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the model identifier
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Full URL of the `generateContent` endpoint for the configured model
    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            defaults::API_VERSION,
            self.model
        )
    }
}

impl fmt::Debug for GenerationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
