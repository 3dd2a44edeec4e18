//! Gemini image backend
//!
//! Calls the `generateContent` endpoint of the Generative Language API and
//! pulls the first inline image out of the response.

use std::time::Duration;

use async_trait::async_trait;

use super::{BackendError, ImageBackend};
use crate::config::GenerationConfig;
use crate::constants::headers;
use crate::image::ImagePayload;
use crate::types::{GenerateContentRequest, GenerateContentResponse};

/// Longest slice of a text-only reply kept for diagnostics
const MAX_REPLY_EXCERPT: usize = 200;

/// Gemini backend talking to the service over HTTPS
pub struct GeminiBackend {
    /// HTTP client for API requests
    http_client: reqwest::Client,
    /// Connection settings
    config: GenerationConfig,
}

impl GeminiBackend {
    /// Create a backend from configuration
    ///
    /// Fails if the credential is blank or the HTTP client cannot be built.
    pub fn new(config: GenerationConfig) -> Result<Self, BackendError> {
        if config.api_key.trim().is_empty() {
            return Err(BackendError::Config("API key is empty".to_string()));
        }

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder.build()?;

        Ok(Self {
            http_client,
            config,
        })
    }
}

#[async_trait]
impl ImageBackend for GeminiBackend {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    async fn generate(&self, structured_prompt: &str) -> Result<ImagePayload, BackendError> {
        let url = self.config.endpoint();
        let request = GenerateContentRequest::from_text(structured_prompt);

        log::debug!(
            "Requesting image from {} ({} prompt chars)",
            self.config.model,
            structured_prompt.len()
        );

        let response = self
            .http_client
            .post(&url)
            .header(headers::API_KEY, &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(BackendError::Http)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(BackendError::Http)?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| BackendError::MalformedResponse(format!("Failed to parse response: {}", e)))?;

        extract_first_image(&parsed)
    }
}

/// Return the first inline image part of the first candidate
///
/// A part qualifies when it carries non-empty data and a declared media type.
pub fn extract_first_image(
    response: &GenerateContentResponse,
) -> Result<ImagePayload, BackendError> {
    let parts = response
        .candidates
        .first()
        .and_then(|c| c.content.as_ref())
        .map(|c| c.parts.as_slice())
        .unwrap_or_default();

    for part in parts {
        let Some(inline) = &part.inline_data else {
            continue;
        };
        if inline.data.is_empty() {
            continue;
        }
        if let Some(mime_type) = inline.mime_type.as_deref().filter(|m| !m.is_empty()) {
            return Ok(ImagePayload::new(inline.data.clone(), mime_type));
        }
    }

    Err(BackendError::NoImageReturned(describe_missing_image(response)))
}

/// Summarise why a response carried no image
fn describe_missing_image(response: &GenerateContentResponse) -> String {
    if let Some(reason) = response
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.as_deref())
    {
        return format!("prompt blocked ({})", reason);
    }

    let Some(candidate) = response.candidates.first() else {
        return "response contained no candidates".to_string();
    };

    let reply: String = candidate
        .content
        .iter()
        .flat_map(|c| c.parts.iter())
        .filter_map(|p| p.text.as_deref())
        .collect::<Vec<_>>()
        .join(" ");

    if !reply.trim().is_empty() {
        let excerpt: String = reply.trim().chars().take(MAX_REPLY_EXCERPT).collect();
        return format!("model replied with text only: {}", excerpt);
    }

    match candidate.finish_reason.as_deref() {
        Some(reason) => format!("no image parts (finish reason {})", reason),
        None => "no image parts".to_string(),
    }
}
