//! Pluggable image generation backend abstraction
//!
//! The studio talks to the generation service only through [`ImageBackend`],
//! so the HTTP implementation can be swapped for an in-memory one in tests.

pub mod gemini;

use async_trait::async_trait;

use crate::image::ImagePayload;

pub use gemini::GeminiBackend;

/// Error types for backend operations
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The service answered but supplied no inline image part
    #[error("No image data found in response: {0}")]
    NoImageReturned(String),

    /// The service rejected the call (auth, quota, bad request, outage)
    #[error("Service error {status}: {body}")]
    Service { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl BackendError {
    /// Whether the service responded without image content
    pub fn is_no_image(&self) -> bool {
        matches!(self, Self::NoImageReturned(_))
    }
}

/// The core trait that all image generation backends implement.
///
/// Each call performs exactly one outbound request; implementations must not
/// retry or cache.
#[async_trait]
pub trait ImageBackend: Send + Sync {
    /// Human-readable name for logs
    fn name(&self) -> &'static str;

    /// Generate one image from a fully composed prompt
    async fn generate(&self, structured_prompt: &str) -> Result<ImagePayload, BackendError>;
}
