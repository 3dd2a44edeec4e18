//! Error types for the design studio

use studio_inference::{BackendError, ImageError};
use thiserror::Error;

/// Result type alias using StudioError
pub type Result<T> = std::result::Result<T, StudioError>;

/// Errors that can occur in the studio
#[derive(Debug, Error)]
pub enum StudioError {
    /// Empty or whitespace-only prompt
    #[error("Validation error: {0}")]
    Validation(String),

    /// The generation call could not be completed
    #[error("Service error: {0}")]
    Service(String),

    /// The service answered without an image
    #[error("No image returned: {0}")]
    NoImageReturned(String),

    /// Brand identifier outside the known set
    #[error("Unknown brand: {0}")]
    UnknownBrand(String),

    /// Category identifier outside the known set
    #[error("Unknown design category: {0}")]
    UnknownCategory(String),

    /// Stored image data could not be decoded
    #[error("Image error: {0}")]
    Image(#[from] ImageError),
}

impl StudioError {
    /// Create a validation error with a message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl From<BackendError> for StudioError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::NoImageReturned(reason) => Self::NoImageReturned(reason),
            other => Self::Service(other.to_string()),
        }
    }
}
