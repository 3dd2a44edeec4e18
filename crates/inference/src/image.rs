//! Image payload codec
//!
//! Generated images travel and rest as base64 text. This module converts
//! between that text, raw bytes, data URIs and downloadable blobs.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::constants::media;

/// Error types for image payload conversion
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("Invalid base64 image data: {0}")]
    Decode(#[from] base64::DecodeError),
}

/// Image bytes as returned by the generation service, base64-encoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImagePayload {
    /// Base64 text of the image
    pub data: String,
    /// Media type declared by the service (e.g. "image/png")
    pub mime_type: String,
}

impl ImagePayload {
    /// Wrap base64 text received from the service
    pub fn new(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Encode raw bytes
    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self::new(BASE64.encode(bytes), mime_type)
    }

    /// Decode back into raw bytes
    pub fn decode(&self) -> Result<Vec<u8>, ImageError> {
        decode_base64(&self.data)
    }

    /// `data:image/png;base64,...` URI for inline rendering
    pub fn data_uri(&self) -> String {
        data_uri(&self.data)
    }

    /// Decode into an `image/png` blob for opening or downloading
    pub fn to_blob(&self) -> Result<ImageBlob, ImageError> {
        blob_from_base64(&self.data)
    }
}

/// Raw image bytes tagged with a media type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlob {
    pub bytes: Vec<u8>,
    pub media_type: &'static str,
}

/// Decode base64 text into bytes
pub fn decode_base64(data: &str) -> Result<Vec<u8>, ImageError> {
    Ok(BASE64.decode(data.trim().as_bytes())?)
}

/// Build a PNG data URI around base64 text
pub fn data_uri(data: &str) -> String {
    format!("data:{};base64,{}", media::PNG, data)
}

/// Decode base64 text into a PNG blob
pub fn blob_from_base64(data: &str) -> Result<ImageBlob, ImageError> {
    Ok(ImageBlob {
        bytes: decode_base64(data)?,
        media_type: media::PNG,
    })
}
