//! Image generation client for the design studio
//!
//! This library wraps the external generative-image service behind a single
//! trait so the studio never deals with HTTP directly:
//! - **Gemini**: `generateContent` over HTTPS (default)
//! - any in-memory [`ImageBackend`] implementation for tests
//!
//! # Example
//!
//! ```rust,ignore
//! use studio_inference::{GeminiBackend, GenerationConfig, ImageBackend};
//!
//! let config = GenerationConfig::from_env()?;
//! let backend = GeminiBackend::new(config)?;
//! let image = backend.generate("Task: Create a photorealistic design ...").await?;
//! println!("{}", image.data_uri());
//! ```

pub mod backend;
pub mod config;
pub mod constants;
pub mod image;
pub mod types;

// Re-exports for convenience
pub use backend::{BackendError, GeminiBackend, ImageBackend};
pub use config::{ConfigError, GenerationConfig};
pub use image::{ImageBlob, ImageError, ImagePayload};
