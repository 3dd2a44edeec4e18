//! Brand design studio core
//!
//! Lets a user pick a brand identity and a design category, type a prompt,
//! and collect AI-generated apparel and logo designs in a session gallery.
//!
//! - [`prompt`]: deterministic (brand, category, text) → structured prompt
//! - [`controller`]: selection, in-flight gate and newest-first gallery
//! - [`view`]: view model for whatever UI renders the studio
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use brand_studio::{ChannelEventSink, StudioController, StudioView, UserIntent};
//! use studio_inference::{GeminiBackend, GenerationConfig};
//!
//! let backend = Arc::new(GeminiBackend::new(GenerationConfig::from_env()?)?);
//! let (sink, mut events) = ChannelEventSink::channel();
//! let studio = StudioController::new(backend, Arc::new(sink));
//!
//! studio.handle(UserIntent::EditPrompt("Minimalist gold monogram".into())).await;
//! studio.handle(UserIntent::Submit).await;
//! let view = StudioView::render(&studio.snapshot());
//! ```

pub mod controller;
pub mod error;
pub mod events;
pub mod prompt;
pub mod types;
pub mod view;

// Re-exports for convenience
pub use controller::{
    GenerationPhase, Rejection, StudioController, StudioState, SubmitOutcome, UserIntent,
    FAILURE_NOTICE,
};
pub use error::{Result, StudioError};
pub use events::{ChannelEventSink, EventSink, FailureKind, NullEventSink, StudioEvent, VecEventSink};
pub use prompt::{compose, presets, style_for, StyleFragments};
pub use types::{BrandIdentity, DesignCategory, GeneratedImage, GenerationRequest, ImageId};
pub use view::{open_image, StudioView};
