//! Events sent from the controller to the presentation layer
//!
//! Generation outcomes reach the user through an [`EventSink`], which hides
//! the transport (UI callback, channel, test buffer) from the controller.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::types::{BrandIdentity, DesignCategory, ImageId};

/// Trait for delivering studio events
pub trait EventSink: Send + Sync {
    /// Send an event
    ///
    /// Returns an error if the event could not be delivered (e.g., receiver gone)
    fn send(&self, event: StudioEvent) -> Result<(), EventError>;
}

/// Error when sending events fails
#[derive(Debug, Clone)]
pub struct EventError {
    pub message: String,
}

impl std::fmt::Display for EventError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Event error: {}", self.message)
    }
}

impl std::error::Error for EventError {}

impl EventError {
    pub fn receiver_gone() -> Self {
        Self {
            message: "Receiver gone".to_string(),
        }
    }
}

/// Why a generation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FailureKind {
    /// The call could not be completed
    Service,
    /// The service answered without an image
    NoImageReturned,
}

/// Events emitted around a generation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StudioEvent {
    /// A submission was accepted and the service call is in flight
    GenerationStarted {
        brand: BrandIdentity,
        category: DesignCategory,
    },

    /// A new image was added to the front of the gallery
    #[serde(rename_all = "camelCase")]
    GenerationSucceeded { image_id: ImageId },

    /// The generation failed; `notice` is meant to be shown to the user
    GenerationFailed { kind: FailureKind, notice: String },
}

/// A no-op event sink that discards all events
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn send(&self, _event: StudioEvent) -> Result<(), EventError> {
        Ok(())
    }
}

/// Event sink forwarding into an unbounded tokio channel
///
/// The presentation layer owns the receiving end and drains it on its own
/// schedule.
pub struct ChannelEventSink {
    sender: mpsc::UnboundedSender<StudioEvent>,
}

impl ChannelEventSink {
    /// Create a sink and the receiver it feeds
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<StudioEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl EventSink for ChannelEventSink {
    fn send(&self, event: StudioEvent) -> Result<(), EventError> {
        self.sender
            .send(event)
            .map_err(|_| EventError::receiver_gone())
    }
}

/// A vector-based event sink that collects events
///
/// Useful for testing to verify events were emitted correctly.
pub struct VecEventSink {
    events: parking_lot::Mutex<Vec<StudioEvent>>,
}

impl VecEventSink {
    pub fn new() -> Self {
        Self {
            events: parking_lot::Mutex::new(Vec::new()),
        }
    }

    /// Get all collected events
    pub fn events(&self) -> Vec<StudioEvent> {
        self.events.lock().clone()
    }

    /// Clear all collected events
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl Default for VecEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for VecEventSink {
    fn send(&self, event: StudioEvent) -> Result<(), EventError> {
        self.events.lock().push(event);
        Ok(())
    }
}
