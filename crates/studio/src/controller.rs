//! Studio state controller
//!
//! Owns the current selection, the prompt text, the in-flight flag and the
//! gallery. Presentation code reads [`StudioState`] snapshots and feeds
//! [`UserIntent`]s back in; it never mutates state directly.
//!
//! At most one generation is in flight. The phase lives under a mutex that
//! is released before the service call is awaited, so selection changes stay
//! possible while a generation runs.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use studio_inference::ImageBackend;

use crate::error::StudioError;
use crate::events::{EventSink, FailureKind, StudioEvent};
use crate::prompt::compose;
use crate::types::{BrandIdentity, DesignCategory, GeneratedImage, GenerationRequest, ImageId};

/// Notice shown to the user when a generation fails
pub const FAILURE_NOTICE: &str = "Failed to generate design. Please try again.";

/// Generation slot state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GenerationPhase {
    #[default]
    Idle,
    Generating,
}

/// Everything the presentation layer needs to render
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudioState {
    pub brand: BrandIdentity,
    pub category: DesignCategory,
    pub prompt_text: String,
    pub phase: GenerationPhase,
    /// Newest first
    pub history: Vec<GeneratedImage>,
}

impl StudioState {
    pub fn is_generating(&self) -> bool {
        self.phase == GenerationPhase::Generating
    }

    /// Whether a submission would be accepted right now
    pub fn can_submit(&self) -> bool {
        !self.is_generating() && !self.prompt_text.trim().is_empty()
    }
}

/// Why a submission was refused without calling the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    EmptyPrompt,
    AlreadyGenerating,
}

/// Result of a submission
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Nothing happened; state is unchanged
    Rejected(Rejection),
    /// The image was prepended to the gallery
    Succeeded(GeneratedImage),
    /// The service call failed; the user was notified
    Failed(StudioError),
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded(_))
    }
}

/// Intents emitted by the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserIntent {
    SelectBrand(BrandIdentity),
    SelectCategory(DesignCategory),
    EditPrompt(String),
    /// Replace the prompt with a suggested preset
    ApplyPreset(String),
    Submit,
}

struct Inner {
    state: StudioState,
    /// Last issued image id (milliseconds since epoch, bumped on collision)
    last_id: u64,
}

impl Inner {
    fn next_id(&mut self, now: DateTime<Utc>) -> ImageId {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        self.last_id = millis.max(self.last_id + 1);
        ImageId(self.last_id)
    }
}

/// Returns the slot to `Idle` when the generation ends, including when the
/// submitting future is dropped mid-call.
struct InFlight<'a> {
    inner: &'a Mutex<Inner>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.inner.lock().state.phase = GenerationPhase::Idle;
    }
}

/// The single owner of studio state
pub struct StudioController {
    backend: Arc<dyn ImageBackend>,
    events: Arc<dyn EventSink>,
    inner: Mutex<Inner>,
}

impl StudioController {
    /// Create a controller with default brand and category and an empty gallery
    pub fn new(backend: Arc<dyn ImageBackend>, events: Arc<dyn EventSink>) -> Self {
        Self {
            backend,
            events,
            inner: Mutex::new(Inner {
                state: StudioState::default(),
                last_id: 0,
            }),
        }
    }

    /// Clone of the current state for rendering
    pub fn snapshot(&self) -> StudioState {
        self.inner.lock().state.clone()
    }

    pub fn phase(&self) -> GenerationPhase {
        self.inner.lock().state.phase
    }

    /// Gallery, newest first
    pub fn history(&self) -> Vec<GeneratedImage> {
        self.inner.lock().state.history.clone()
    }

    /// Look up a gallery entry
    pub fn find_image(&self, id: ImageId) -> Option<GeneratedImage> {
        self.inner
            .lock()
            .state
            .history
            .iter()
            .find(|image| image.id == id)
            .cloned()
    }

    // ─── SELECTION ──────────────────────────────────────────────────

    pub fn set_brand(&self, brand: BrandIdentity) {
        self.inner.lock().state.brand = brand;
    }

    pub fn set_category(&self, category: DesignCategory) {
        self.inner.lock().state.category = category;
    }

    pub fn set_prompt_text(&self, text: impl Into<String>) {
        self.inner.lock().state.prompt_text = text.into();
    }

    /// Replace the prompt with a preset suggestion; does not submit
    pub fn apply_preset(&self, preset: &str) {
        self.set_prompt_text(preset);
    }

    /// Dispatch a presentation intent
    ///
    /// Returns the submission outcome for `Submit`, `None` otherwise.
    pub async fn handle(&self, intent: UserIntent) -> Option<SubmitOutcome> {
        match intent {
            UserIntent::SelectBrand(brand) => self.set_brand(brand),
            UserIntent::SelectCategory(category) => self.set_category(category),
            UserIntent::EditPrompt(text) => self.set_prompt_text(text),
            UserIntent::ApplyPreset(preset) => self.apply_preset(&preset),
            UserIntent::Submit => return Some(self.submit().await),
        }
        None
    }

    // ─── GENERATION ─────────────────────────────────────────────────

    /// Submit the current prompt with the current selection
    ///
    /// Refused while another generation is in flight or when the prompt is
    /// blank. Failures are reported through the event sink before the slot
    /// returns to `Idle`; the prompt text is never cleared.
    pub async fn submit(&self) -> SubmitOutcome {
        let (request, submitted_at) = {
            let mut inner = self.inner.lock();
            if inner.state.is_generating() {
                log::debug!("Submission refused: generation already in flight");
                return SubmitOutcome::Rejected(Rejection::AlreadyGenerating);
            }
            let request = match GenerationRequest::new(
                inner.state.brand,
                inner.state.category,
                inner.state.prompt_text.clone(),
            ) {
                Ok(request) => request,
                Err(_) => return SubmitOutcome::Rejected(Rejection::EmptyPrompt),
            };
            inner.state.phase = GenerationPhase::Generating;
            (request, Utc::now())
        };
        let _in_flight = InFlight { inner: &self.inner };

        log::info!(
            "Generating {} / {} design via {}",
            request.brand,
            request.category,
            self.backend.name()
        );
        self.emit(StudioEvent::GenerationStarted {
            brand: request.brand,
            category: request.category,
        });

        let structured_prompt = compose(request.brand, request.category, &request.user_prompt);

        match self.backend.generate(&structured_prompt).await {
            Ok(payload) => {
                let image = {
                    let mut inner = self.inner.lock();
                    let id = inner.next_id(submitted_at);
                    let image = GeneratedImage::from_payload(id, submitted_at, &request, payload);
                    inner.state.history.insert(0, image.clone());
                    image
                };
                log::info!("Generated design {}", image.id);
                self.emit(StudioEvent::GenerationSucceeded { image_id: image.id });
                SubmitOutcome::Succeeded(image)
            }
            Err(err) => {
                let kind = if err.is_no_image() {
                    log::warn!("Generation returned no image: {}", err);
                    FailureKind::NoImageReturned
                } else {
                    log::error!("Generation service error: {}", err);
                    FailureKind::Service
                };
                self.emit(StudioEvent::GenerationFailed {
                    kind,
                    notice: FAILURE_NOTICE.to_string(),
                });
                SubmitOutcome::Failed(err.into())
            }
        }
    }

    fn emit(&self, event: StudioEvent) {
        if let Err(e) = self.events.send(event) {
            log::warn!("Failed to deliver studio event: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use async_trait::async_trait;
    use studio_inference::{BackendError, ImagePayload};
    use tokio::sync::Notify;

    use std::sync::Weak;

    use super::*;
    use crate::events::{EventError, VecEventSink};

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// Backend replaying scripted results and recording prompts
    struct ScriptedBackend {
        results: Mutex<VecDeque<Result<ImagePayload, BackendError>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedBackend {
        fn new(results: Vec<Result<ImagePayload, BackendError>>) -> Arc<Self> {
            Arc::new(Self {
                results: Mutex::new(results.into()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.prompts.lock().len()
        }
    }

    #[async_trait]
    impl ImageBackend for ScriptedBackend {
        fn name(&self) -> &'static str {
            "scripted"
        }

        async fn generate(&self, structured_prompt: &str) -> Result<ImagePayload, BackendError> {
            self.prompts.lock().push(structured_prompt.to_string());
            self.results
                .lock()
                .pop_front()
                .unwrap_or_else(|| Err(BackendError::Config("script exhausted".into())))
        }
    }

    /// Backend that holds every call until the gate opens
    struct GatedBackend {
        gate: Arc<Notify>,
        calls: Mutex<usize>,
    }

    #[async_trait]
    impl ImageBackend for GatedBackend {
        fn name(&self) -> &'static str {
            "gated"
        }

        async fn generate(&self, _structured_prompt: &str) -> Result<ImagePayload, BackendError> {
            *self.calls.lock() += 1;
            self.gate.notified().await;
            Ok(png())
        }
    }

    fn png() -> ImagePayload {
        ImagePayload::new("iVBORw0KGgo=", "image/png")
    }

    fn controller_with(backend: Arc<dyn ImageBackend>) -> (StudioController, Arc<VecEventSink>) {
        init_logging();
        let sink = Arc::new(VecEventSink::new());
        (StudioController::new(backend, sink.clone()), sink)
    }

    #[test]
    fn test_initial_state() {
        let (controller, _) = controller_with(ScriptedBackend::new(vec![]));
        let state = controller.snapshot();
        assert_eq!(state.brand, BrandIdentity::Mississippi);
        assert_eq!(state.category, DesignCategory::Everyday);
        assert_eq!(state.phase, GenerationPhase::Idle);
        assert!(state.prompt_text.is_empty());
        assert!(state.history.is_empty());
    }

    #[tokio::test]
    async fn test_blank_prompt_never_calls_backend() {
        let backend = ScriptedBackend::new(vec![Ok(png())]);
        let (controller, sink) = controller_with(backend.clone());

        for text in ["", "   ", "\n\t"] {
            controller.set_prompt_text(text);
            let outcome = controller.submit().await;
            assert!(matches!(outcome, SubmitOutcome::Rejected(Rejection::EmptyPrompt)));
        }

        assert_eq!(backend.calls(), 0);
        assert!(controller.history().is_empty());
        assert!(sink.events().is_empty());
        assert_eq!(controller.phase(), GenerationPhase::Idle);
    }

    #[tokio::test]
    async fn test_success_prepends_raw_prompt() {
        let backend = ScriptedBackend::new(vec![Ok(png()), Ok(ImagePayload::new("AAAA", "image/png"))]);
        let (controller, sink) = controller_with(backend.clone());

        controller.set_brand(BrandIdentity::OleBrook);
        controller.set_category(DesignCategory::Sportswear);
        controller.set_prompt_text("Football practice jersey");
        assert!(controller.submit().await.is_success());

        controller.set_category(DesignCategory::Logo);
        controller.set_prompt_text("  Retro badge emblem ");
        let outcome = controller.submit().await;

        let history = controller.history();
        assert_eq!(history.len(), 2);
        let newest = &history[0];
        match outcome {
            SubmitOutcome::Succeeded(image) => assert_eq!(&image, newest),
            other => panic!("Expected success, got {:?}", other),
        }
        assert_eq!(newest.prompt, "  Retro badge emblem ");
        assert_eq!(newest.image_data, "AAAA");
        assert_eq!(newest.brand, BrandIdentity::OleBrook);
        assert_eq!(newest.category, Some(DesignCategory::Logo));
        assert!(newest.id > history[1].id);
        assert_eq!(history[1].prompt, "Football practice jersey");

        let prompts = backend.prompts.lock().clone();
        assert!(prompts[0].contains("Ole Brook Dancewear"));
        assert!(prompts[0].contains("SPORTSWEAR"));
        assert!(prompts[0].ends_with("Football practice jersey"));
        assert_ne!(newest.prompt, prompts[1]);

        // Prompt text survives a successful submission
        assert_eq!(controller.snapshot().prompt_text, "  Retro badge emblem ");
        assert_eq!(controller.phase(), GenerationPhase::Idle);
        assert_eq!(
            sink.events().last(),
            Some(&StudioEvent::GenerationSucceeded { image_id: newest.id })
        );
    }

    #[tokio::test]
    async fn test_service_failure_notifies_and_keeps_history() {
        let backend = ScriptedBackend::new(vec![
            Ok(png()),
            Err(BackendError::Service {
                status: 503,
                body: "unavailable".into(),
            }),
        ]);
        let (controller, sink) = controller_with(backend.clone());
        controller.set_prompt_text("Soft cotton wrap top");
        assert!(controller.submit().await.is_success());
        sink.clear();

        let outcome = controller.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Failed(StudioError::Service(_))));
        assert_eq!(controller.history().len(), 1);
        assert_eq!(controller.phase(), GenerationPhase::Idle);
        assert_eq!(controller.snapshot().prompt_text, "Soft cotton wrap top");
        assert!(sink.events().contains(&StudioEvent::GenerationFailed {
            kind: FailureKind::Service,
            notice: FAILURE_NOTICE.to_string(),
        }));
    }

    /// Records the controller phase at the moment each event is delivered
    struct PhaseSink {
        controller: Mutex<Weak<StudioController>>,
        seen: Mutex<Vec<(StudioEvent, GenerationPhase)>>,
    }

    impl EventSink for PhaseSink {
        fn send(&self, event: StudioEvent) -> Result<(), EventError> {
            let phase = self
                .controller
                .lock()
                .upgrade()
                .map(|c| c.phase())
                .unwrap_or_default();
            self.seen.lock().push((event, phase));
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_failure_notice_precedes_return_to_idle() {
        init_logging();
        let backend = ScriptedBackend::new(vec![Err(BackendError::NoImageReturned(
            "prompt blocked (SAFETY)".into(),
        ))]);
        let sink = Arc::new(PhaseSink {
            controller: Mutex::new(Weak::new()),
            seen: Mutex::new(Vec::new()),
        });
        let controller = Arc::new(StudioController::new(backend, sink.clone()));
        *sink.controller.lock() = Arc::downgrade(&controller);

        controller.set_prompt_text("Elegant script watermark");
        let outcome = controller.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Failed(_)));

        let seen = sink.seen.lock().clone();
        let failed = seen
            .iter()
            .find(|(event, _)| matches!(event, StudioEvent::GenerationFailed { .. }))
            .expect("failure event delivered");
        assert_eq!(
            failed.0,
            StudioEvent::GenerationFailed {
                kind: FailureKind::NoImageReturned,
                notice: FAILURE_NOTICE.to_string(),
            }
        );
        assert_eq!(failed.1, GenerationPhase::Generating);
        assert_eq!(controller.phase(), GenerationPhase::Idle);
    }

    #[tokio::test]
    async fn test_image_time_is_taken_at_submission() {
        let gate = Arc::new(Notify::new());
        let backend = Arc::new(GatedBackend {
            gate: gate.clone(),
            calls: Mutex::new(0),
        });
        let (controller, _) = controller_with(backend);
        controller.set_prompt_text("Vintage wash fan tee");

        let before = Utc::now();
        let release = async {
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
            let released_at = Utc::now();
            gate.notify_one();
            released_at
        };
        let (outcome, released_at) = tokio::join!(controller.submit(), release);

        let image = match outcome {
            SubmitOutcome::Succeeded(image) => image,
            other => panic!("Expected success, got {:?}", other),
        };
        assert!(image.timestamp >= before);
        assert!(image.timestamp < released_at);
        assert_eq!(image.id.0, image.timestamp.timestamp_millis() as u64);
    }

    #[tokio::test]
    async fn test_no_image_failure_is_reported_distinctly() {
        let backend = ScriptedBackend::new(vec![Err(BackendError::NoImageReturned(
            "model replied with text only".into(),
        ))]);
        let (controller, sink) = controller_with(backend);
        controller.set_prompt_text("Abstract swan icon");

        let outcome = controller.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Failed(StudioError::NoImageReturned(_))));
        assert!(controller.history().is_empty());
        assert!(sink.events().contains(&StudioEvent::GenerationFailed {
            kind: FailureKind::NoImageReturned,
            notice: FAILURE_NOTICE.to_string(),
        }));
    }

    #[tokio::test]
    async fn test_second_submit_while_generating_is_refused() {
        let gate = Arc::new(Notify::new());
        let backend = Arc::new(GatedBackend {
            gate: gate.clone(),
            calls: Mutex::new(0),
        });
        let (controller, _) = controller_with(backend.clone());
        controller.set_prompt_text("Track warmup suit");

        let first = controller.submit();
        let second = async {
            while !controller.snapshot().is_generating() {
                tokio::task::yield_now().await;
            }
            // Selection changes are allowed mid-flight
            controller.set_brand(BrandIdentity::OleBrook);
            let outcome = controller.submit().await;
            gate.notify_one();
            outcome
        };
        let (first, second) = tokio::join!(first, second);

        assert!(first.is_success());
        assert!(matches!(second, SubmitOutcome::Rejected(Rejection::AlreadyGenerating)));
        assert_eq!(*backend.calls.lock(), 1);
        assert_eq!(controller.history().len(), 1);
        // The in-flight request kept the brand it was submitted with
        assert_eq!(controller.history()[0].brand, BrandIdentity::Mississippi);
        assert_eq!(controller.snapshot().brand, BrandIdentity::OleBrook);
    }

    #[tokio::test]
    async fn test_dropped_submission_returns_to_idle() {
        let gate = Arc::new(Notify::new());
        let backend = Arc::new(GatedBackend {
            gate,
            calls: Mutex::new(0),
        });
        let (controller, _) = controller_with(backend);
        controller.set_prompt_text("Cozy spirit sweatshirt");

        let result =
            tokio::time::timeout(std::time::Duration::from_millis(20), controller.submit()).await;
        assert!(result.is_err());
        assert_eq!(controller.phase(), GenerationPhase::Idle);
        assert!(controller.history().is_empty());
    }

    #[tokio::test]
    async fn test_handle_dispatches_intents() {
        let backend = ScriptedBackend::new(vec![Ok(png())]);
        let (controller, _) = controller_with(backend.clone());

        assert!(controller
            .handle(UserIntent::SelectBrand(BrandIdentity::OleBrook))
            .await
            .is_none());
        controller
            .handle(UserIntent::SelectCategory(DesignCategory::Logo))
            .await;
        controller
            .handle(UserIntent::ApplyPreset("Bold Bulldog mascot head".into()))
            .await;
        assert_eq!(backend.calls(), 0);

        let outcome = controller.handle(UserIntent::Submit).await;
        assert!(outcome.is_some_and(|o| o.is_success()));
        let image = &controller.history()[0];
        assert_eq!(image.prompt, "Bold Bulldog mascot head");
        assert_eq!(image.category, Some(DesignCategory::Logo));
        assert_eq!(controller.find_image(image.id).as_ref(), Some(image));
    }

    #[test]
    fn test_ids_strictly_increase() {
        let mut inner = Inner {
            state: StudioState::default(),
            last_id: 0,
        };
        let now = Utc::now();
        let a = inner.next_id(now);
        let b = inner.next_id(now);
        assert!(b > a);
        assert_eq!(a.0, now.timestamp_millis() as u64);
    }

    #[test]
    fn test_can_submit() {
        let mut state = StudioState {
            prompt_text: "tee".into(),
            ..Default::default()
        };
        assert!(state.can_submit());
        state.phase = GenerationPhase::Generating;
        assert!(!state.can_submit());
        state.phase = GenerationPhase::Idle;
        state.prompt_text = "  ".into();
        assert!(!state.can_submit());
    }
}
