//! Application state container and the creation lifecycle.
//!
//! `StudioState` is a plain reducer: every mutation goes through [`Action`],
//! and lifecycle actions that do not fit the current [`CreationState`] are
//! rejected. `Studio` owns the state together with a [`GenerationClient`] and
//! drives the async side (generation, deletion, share, download).
//!
//! Only one generation can be in flight: `GenerationStarted` is refused while
//! `Generating`, and the async driver takes `&mut self`.

use crate::{
    download,
    error::{ComposerError, Result},
    gemini::{GenerationClient, GenerationRequest},
    models::{AspectRatio, Creation, EncodedImage, ImageRole, ImageSlots, Style},
    progress,
    share::{self, ShareOutcome, SharePlatform},
};
use futures::StreamExt;
use std::path::{Path, PathBuf};

pub const DEFAULT_PROMPT: &str = "A panda riding a bike through a city with depth of field";

#[derive(Debug, Clone, PartialEq)]
pub enum CreationState {
    Idle,
    Generating,
    Ready(Creation),
    Failed(String),
}

impl CreationState {
    fn name(&self) -> &'static str {
        match self {
            CreationState::Idle => "Idle",
            CreationState::Generating => "Generating",
            CreationState::Ready(_) => "Ready",
            CreationState::Failed(_) => "Failed",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    SetSlot(ImageRole, Option<EncodedImage>),
    SetPrompt(String),
    SelectStyle(Style),
    SelectAspectRatio(AspectRatio),
    GenerationStarted,
    GenerationSucceeded(Creation),
    GenerationFailed(String),
    CreationDeleted,
    DeletionFailed(String),
    DismissNotice,
}

#[derive(Debug, Clone)]
pub struct StudioState {
    slots: ImageSlots,
    prompt: String,
    style: Style,
    aspect_ratio: AspectRatio,
    creation: CreationState,
    notice: Option<String>,
}

impl Default for StudioState {
    fn default() -> Self {
        Self {
            slots: ImageSlots::new(),
            prompt: DEFAULT_PROMPT.to_string(),
            style: Style::default(),
            aspect_ratio: AspectRatio::default(),
            creation: CreationState::Idle,
            notice: None,
        }
    }
}

impl StudioState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slots(&self) -> &ImageSlots {
        &self.slots
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn style(&self) -> Style {
        self.style
    }

    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio
    }

    pub fn creation_state(&self) -> &CreationState {
        &self.creation
    }

    pub fn current_creation(&self) -> Option<&Creation> {
        match &self.creation {
            CreationState::Ready(creation) => Some(creation),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.creation {
            CreationState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Non-fatal message, e.g. a failed remote deletion.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn is_generating(&self) -> bool {
        self.creation == CreationState::Generating
    }

    /// At least one slot populated or a non-blank prompt, and nothing in flight.
    pub fn can_generate(&self) -> bool {
        !self.is_generating() && (self.slots.has_any() || !self.prompt.trim().is_empty())
    }

    /// Applies `action`; returns false when it is not valid in the current state.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::SetSlot(role, image) => self.slots.set(role, image),
            Action::SetPrompt(prompt) => self.prompt = prompt,
            Action::SelectStyle(style) => self.style = style,
            Action::SelectAspectRatio(ratio) => self.aspect_ratio = ratio,
            Action::GenerationStarted => {
                if !self.can_generate() {
                    return false;
                }
                self.notice = None;
                self.transition(CreationState::Generating);
            }
            Action::GenerationSucceeded(creation) => {
                if !self.is_generating() {
                    return false;
                }
                self.transition(CreationState::Ready(creation));
            }
            Action::GenerationFailed(message) => {
                if !self.is_generating() {
                    return false;
                }
                self.transition(CreationState::Failed(message));
            }
            Action::CreationDeleted => {
                if self.current_creation().is_none() {
                    return false;
                }
                self.transition(CreationState::Idle);
            }
            Action::DeletionFailed(message) => self.notice = Some(message),
            Action::DismissNotice => self.notice = None,
        }
        true
    }

    fn transition(&mut self, next: CreationState) {
        log::debug!("Creation state: {} -> {}", self.creation.name(), next.name());
        self.creation = next;
    }
}

pub struct Studio {
    state: StudioState,
    client: GenerationClient,
}

impl Studio {
    pub fn new(client: GenerationClient) -> Self {
        Self {
            state: StudioState::new(),
            client,
        }
    }

    pub fn state(&self) -> &StudioState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> bool {
        self.state.apply(action)
    }

    pub fn set_slot(&mut self, role: ImageRole, image: Option<EncodedImage>) {
        self.dispatch(Action::SetSlot(role, image));
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.dispatch(Action::SetPrompt(prompt.into()));
    }

    pub fn select_style(&mut self, style: Style) {
        self.dispatch(Action::SelectStyle(style));
    }

    pub fn select_aspect_ratio(&mut self, ratio: AspectRatio) {
        self.dispatch(Action::SelectAspectRatio(ratio));
    }

    /// Synchronous half of `generate`: checks the guard, discards any current
    /// creation, enters `Generating` and composes the request. `None` when
    /// generation is not allowed.
    pub fn begin_generation(&mut self) -> Option<GenerationRequest> {
        if !self.dispatch(Action::GenerationStarted) {
            log::debug!("Generation not started: nothing to generate or already generating");
            return None;
        }

        Some(GenerationRequest::compose(
            &self.state.prompt,
            self.state.style,
            self.state.aspect_ratio,
            &self.state.slots,
        ))
    }

    /// Completes a generation started with `begin_generation`.
    pub fn finish_generation(&mut self, result: Result<Creation>) {
        let action = match result {
            Ok(creation) => {
                log::info!("Creation {} ready", creation.id);
                Action::GenerationSucceeded(creation)
            }
            Err(e) => {
                log::error!("Image generation failed: {}", e);
                Action::GenerationFailed(e.to_string())
            }
        };
        self.dispatch(action);
    }

    /// Runs one generation. Returns false (and sends nothing) when the guard fails.
    pub async fn generate(&mut self) -> bool {
        self.generate_with_progress(|_| {}).await
    }

    /// Like `generate`, calling `on_progress` with a rotating loading message
    /// every couple of seconds until the response arrives.
    pub async fn generate_with_progress<F>(&mut self, mut on_progress: F) -> bool
    where
        F: FnMut(&'static str),
    {
        let Some(request) = self.begin_generation() else {
            return false;
        };

        let result = {
            let messages = progress::loading_messages(progress::MESSAGE_INTERVAL);
            tokio::pin!(messages);
            let call = self.client.generate(request);
            tokio::pin!(call);

            loop {
                tokio::select! {
                    result = &mut call => break result,
                    Some(message) = messages.next() => on_progress(message),
                }
            }
        };

        self.finish_generation(result);
        true
    }

    /// Clears the current creation immediately, then asks the service to delete
    /// it. A failed remote deletion leaves a notice but is not rolled back.
    pub async fn delete(&mut self) -> bool {
        let Some(id) = self.state.current_creation().map(|c| c.id.clone()) else {
            return false;
        };
        self.dispatch(Action::CreationDeleted);

        if let Err(e) = self.client.delete_creation(&id).await {
            log::error!("Failed to delete creation {}: {}", id, e);
            self.dispatch(Action::DeletionFailed(
                "Could not delete the image. Please try again.".to_string(),
            ));
        }
        true
    }

    pub async fn share(&self, platform: &dyn SharePlatform) -> Result<ShareOutcome> {
        let creation = self.ready_creation()?;
        share::share_creation(creation, platform).await
    }

    pub async fn download(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let creation = self.ready_creation()?;
        download::save_creation(creation, dir).await
    }

    fn ready_creation(&self) -> Result<&Creation> {
        self.state
            .current_creation()
            .ok_or_else(|| ComposerError::NotReady(self.state.creation.name().to_string()))
    }
}
