pub mod composer;
pub mod config;
pub mod download;
pub mod error;
pub mod gemini;
pub mod logger;
pub mod models;
pub mod progress;
pub mod share;
pub mod studio;

pub use composer::{ComposedRequest, PromptComposer};
pub use config::ComposerConfig;
pub use error::{ComposerError, Result};
pub use gemini::{GenerationClient, GenerationRequest, GenerationTransport, HttpTransport};
pub use models::*;
pub use share::{SharePlatform, ShareOutcome, TerminalShare};
pub use studio::{Action, CreationState, Studio, StudioState};
