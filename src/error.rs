use thiserror::Error;

#[derive(Debug, Error)]
pub enum ComposerError {
    #[error("Image generation blocked. Reason: {0}")]
    ContentBlocked(String),
    #[error("AI failed to generate an image. The response was empty.")]
    EmptyResponse,
    #[error("Failed to reach the image service: {0}")]
    TransportError(String),
    #[error("The image service returned an unreadable image: {0}")]
    MalformedResponse(String),
    #[error("Could not delete the image. Please try again. ({0})")]
    DeletionError(String),
    #[error("An error occurred while trying to share. ({0})")]
    ShareError(String),
    #[error("No finished creation (current state: {0})")]
    NotReady(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Image error: {0}")]
    ImageError(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ComposerError>;
