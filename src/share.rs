use crate::{
    error::{ComposerError, Result},
    models::{Creation, ShareData},
};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::io::Write;

pub const COPIED_MESSAGE: &str = "Share URL copied to clipboard!";
pub const SHARE_FAILED_MESSAGE: &str = "An error occurred while trying to share.";

/// Platform share capabilities. Both paths are best effort.
#[async_trait]
pub trait SharePlatform: Send + Sync {
    fn supports_native_share(&self) -> bool;

    async fn share(&self, data: &ShareData) -> Result<()>;

    async fn copy_to_clipboard(&self, text: &str) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    CopiedToClipboard,
}

impl ShareOutcome {
    /// Alert text for the user, if any.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            ShareOutcome::Shared => None,
            ShareOutcome::CopiedToClipboard => Some(COPIED_MESSAGE),
        }
    }
}

/// Native share when available, otherwise copy the share URL.
/// Failures come back as `ShareError`; they never touch lifecycle state.
pub async fn share_creation(
    creation: &Creation,
    platform: &dyn SharePlatform,
) -> Result<ShareOutcome> {
    let data = ShareData::for_creation(creation);

    let result = if platform.supports_native_share() {
        platform.share(&data).await.map(|_| ShareOutcome::Shared)
    } else {
        platform
            .copy_to_clipboard(&data.url)
            .await
            .map(|_| ShareOutcome::CopiedToClipboard)
    };

    result.map_err(|e| {
        log::error!("Error sharing {}: {}", creation.id, e);
        match e {
            ComposerError::ShareError(_) => e,
            other => ComposerError::ShareError(other.to_string()),
        }
    })
}

/// Terminal clipboard via the OSC 52 escape sequence. No native share sheet.
pub struct TerminalShare;

#[async_trait]
impl SharePlatform for TerminalShare {
    fn supports_native_share(&self) -> bool {
        false
    }

    async fn share(&self, _data: &ShareData) -> Result<()> {
        Err(ComposerError::ShareError(
            "native sharing is not available in a terminal".into(),
        ))
    }

    async fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        write!(stdout, "\x1b]52;c;{}\x07", STANDARD.encode(text))?;
        stdout.flush()?;
        Ok(())
    }
}
