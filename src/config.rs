use std::env;

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_SHARE_BASE_URL: &str = "https://example.com/view";

#[derive(Debug, Clone)]
pub struct ComposerConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    /// Creations are not persisted server side, so share links are built on this stub base.
    pub share_base_url: String,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        ComposerConfig {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            share_base_url: DEFAULT_SHARE_BASE_URL.to_string(),
        }
    }
}

impl ComposerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_key = env::var("GEMINI_API_KEY")
            .ok()
            .or_else(|| env::var("API_KEY").ok())
            .filter(|key| !key.trim().is_empty());
        let model = env::var("COMPOSER_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url =
            env::var("COMPOSER_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let share_base_url = env::var("COMPOSER_SHARE_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_SHARE_BASE_URL.to_string());

        ComposerConfig {
            api_key,
            model,
            base_url,
            share_base_url,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_share_base_url(mut self, share_base_url: impl Into<String>) -> Self {
        self.share_base_url = share_base_url.into();
        self
    }

    pub fn share_url_for(&self, creation_id: &str) -> String {
        format!(
            "{}/{}",
            self.share_base_url.trim_end_matches('/'),
            creation_id
        )
    }
}
