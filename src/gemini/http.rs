use super::GenerationTransport;
use crate::{
    config::ComposerConfig,
    error::{ComposerError, Result},
    models::{GenerateContentRequest, GenerateContentResponse},
};
use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Client,
};

const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct HttpTransport {
    client: Client,
    base_url: String,
    api_key: String,
}

impl HttpTransport {
    pub fn new(config: &ComposerConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| ComposerError::ConfigError("GEMINI_API_KEY is required".into()))?;

        Ok(Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(&self.api_key)
            .map_err(|e| ComposerError::ConfigError(format!("invalid API key: {}", e)))?;
        headers.insert(API_KEY_HEADER, key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }
}

#[async_trait]
impl GenerationTransport for HttpTransport {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let response = self
            .client
            .post(self.endpoint(model))
            .headers(self.build_headers()?)
            .json(request)
            .send()
            .await
            .map_err(|e| ComposerError::TransportError(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::error!("Image service returned {}: {}", status, error_text);
            return Err(ComposerError::TransportError(format!(
                "{}: {}",
                status, error_text
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ComposerError::TransportError(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| ComposerError::SerializationError(e.to_string()))
    }

    async fn delete_creation(&self, creation_id: &str) -> Result<()> {
        // Creations only live in client state; there is nothing to remove remotely.
        log::info!("Creation {} removed from client state", creation_id);
        Ok(())
    }
}
