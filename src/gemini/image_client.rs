use super::{GenerationTransport, HttpTransport};
use crate::{
    composer::{ComposedRequest, PromptComposer},
    config::ComposerConfig,
    error::{ComposerError, Result},
    models::{
        AspectRatio, Content, Creation, GenerateContentRequest, GenerateContentResponse,
        GenerationConfig, ImageConfig, ImageSlots, InlineData, ResponsePart, Style,
    },
};
use chrono::Utc;
use std::sync::Arc;

/// Finish reasons that mean the service withheld the output.
const BLOCKING_FINISH_REASONS: &[&str] = &[
    "SAFETY",
    "IMAGE_SAFETY",
    "PROHIBITED_CONTENT",
    "BLOCKLIST",
    "SPII",
];

/// Everything one generation call needs: the composed parts plus the
/// settings recorded on the resulting creation.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub composed: ComposedRequest,
    pub prompt: String,
    pub style: Style,
    pub aspect_ratio: AspectRatio,
}

impl GenerationRequest {
    pub fn compose(
        prompt: &str,
        style: Style,
        aspect_ratio: AspectRatio,
        slots: &ImageSlots,
    ) -> Self {
        Self {
            composed: PromptComposer::compose(prompt, style, aspect_ratio, slots),
            prompt: prompt.to_string(),
            style,
            aspect_ratio,
        }
    }

    fn to_wire(&self) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                parts: self.composed.parts.clone(),
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE".to_string()],
                image_config: Some(ImageConfig {
                    aspect_ratio: self.aspect_ratio.as_str().to_string(),
                }),
            },
        }
    }
}

#[derive(Clone)]
pub struct GenerationClient {
    transport: Arc<dyn GenerationTransport>,
    config: ComposerConfig,
}

impl GenerationClient {
    pub fn new(config: ComposerConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(Arc::new(transport), config))
    }

    pub fn with_transport(transport: Arc<dyn GenerationTransport>, config: ComposerConfig) -> Self {
        Self { transport, config }
    }

    pub async fn generate(&self, request: GenerationRequest) -> Result<Creation> {
        log::info!(
            "Generating image with model: {} ({} part(s), style {}, ratio {})",
            self.config.model,
            request.composed.parts.len(),
            request.style,
            request.aspect_ratio
        );

        let response = self
            .transport
            .generate_content(&self.config.model, &request.to_wire())
            .await?;

        self.creation_from_response(&response, request)
    }

    pub async fn delete_creation(&self, creation_id: &str) -> Result<()> {
        self.transport
            .delete_creation(creation_id)
            .await
            .map_err(|e| match e {
                ComposerError::DeletionError(_) => e,
                other => ComposerError::DeletionError(other.to_string()),
            })
    }

    fn creation_from_response(
        &self,
        response: &GenerateContentResponse,
        request: GenerationRequest,
    ) -> Result<Creation> {
        let Some(inline) = first_inline_image(response) else {
            return Err(match block_reason(response) {
                Some(reason) => {
                    log::warn!("Image generation blocked: {}", reason);
                    ComposerError::ContentBlocked(reason)
                }
                None => ComposerError::EmptyResponse,
            });
        };

        let image = inline.decode()?;
        let now = Utc::now();
        let id = Creation::new_id(now);

        log::info!(
            "Received {} image ({} bytes) as {}",
            image.media_type,
            image.bytes.len(),
            id
        );

        Ok(Creation {
            share_url: self.config.share_url_for(&id),
            image_url: image.to_data_url(),
            id,
            prompt: request.prompt,
            style: request.style.name().to_string(),
            aspect_ratio: request.aspect_ratio,
            image,
            created_at: now,
        })
    }
}

/// First inline image of the first candidate.
fn first_inline_image(response: &GenerateContentResponse) -> Option<&InlineData> {
    response
        .candidates
        .first()?
        .parts()
        .iter()
        .find_map(|part| match part {
            ResponsePart::InlineData(data) => Some(data),
            _ => None,
        })
}

fn block_reason(response: &GenerateContentResponse) -> Option<String> {
    if let Some(feedback) = &response.prompt_feedback {
        if let Some(reason) = &feedback.block_reason {
            return Some(match &feedback.block_reason_message {
                Some(message) => format!("{} ({})", reason, message),
                None => reason.clone(),
            });
        }
    }

    response
        .candidates
        .first()
        .and_then(|candidate| candidate.finish_reason.as_deref())
        .filter(|reason| BLOCKING_FINISH_REASONS.contains(reason))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::mock::MockTransport;
    use crate::models::{EncodedImage, ImageRole};
    use serde_json::json;

    fn client(transport: Arc<MockTransport>) -> GenerationClient {
        GenerationClient::with_transport(
            transport,
            ComposerConfig::new().with_share_base_url("https://share.test/view"),
        )
    }

    fn request() -> GenerationRequest {
        GenerationRequest::compose(
            "A panda riding a bike",
            Style::Cinematic,
            AspectRatio::Landscape,
            &ImageSlots::new(),
        )
    }

    #[tokio::test]
    async fn test_success_round_trips_image() {
        let transport = Arc::new(MockTransport::new());
        transport.push_response(json!({
            "candidates": [{ "content": { "parts": [
                { "text": "done" },
                { "inlineData": { "mimeType": "image/jpeg", "data": "/9j/4AA=" } },
                { "inlineData": { "mimeType": "image/png", "data": "AQID" } }
            ]}}]
        }));

        let creation = client(transport.clone()).generate(request()).await.unwrap();

        assert_eq!(creation.image.media_type, "image/jpeg");
        assert_eq!(creation.image.bytes, vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00]);
        assert_eq!(creation.image_url, "data:image/jpeg;base64,/9j/4AA=");
        assert_eq!(
            EncodedImage::from_data_url(&creation.image_url).unwrap(),
            creation.image
        );
        assert_eq!(creation.prompt, "A panda riding a bike");
        assert_eq!(creation.style, "Cinematic");
        assert_eq!(creation.aspect_ratio, AspectRatio::Landscape);
        assert!(creation.id.starts_with("creation_"));
        assert_eq!(
            creation.share_url,
            format!("https://share.test/view/{}", creation.id)
        );
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_request_carries_parts_and_modality() {
        let transport = Arc::new(MockTransport::new());
        transport.push_response(json!({
            "candidates": [{ "content": { "parts": [
                { "inlineData": { "mimeType": "image/png", "data": "AQID" } }
            ]}}]
        }));

        let mut slots = ImageSlots::new();
        slots.set(
            ImageRole::Person,
            Some(EncodedImage::new("image/jpeg", vec![9, 9])),
        );
        let request =
            GenerationRequest::compose("portrait", Style::Realistic, AspectRatio::Portrait, &slots);
        client(transport.clone()).generate(request).await.unwrap();

        let sent = transport.last_request().unwrap();
        assert_eq!(sent["generationConfig"]["responseModalities"], json!(["IMAGE"]));
        assert_eq!(sent["generationConfig"]["imageConfig"]["aspectRatio"], "9:16");
        let parts = sent["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[2]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(transport.last_model().as_deref(), Some("gemini-2.5-flash-image"));
    }

    #[tokio::test]
    async fn test_block_reason_without_image() {
        let transport = Arc::new(MockTransport::new());
        transport.push_response(json!({ "promptFeedback": { "blockReason": "SAFETY" } }));

        let err = client(transport).generate(request()).await.unwrap_err();
        assert!(matches!(err, ComposerError::ContentBlocked(ref reason) if reason == "SAFETY"));
    }

    #[tokio::test]
    async fn test_safety_finish_reason_is_blocked() {
        let transport = Arc::new(MockTransport::new());
        transport.push_response(json!({
            "candidates": [{ "content": { "parts": [] }, "finishReason": "IMAGE_SAFETY" }]
        }));

        let err = client(transport).generate(request()).await.unwrap_err();
        assert!(matches!(err, ComposerError::ContentBlocked(ref reason) if reason == "IMAGE_SAFETY"));
    }

    #[tokio::test]
    async fn test_text_only_response_is_empty() {
        let transport = Arc::new(MockTransport::new());
        transport.push_response(json!({
            "candidates": [{ "content": { "parts": [{ "text": "I cannot draw that" }] },
                             "finishReason": "STOP" }]
        }));

        let err = client(transport).generate(request()).await.unwrap_err();
        assert!(matches!(err, ComposerError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_image_only_in_second_candidate_is_ignored() {
        let transport = Arc::new(MockTransport::new());
        transport.push_response(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "nothing" }] } },
                { "content": { "parts": [
                    { "inlineData": { "mimeType": "image/png", "data": "AQID" } }
                ]}}
            ]
        }));

        let err = client(transport).generate(request()).await.unwrap_err();
        assert!(matches!(err, ComposerError::EmptyResponse));
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let transport = Arc::new(MockTransport::new());
        transport.push_error(ComposerError::TransportError("connection reset".into()));

        let err = client(transport.clone()).generate(request()).await.unwrap_err();
        assert!(matches!(err, ComposerError::TransportError(_)));
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_delete_failure_is_deletion_error() {
        let transport = Arc::new(MockTransport::new().failing_deletes());
        let err = client(transport).delete_creation("creation_1").await.unwrap_err();
        assert!(matches!(err, ComposerError::DeletionError(_)));
    }
}
