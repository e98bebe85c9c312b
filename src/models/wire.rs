//! `generateContent` request and response payloads.

use super::image::EncodedImage;
use crate::error::{ComposerError, Result};
use serde::{Deserialize, Serialize};

/// A request part: text or inline image. Serialized as `{"text": ..}` or `{"inlineData": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Part {
    Text(String),
    InlineData(InlineData),
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text(text.into())
    }

    pub fn image(image: &EncodedImage) -> Self {
        Part::InlineData(InlineData::from_image(image))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text(text) => Some(text),
            Part::InlineData(_) => None,
        }
    }

    pub fn as_inline_data(&self) -> Option<&InlineData> {
        match self {
            Part::InlineData(data) => Some(data),
            Part::Text(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    /// Base64 payload.
    pub data: String,
}

impl InlineData {
    pub fn from_image(image: &EncodedImage) -> Self {
        Self {
            mime_type: image.media_type.clone(),
            data: image.to_base64(),
        }
    }

    pub fn decode(&self) -> Result<EncodedImage> {
        if !self.mime_type.starts_with("image/") {
            return Err(ComposerError::MalformedResponse(format!(
                "unexpected media type {}",
                self.mime_type
            )));
        }
        EncodedImage::from_base64(self.mime_type.clone(), &self.data)
            .map_err(|e| ComposerError::MalformedResponse(e.to_string()))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_modalities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_config: Option<ImageConfig>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageConfig {
    pub aspect_ratio: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

impl Candidate {
    pub fn parts(&self) -> &[ResponsePart] {
        self.content
            .as_ref()
            .map(|content| content.parts.as_slice())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
    #[serde(default)]
    pub block_reason_message: Option<String>,
}

/// A response part. Shapes other than text and inline data decode to `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawResponsePart")]
pub enum ResponsePart {
    Text(String),
    InlineData(InlineData),
    Other,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawResponsePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    inline_data: Option<InlineData>,
}

impl From<RawResponsePart> for ResponsePart {
    fn from(raw: RawResponsePart) -> Self {
        match (raw.inline_data, raw.text) {
            (Some(data), _) => ResponsePart::InlineData(data),
            (None, Some(text)) => ResponsePart::Text(text),
            (None, None) => ResponsePart::Other,
        }
    }
}
