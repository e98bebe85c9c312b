use crate::error::{ComposerError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const MEDIA_TYPE_PNG: &str = "image/png";
pub const MEDIA_TYPE_JPEG: &str = "image/jpeg";

/// Raw image bytes plus their declared media type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedImage {
    pub media_type: String,
    #[serde(with = "base64_bytes")]
    pub bytes: Vec<u8>,
}

impl EncodedImage {
    pub fn new(media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            media_type: media_type.into(),
            bytes,
        }
    }

    pub fn from_base64(media_type: impl Into<String>, data: &str) -> Result<Self> {
        let bytes = STANDARD
            .decode(data.trim())
            .map_err(|e| ComposerError::ImageError(format!("invalid base64 payload: {}", e)))?;
        Ok(Self::new(media_type, bytes))
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// `data:<media type>;base64,<payload>`
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.to_base64())
    }

    pub fn from_data_url(data_url: &str) -> Result<Self> {
        let rest = data_url
            .strip_prefix("data:")
            .ok_or_else(|| ComposerError::ImageError("not a data URL".into()))?;
        let (media_type, payload) = rest
            .split_once(";base64,")
            .ok_or_else(|| ComposerError::ImageError("data URL is not base64 encoded".into()))?;

        if !is_image_media_type(media_type) {
            return Err(ComposerError::ImageError(format!(
                "unsupported media type: {}",
                media_type
            )));
        }

        Self::from_base64(media_type, payload)
    }

    /// Reads an image file for upload into a slot. PNG and JPEG only.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;

        let media_type = sniff_media_type(&bytes)
            .or_else(|| media_type_for_extension(path))
            .ok_or_else(|| {
                ComposerError::ImageError(format!(
                    "{} is not a PNG or JPEG image",
                    path.display()
                ))
            })?;

        log::debug!(
            "Loaded {} ({}, {} bytes)",
            path.display(),
            media_type,
            bytes.len()
        );
        Ok(Self::new(media_type, bytes))
    }

    /// File extension matching the media type, used for downloads.
    pub fn extension(&self) -> &'static str {
        match self.media_type.as_str() {
            MEDIA_TYPE_JPEG | "image/jpg" => "jpg",
            "image/webp" => "webp",
            _ => "png",
        }
    }
}

fn is_image_media_type(media_type: &str) -> bool {
    media_type.strip_prefix("image/").map_or(false, |subtype| {
        !subtype.is_empty()
            && subtype
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

fn sniff_media_type(bytes: &[u8]) -> Option<&'static str> {
    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];

    if bytes.starts_with(PNG_MAGIC) {
        Some(MEDIA_TYPE_PNG)
    } else if bytes.starts_with(JPEG_MAGIC) {
        Some(MEDIA_TYPE_JPEG)
    } else {
        None
    }
}

fn media_type_for_extension(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some(MEDIA_TYPE_PNG),
        "jpg" | "jpeg" => Some(MEDIA_TYPE_JPEG),
        _ => None,
    }
}

mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}
