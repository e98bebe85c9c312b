use super::{image::EncodedImage, style::AspectRatio};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The result of one successful generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creation {
    pub id: String,
    pub prompt: String,
    pub style: String,
    pub aspect_ratio: AspectRatio,
    pub image: EncodedImage,
    /// Embeddable `data:` URL of `image`.
    pub image_url: String,
    pub share_url: String,
    pub created_at: DateTime<Utc>,
}

impl Creation {
    /// Time-based id with a random suffix, e.g. `creation_1760659200000_3f2a9c1e`.
    pub fn new_id(now: DateTime<Utc>) -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        format!("creation_{}_{}", now.timestamp_millis(), &suffix[..8])
    }
}

/// Payload handed to a platform share sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareData {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl ShareData {
    pub fn for_creation(creation: &Creation) -> Self {
        Self {
            title: "AI Image Composition".to_string(),
            text: "Check out this image I created with the AI Image Composer!".to_string(),
            url: creation.share_url.clone(),
        }
    }
}
