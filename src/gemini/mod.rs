pub mod http;
pub mod image_client;
#[cfg(test)]
pub(crate) mod mock;

use crate::{
    error::Result,
    models::{GenerateContentRequest, GenerateContentResponse},
};
use async_trait::async_trait;

pub use http::HttpTransport;
pub use image_client::{GenerationClient, GenerationRequest};

/// Network seam for the generative image service.
#[async_trait]
pub trait GenerationTransport: Send + Sync {
    /// Exactly one request, no retry.
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;

    /// Must succeed for unknown ids.
    async fn delete_creation(&self, creation_id: &str) -> Result<()>;
}
