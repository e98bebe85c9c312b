use super::GenerationTransport;
use crate::{
    error::{ComposerError, Result},
    models::{GenerateContentRequest, GenerateContentResponse},
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Scripted in-memory transport for tests.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<GenerateContentResponse>>>,
    requests: Mutex<Vec<(String, serde_json::Value)>>,
    deleted: Mutex<Vec<String>>,
    fail_deletes: bool,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_deletes(mut self) -> Self {
        self.fail_deletes = true;
        self
    }

    pub fn push_response(&self, body: serde_json::Value) {
        let response = serde_json::from_value(body).expect("valid response fixture");
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    pub fn push_error(&self, error: ComposerError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<serde_json::Value> {
        self.requests.lock().unwrap().last().map(|(_, body)| body.clone())
    }

    pub fn last_model(&self) -> Option<String> {
        self.requests.lock().unwrap().last().map(|(model, _)| model.clone())
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerationTransport for MockTransport {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let body = serde_json::to_value(request)
            .map_err(|e| ComposerError::SerializationError(e.to_string()))?;
        self.requests.lock().unwrap().push((model.to_string(), body));

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ComposerError::TransportError("no scripted response".into())))
    }

    async fn delete_creation(&self, creation_id: &str) -> Result<()> {
        self.deleted.lock().unwrap().push(creation_id.to_string());
        if self.fail_deletes {
            Err(ComposerError::TransportError("service unavailable".into()))
        } else {
            Ok(())
        }
    }
}
