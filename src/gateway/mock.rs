use super::GenerateService;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// In-memory stand-in for the proxy endpoint, for session tests.
pub struct MockGenerateClient {
    outcomes: Arc<Mutex<Vec<std::result::Result<String, String>>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockGenerateClient {
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_image_response(self, image_data: impl Into<String>) -> Self {
        self.outcomes.lock().unwrap().push(Ok(image_data.into()));
        self
    }

    pub fn with_error_response(self, message: impl Into<String>) -> Self {
        self.outcomes.lock().unwrap().push(Err(message.into()));
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockGenerateClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenerateService for MockGenerateClient {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        let outcomes = self.outcomes.lock().unwrap();
        if outcomes.is_empty() {
            // Default: a recognizable base64 payload.
            return Ok("bW9jay1pbWFnZW4=".to_string());
        }

        let index = (*count - 1) % outcomes.len();
        match &outcomes[index] {
            Ok(image_data) => Ok(image_data.clone()),
            Err(message) => Err(Error::Gateway(message.clone())),
        }
    }
}
