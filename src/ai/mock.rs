use super::{GeneratedImage, ImageGenerationService};
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

enum CannedOutcome {
    Image(GeneratedImage),
    Failure(String),
}

/// In-memory stand-in for the provider, for tests and local runs.
pub struct MockImageClient {
    outcomes: Arc<Mutex<Vec<CannedOutcome>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockImageClient {
    pub fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_image_response(self, bytes: Vec<u8>) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push(CannedOutcome::Image(GeneratedImage {
                bytes,
                mime_type: "image/jpeg".to_string(),
            }));
        self
    }

    pub fn with_error_response(self, message: impl Into<String>) -> Self {
        self.outcomes
            .lock()
            .unwrap()
            .push(CannedOutcome::Failure(message.into()));
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockImageClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerationService for MockImageClient {
    async fn generate_image(&self, _prompt: &str) -> Result<GeneratedImage> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        let outcomes = self.outcomes.lock().unwrap();
        if outcomes.is_empty() {
            // Default: a tiny JPEG header, enough for MIME sniffing.
            return Ok(GeneratedImage {
                bytes: vec![
                    0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0x00, 0x01, 0xFF,
                    0xD9,
                ],
                mime_type: "image/jpeg".to_string(),
            });
        }

        let index = (*count - 1) % outcomes.len();
        match &outcomes[index] {
            CannedOutcome::Image(image) => Ok(image.clone()),
            CannedOutcome::Failure(message) => Err(Error::AiProvider(message.clone())),
        }
    }
}
