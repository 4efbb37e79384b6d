use super::{GeneratedImage, ImageGenerationService};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Surfaced when the provider answers without a single image.
pub const NO_IMAGE_MESSAGE: &str = "La API no generó ninguna imagen.";

#[derive(Debug, Serialize)]
struct PredictRequest {
    instances: Vec<Instance>,
    parameters: PredictParameters,
}

#[derive(Debug, Serialize)]
struct Instance {
    prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictParameters {
    sample_count: u32,
    aspect_ratio: String,
    output_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: String,
    mime_type: Option<String>,
}

/// Client for Imagen's `predict` endpoint.
pub struct ImagenClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl ImagenClient {
    /// Construct a client for `model`.
    ///
    /// `model` should be the bare model ID (for example
    /// `imagen-4.0-generate-001`), not a `models/...`-prefixed path segment.
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: Client) -> Self {
        let model = model.strip_prefix("models/").unwrap_or(&model).to_string();

        Self {
            client,
            api_key,
            model,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(120),
        }
    }

    /// Point the client at a different API host, e.g. a mock server.
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    async fn predict(&self, request: &PredictRequest) -> Result<PredictResponse> {
        let url = format!("{}/v1beta/models/{}:predict", self.base_url, self.model);

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to Imagen: {}", e);
                e
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            tracing::error!("Imagen API error (status {}): {}", status, error_text);
            return Err(Error::AiProvider(format!(
                "Imagen API error (status {}): {}",
                status, error_text
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse Imagen response: {}\nBody: {}", e, body);
            Error::AiProvider(format!("Failed to parse Imagen response: {}", e))
        })
    }
}

/// JPEG is what we ask the provider for, so it is also the fallback when a
/// prediction omits its MIME type.
fn sniff_mime(bytes: &[u8]) -> &'static str {
    match bytes {
        [0xFF, 0xD8, 0xFF, ..] => "image/jpeg",
        [0x89, 0x50, 0x4E, 0x47, ..] => "image/png",
        _ => "image/jpeg",
    }
}

#[async_trait]
impl ImageGenerationService for ImagenClient {
    async fn generate_image(&self, prompt: &str) -> Result<GeneratedImage> {
        let request = PredictRequest {
            instances: vec![Instance {
                prompt: prompt.to_string(),
            }],
            parameters: PredictParameters {
                sample_count: 1,
                aspect_ratio: "1:1".to_string(),
                output_mime_type: "image/jpeg".to_string(),
            },
        };

        let response = self.predict(&request).await?;

        // Only the first prediction is used; extras are discarded.
        let prediction = response
            .predictions
            .into_iter()
            .next()
            .ok_or_else(|| Error::AiProvider(NO_IMAGE_MESSAGE.to_string()))?;

        let bytes = {
            use base64::Engine as _;
            base64::engine::general_purpose::STANDARD
                .decode(&prediction.bytes_base64_encoded)
                .map_err(|e| Error::AiProvider(format!("Failed to decode base64 image: {}", e)))?
        };

        let mime_type = prediction
            .mime_type
            .unwrap_or_else(|| sniff_mime(&bytes).to_string());

        tracing::debug!("Imagen returned {} bytes ({})", bytes.len(), mime_type);

        Ok(GeneratedImage { bytes, mime_type })
    }
}
