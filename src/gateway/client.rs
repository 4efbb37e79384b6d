use super::GenerateService;
use crate::models::{GenerateRequest, GenerateResponse};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;

/// Used when a failing response carries no readable JSON body.
pub const UNKNOWN_SERVER_ERROR: &str = "Ocurrió un error desconocido en el servidor.";

/// Used when a successful response carries no image payload.
pub const NO_IMAGE_DATA: &str = "No se recibieron datos de imagen del servidor.";

/// HTTP client for the proxy's `POST /api/generate` endpoint.
pub struct HttpGenerateClient {
    client: Client,
    endpoint: String,
}

impl HttpGenerateClient {
    /// `server_url` is the proxy origin, e.g. `http://localhost:8080`.
    pub fn new(server_url: &str) -> Self {
        Self::new_with_client(server_url, Client::new())
    }

    pub fn new_with_client(server_url: &str, client: Client) -> Self {
        Self {
            client,
            endpoint: format!("{}/api/generate", server_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl GenerateService for HttpGenerateClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&GenerateRequest {
                prompt: prompt.to_string(),
            })
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to reach generation endpoint: {}", e);
                e
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let message = match response.json::<serde_json::Value>().await {
                Ok(body) => body
                    .get("error")
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
                    .unwrap_or_else(|| {
                        format!("La solicitud falló con el estado {}", status.as_u16())
                    }),
                Err(_) => UNKNOWN_SERVER_ERROR.to_string(),
            };
            tracing::error!("Generation endpoint error (status {}): {}", status, message);
            return Err(Error::Gateway(message));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|_| Error::Gateway(NO_IMAGE_DATA.to_string()))?;

        if body.image_data.is_empty() {
            return Err(Error::Gateway(NO_IMAGE_DATA.to_string()));
        }

        Ok(body.image_data)
    }
}
