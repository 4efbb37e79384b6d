//! Data models and structures
//!
//! Defines the furniture catalog, the wire types exchanged with the
//! generation endpoint, and environment-driven configuration.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Furniture categories the studio can render.
///
/// The closed set drives the selection control; display names are in the
/// product's language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FurnitureType {
    Table,
    Chair,
    Shelf,
    Desk,
    Bench,
    Wardrobe,
}

impl FurnitureType {
    pub const ALL: [FurnitureType; 6] = [
        FurnitureType::Table,
        FurnitureType::Chair,
        FurnitureType::Shelf,
        FurnitureType::Desk,
        FurnitureType::Bench,
        FurnitureType::Wardrobe,
    ];

    /// Name shown in the selector and embedded in prompts.
    pub fn display_name(&self) -> &'static str {
        match self {
            FurnitureType::Table => "Mesa",
            FurnitureType::Chair => "Silla",
            FurnitureType::Shelf => "Estantería",
            FurnitureType::Desk => "Escritorio",
            FurnitureType::Bench => "Banco",
            FurnitureType::Wardrobe => "Armario",
        }
    }
}

impl std::fmt::Display for FurnitureType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A single user request to visualize a piece of furniture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub furniture_type: FurnitureType,
    pub description: String,
}

/// Body accepted by `POST /api/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
}

/// Successful response from `POST /api/generate`.
///
/// `image_data` is the bare base64 payload; the data-URI prefix is the
/// caller's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    #[serde(rename = "imageData")]
    pub image_data: String,
}

/// Error envelope shared by every non-success response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Provider credential. `None` keeps the server bootable; generation
    /// requests then fail with a generic configuration error.
    pub gemini_api_key: Option<String>,
    pub image_model: String,
    /// Proxy origin used by the client gateway.
    pub server_url: String,
}

impl Config {
    pub fn from_env() -> crate::Result<Self> {
        dotenvy::dotenv().ok();

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| crate::Error::Config("PORT must be a valid port number".to_string()))?;

        Ok(Self {
            port,
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            image_model: std::env::var("IMAGE_MODEL")
                .unwrap_or_else(|_| "imagen-4.0-generate-001".to_string()),
            server_url: std::env::var("SERVER_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_furniture_type_serializes_lowercase() {
        let json = serde_json::to_string(&FurnitureType::Shelf).unwrap();
        assert_eq!(json, "\"shelf\"");

        let parsed: FurnitureType = serde_json::from_str("\"wardrobe\"").unwrap();
        assert_eq!(parsed, FurnitureType::Wardrobe);
    }

    #[test]
    fn test_furniture_type_display_names() {
        assert_eq!(FurnitureType::Table.to_string(), "Mesa");
        assert_eq!(FurnitureType::Shelf.to_string(), "Estantería");

        for furniture_type in FurnitureType::ALL {
            assert!(!furniture_type.display_name().is_empty());
        }
    }

    #[test]
    fn test_generate_response_uses_image_data_key() {
        let response = GenerateResponse {
            image_data: "abc".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, "{\"imageData\":\"abc\"}");
    }

    #[test]
    fn test_generate_request_requires_prompt_field() {
        assert!(serde_json::from_str::<GenerateRequest>("{}").is_err());

        let parsed: GenerateRequest = serde_json::from_str("{\"prompt\":\"una mesa\"}").unwrap();
        assert_eq!(parsed.prompt, "una mesa");
    }
}
