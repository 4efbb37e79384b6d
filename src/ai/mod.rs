//! Provider integration for image generation
//!
//! Provides the interface to the external image-generation API that turns
//! a furniture prompt into a rendered concept image. The proxy server is
//! the only caller; it alone holds the provider credential.

pub mod imagen;
pub mod mock;

pub use imagen::ImagenClient;
pub use mock::MockImageClient;

use crate::Result;
use async_trait::async_trait;

/// A decoded image returned by the provider.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

#[async_trait]
pub trait ImageGenerationService: Send + Sync {
    /// Request exactly one rendered image for `prompt`.
    async fn generate_image(&self, prompt: &str) -> Result<GeneratedImage>;
}
