//! Client-side access to the generation endpoint
//!
//! Wraps the HTTP call to the proxy server and normalizes success and
//! failure into a single result the session controller can consume.

pub mod client;
pub mod mock;

pub use client::HttpGenerateClient;
pub use mock::MockGenerateClient;

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait GenerateService: Send + Sync {
    /// Submit `prompt` to the generation endpoint and resolve with the
    /// base64-encoded image payload. The data-URI prefix for display is
    /// the caller's responsibility.
    async fn generate(&self, prompt: &str) -> Result<String>;
}
