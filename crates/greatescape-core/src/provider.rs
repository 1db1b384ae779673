//! Generative provider abstractions.
//!
//! Room synthesis talks to two independent services: a text model that
//! returns a JSON room description and an image model that returns binary
//! artwork. Both sit behind these traits so the orchestrator can be driven
//! by HTTP adapters in production and scripted doubles in tests.

use async_trait::async_trait;
use thiserror::Error;

/// Failure reported by a generation provider.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider is not configured (missing credentials).
    #[error("provider not configured: {0}")]
    NotConfigured(String),

    /// The provider could not be reached or timed out.
    #[error("provider unreachable: {0}")]
    Unreachable(String),

    /// The provider answered with a non-success status.
    #[error("provider returned status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body or reason.
        message: String,
    },

    /// The provider answered, but not in the expected shape.
    #[error("unexpected provider response: {0}")]
    UnexpectedResponse(String),
}

/// Binary image returned by an image provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// MIME type, e.g. `image/png`.
    pub content_type: String,
    /// Raw image bytes.
    pub bytes: Vec<u8>,
}

/// Text-generation service (stage 1 of room synthesis).
#[async_trait]
pub trait TextGenerationProvider: Send + Sync {
    /// Returns the raw completion for `prompt`.
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;
}

/// Image-generation service (stage 2 of room synthesis).
#[async_trait]
pub trait ImageGenerationProvider: Send + Sync {
    /// Renders `prompt`, steering away from `negative_prompt`.
    async fn render(
        &self,
        prompt: &str,
        negative_prompt: &str,
    ) -> Result<GeneratedImage, ProviderError>;
}
