//! Hugging Face text-to-image adapter.

use async_trait::async_trait;
use greatescape_core::provider::{GeneratedImage, ImageGenerationProvider, ProviderError};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::debug;

/// Default inference API root.
pub const HF_BASE_URL: &str = "https://router.huggingface.co/hf-inference/models";

/// Calls the Hugging Face inference API for a text-to-image model.
#[derive(Debug, Clone)]
pub struct HuggingFaceImageProvider {
    client: reqwest::Client,
    base_url: String,
    token: String,
    model: String,
}

impl HuggingFaceImageProvider {
    /// Creates an adapter for `model` authenticated with `token`.
    #[must_use]
    pub fn new(client: reqwest::Client, token: String, model: String) -> Self {
        Self {
            client,
            base_url: HF_BASE_URL.to_owned(),
            token,
            model,
        }
    }

    /// Points the adapter at a different API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl ImageGenerationProvider for HuggingFaceImageProvider {
    async fn render(
        &self,
        prompt: &str,
        negative_prompt: &str,
    ) -> Result<GeneratedImage, ProviderError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), self.model);
        let req = serde_json::json!({
            "inputs": prompt,
            "parameters": {"negative_prompt": negative_prompt},
        });

        let resp = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .header(ACCEPT, "image/png")
            .json(&req)
            .send()
            .await
            .map_err(|err| ProviderError::Unreachable(err.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("image/png")
            .to_owned();
        if !content_type.starts_with("image/") {
            return Err(ProviderError::UnexpectedResponse(format!(
                "expected an image, got {content_type}"
            )));
        }
        let bytes = resp
            .bytes()
            .await
            .map_err(|err| ProviderError::Unreachable(err.to_string()))?;
        debug!(model = %self.model, bytes = bytes.len(), "image rendered");

        Ok(GeneratedImage {
            content_type,
            bytes: bytes.to_vec(),
        })
    }
}
