//! Gemini text-generation adapter.

use async_trait::async_trait;
use greatescape_core::provider::{ProviderError, TextGenerationProvider};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

/// Default API root.
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Calls the Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiTextProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiTextProvider {
    /// Creates an adapter for `model` using `api_key`.
    #[must_use]
    pub fn new(client: reqwest::Client, api_key: String, model: String) -> Self {
        Self {
            client,
            base_url: GEMINI_BASE_URL.to_owned(),
            api_key,
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
impl TextGenerationProvider for GeminiTextProvider {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );
        let req = serde_json::json!({
            "contents": [
                {"role": "user", "parts": [{"text": prompt}]}
            ]
        });

        let resp = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&req)
            .send()
            .await
            .map_err(|err| ProviderError::Unreachable(err.to_string()))?;
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        if status != StatusCode::OK {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                message: body,
            });
        }
        debug!(model = %self.model, bytes = body.len(), "gemini completion received");

        let value: Value = serde_json::from_str(&body)
            .map_err(|err| ProviderError::UnexpectedResponse(err.to_string()))?;
        completion_text(&value)
            .ok_or_else(|| ProviderError::UnexpectedResponse("no candidate text".to_owned()))
    }
}

/// Joins the text parts of the first candidate.
fn completion_text(value: &Value) -> Option<String> {
    let parts = value
        .get("candidates")?
        .as_array()?
        .first()?
        .get("content")?
        .get("parts")?
        .as_array()?;
    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text")?.as_str())
        .collect();
    (!text.trim().is_empty()).then_some(text)
}
