//! Providers used when credentials are missing.

use async_trait::async_trait;
use greatescape_core::provider::{
    GeneratedImage, ImageGenerationProvider, ProviderError, TextGenerationProvider,
};

/// Stands in for a provider whose credentials were not configured. Every
/// request fails with [`ProviderError::NotConfigured`], so synthesis reports
/// a generation error and artwork falls back.
#[derive(Debug, Clone)]
pub struct UnconfiguredProvider {
    setting: &'static str,
}

impl UnconfiguredProvider {
    /// `setting` names the missing configuration key.
    #[must_use]
    pub fn new(setting: &'static str) -> Self {
        Self { setting }
    }

    fn error(&self) -> ProviderError {
        ProviderError::NotConfigured(format!("{} is not set; check your API keys", self.setting))
    }
}

#[async_trait]
impl TextGenerationProvider for UnconfiguredProvider {
    async fn complete(&self, _prompt: &str) -> Result<String, ProviderError> {
        Err(self.error())
    }
}

#[async_trait]
impl ImageGenerationProvider for UnconfiguredProvider {
    async fn render(
        &self,
        _prompt: &str,
        _negative_prompt: &str,
    ) -> Result<GeneratedImage, ProviderError> {
        Err(self.error())
    }
}
