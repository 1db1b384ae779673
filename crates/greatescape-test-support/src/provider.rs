//! Test providers: scripted text and image generation doubles.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use greatescape_core::provider::{
    GeneratedImage, ImageGenerationProvider, ProviderError, TextGenerationProvider,
};

/// A text provider that answers with queued completions and records every
/// prompt it receives. Once the queue is empty it repeats the last answer.
#[derive(Debug)]
pub struct ScriptedTextProvider {
    responses: Mutex<VecDeque<String>>,
    last: Mutex<String>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedTextProvider {
    /// Create a provider that always answers `response`.
    #[must_use]
    pub fn new(response: impl Into<String>) -> Self {
        Self::sequence(vec![response.into()])
    }

    /// Create a provider that answers with `responses` in order.
    #[must_use]
    pub fn sequence(responses: Vec<String>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            last: Mutex::new(String::new()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Returns every prompt received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerationProvider for ScriptedTextProvider {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        self.prompts.lock().unwrap().push(prompt.to_owned());
        let mut last = self.last.lock().unwrap();
        if let Some(next) = self.responses.lock().unwrap().pop_front() {
            *last = next;
        }
        Ok(last.clone())
    }
}

/// A text provider that is always unreachable.
#[derive(Debug)]
pub struct FailingTextProvider;

#[async_trait]
impl TextGenerationProvider for FailingTextProvider {
    async fn complete(&self, _prompt: &str) -> Result<String, ProviderError> {
        Err(ProviderError::Unreachable("connection refused".into()))
    }
}

/// An image provider that renders the same PNG bytes for every prompt and
/// records what it was asked for.
#[derive(Debug, Default)]
pub struct StaticImageProvider {
    prompts: Mutex<Vec<(String, String)>>,
    calls: AtomicUsize,
}

impl StaticImageProvider {
    /// Bytes returned for every render.
    pub const BYTES: &'static [u8] = b"\x89PNG\r\n\x1a\nfake";

    /// Create a provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of render calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Returns every `(prompt, negative_prompt)` pair received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn prompts(&self) -> Vec<(String, String)> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageGenerationProvider for StaticImageProvider {
    async fn render(
        &self,
        prompt: &str,
        negative_prompt: &str,
    ) -> Result<GeneratedImage, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .unwrap()
            .push((prompt.to_owned(), negative_prompt.to_owned()));
        Ok(GeneratedImage {
            content_type: "image/png".to_owned(),
            bytes: Self::BYTES.to_vec(),
        })
    }
}

/// An image provider that always fails with a server error.
#[derive(Debug)]
pub struct FailingImageProvider;

#[async_trait]
impl ImageGenerationProvider for FailingImageProvider {
    async fn render(
        &self,
        _prompt: &str,
        _negative_prompt: &str,
    ) -> Result<GeneratedImage, ProviderError> {
        Err(ProviderError::Status {
            status: 503,
            message: "model is loading".into(),
        })
    }
}
