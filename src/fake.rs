//! Fake LLM provider for testing.
//!
//! Returns a canned reply (or failure) and counts how often it was asked,
//! so tests can check both the generator's output and whether the model was
//! consulted at all.

use crate::error::GenerationError;
use crate::provider::LlmProvider;
use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug)]
pub struct FakeProvider {
    reply: Result<String, GenerationError>,
    calls: AtomicUsize,
    prompts: Mutex<Vec<(String, bool)>>,
}

impl FakeProvider {
    /// Provider that always answers with `content`
    pub fn with_reply(content: impl Into<String>) -> Self {
        Self::with_result(Ok(content.into()))
    }

    /// Provider that always fails with `error`
    pub fn with_error(error: GenerationError) -> Self {
        Self::with_result(Err(error))
    }

    fn with_result(reply: Result<String, GenerationError>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Number of `complete` calls so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompts received, with their surprise flag, in call order
    pub fn prompts(&self) -> Vec<(String, bool)> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl LlmProvider for FakeProvider {
    async fn complete(&self, prompt: &str, surprise: bool) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((prompt.to_string(), surprise));
        self.reply.clone()
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fake_provider_reply() {
        let provider = FakeProvider::with_reply("[]");
        assert_eq!(provider.complete("make soup", false).await.unwrap(), "[]");
        assert_eq!(provider.calls(), 1);
        assert_eq!(provider.prompts(), vec![("make soup".to_string(), false)]);
    }

    #[tokio::test]
    async fn test_fake_provider_error() {
        let provider = FakeProvider::with_error(GenerationError::EmptyResponse);
        let err = provider.complete("make soup", true).await.unwrap_err();
        assert_eq!(err, GenerationError::EmptyResponse);
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_prompts_survive_poisoned_lock() {
        let provider = FakeProvider::with_reply("[]");
        provider.complete("first", false).await.unwrap();

        let poisoned = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = provider.prompts.lock().unwrap();
            panic!("poison the prompt log");
        }));
        assert!(poisoned.is_err());
        assert!(provider.prompts.is_poisoned());

        provider.complete("second", true).await.unwrap();
        assert_eq!(
            provider.prompts(),
            vec![("first".to_string(), false), ("second".to_string(), true)]
        );
        assert_eq!(provider.calls(), 2);
    }
}
