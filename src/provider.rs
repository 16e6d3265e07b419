//! LLM Provider Trait
//!
//! Defines the interface for completion backends used by the generator.

use crate::error::GenerationError;
use async_trait::async_trait;
use std::fmt;

/// Sampling temperature for a request
pub fn temperature(surprise: bool) -> f64 {
    if surprise { 0.9 } else { 0.7 }
}

/// LLM provider trait for recipe generation
///
/// Implementations make a single attempt per call. Retrying, if ever wanted,
/// belongs to the caller.
#[async_trait]
pub trait LlmProvider: Send + Sync + fmt::Debug {
    /// Send a prompt and return the raw text of the model's reply
    ///
    /// # Arguments
    ///
    /// * `prompt` - The full user message
    /// * `surprise` - Whether this is a surprise-mode request (higher temperature)
    async fn complete(&self, prompt: &str, surprise: bool) -> Result<String, GenerationError>;

    /// The provider name (e.g., "openrouter")
    fn provider_name(&self) -> &'static str;

    /// The model used (e.g., "google/gemma-3n-e4b-it:free")
    fn model_name(&self) -> &str;
}
