//! SmartChef Recipe Generation
//!
//! Turns a list of ingredients into recipes using an OpenRouter-hosted
//! language model, with a deterministic offline fallback for when no API key
//! is configured or the model's reply is unusable.
//!
//! # Example
//!
//! ```no_run
//! use smartchef::{generate_with_fallback, GenerationRequest, GeneratorConfig};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let request = GenerationRequest::new(vec!["eggs".into(), "tomatoes".into()], "none", false);
//! let config = GeneratorConfig::load()?;
//! let result = generate_with_fallback(&request, Some(config)).await?;
//! println!("{} recipes from {}", result.recipes.len(), result.source);
//! # Ok(())
//! # }
//! ```

pub mod api;
mod config;
mod error;
mod fake;
mod fallback;
mod normalize;
mod openrouter;
mod prompt;
mod provider;
mod recipe;

pub use config::GeneratorConfig;
pub use error::GenerationError;
pub use fake::FakeProvider;
pub use fallback::synthesize;
pub use normalize::{normalize, strip_code_fences};
pub use openrouter::OpenRouterProvider;
pub use prompt::build_prompt;
pub use provider::{LlmProvider, temperature};
pub use recipe::{GenerationRequest, GenerationResult, Recipe, RecipeSource};

use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Recipe generation orchestrator
///
/// Without a provider every request is answered by the fallback generator.
/// With one, the model is asked once; remote service failures propagate and
/// everything else falls back.
#[derive(Debug, Clone, Default)]
pub struct RecipeGenerator {
    provider: Option<Arc<dyn LlmProvider>>,
}

impl RecipeGenerator {
    pub fn new(provider: Option<Arc<dyn LlmProvider>>) -> Self {
        Self { provider }
    }

    /// Generator that never touches the network
    pub fn fallback_only() -> Self {
        Self::new(None)
    }

    pub fn with_provider(provider: impl LlmProvider + 'static) -> Self {
        let provider: Arc<dyn LlmProvider> = Arc::new(provider);
        Self::new(Some(provider))
    }

    /// OpenRouter-backed generator, or fallback-only when no key is configured
    pub fn from_config(config: &GeneratorConfig) -> Self {
        match OpenRouterProvider::from_config(config) {
            Some(provider) => Self::with_provider(provider),
            None => {
                warn!("OpenRouter API key not found, serving fallback recipes only");
                Self::fallback_only()
            }
        }
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Produce recipes for a request
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::RemoteService`] when the completion endpoint
    /// rejects the request. Every other failure is answered with fallback
    /// recipes tagged [`RecipeSource::Mock`].
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GenerationError> {
        let Some(provider) = &self.provider else {
            debug!("no provider configured, using fallback recipes");
            return Ok(fallback_result(request));
        };

        match ask_model(provider.as_ref(), request).await {
            Ok(recipes) => {
                info!(
                    provider = provider.provider_name(),
                    model = provider.model_name(),
                    count = recipes.len(),
                    "generated recipes from model"
                );
                Ok(GenerationResult {
                    recipes,
                    source: RecipeSource::Ai,
                })
            }
            Err(err) if err.is_recoverable() => {
                warn!(error = %err, "falling back to mock recipes");
                Ok(fallback_result(request))
            }
            Err(err) => {
                error!(error = %err, "completion service unavailable");
                Err(err)
            }
        }
    }
}

async fn ask_model(
    provider: &dyn LlmProvider,
    request: &GenerationRequest,
) -> Result<Vec<Recipe>, GenerationError> {
    let prompt = build_prompt(&request.ingredients, &request.dietary, request.surprise);
    let raw = provider.complete(&prompt, request.surprise).await?;
    let recipes = normalize(&raw)?;

    // An empty list serves nobody; treat it like a missing reply.
    if recipes.is_empty() {
        return Err(GenerationError::EmptyResponse);
    }
    Ok(recipes)
}

fn fallback_result(request: &GenerationRequest) -> GenerationResult {
    GenerationResult {
        recipes: synthesize(&request.ingredients, request.surprise),
        source: RecipeSource::Mock,
    }
}

/// Generate recipes with the given configuration
///
/// Without a configuration no API key is available and fallback recipes are
/// returned.
pub async fn generate_with_fallback(
    request: &GenerationRequest,
    config: Option<GeneratorConfig>,
) -> Result<GenerationResult, GenerationError> {
    let config = config.unwrap_or_default();
    RecipeGenerator::from_config(&config).generate(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(ingredients: &[&str], surprise: bool) -> GenerationRequest {
        GenerationRequest::new(
            ingredients.iter().map(|s| s.to_string()).collect(),
            "none",
            surprise,
        )
    }

    #[tokio::test]
    async fn test_no_provider_uses_fallback() {
        let result = RecipeGenerator::fallback_only()
            .generate(&request(&["eggs", "tomatoes"], false))
            .await
            .unwrap();
        assert_eq!(result.source, RecipeSource::Mock);
        assert_eq!(result.recipes.len(), 3);
        assert_eq!(result.recipes[0].name, "Classic eggs, tomatoes Skillet");
    }

    #[tokio::test]
    async fn test_model_reply_is_tagged_ai() {
        let reply = r#"```json
{"name": "Tomato Egg Drop Soup", "steps": ["Boil", "Stir"]}
```"#;
        let fake = Arc::new(FakeProvider::with_reply(reply));
        let generator = RecipeGenerator::new(Some(fake.clone() as Arc<dyn LlmProvider>));

        let result = generator.generate(&request(&["eggs"], true)).await.unwrap();
        assert_eq!(result.source, RecipeSource::Ai);
        assert_eq!(result.recipes.len(), 1);
        assert_eq!(result.recipes[0].name, "Tomato Egg Drop Soup");
        assert_eq!(result.recipes[0].tips, "Enjoy your cooking!");

        let prompts = fake.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].0.contains("Create 1 VERY CREATIVE"));
        assert!(prompts[0].1);
    }

    #[tokio::test]
    async fn test_unparseable_reply_falls_back() {
        let provider = FakeProvider::with_reply("not json at all");
        let generator = RecipeGenerator::with_provider(provider);
        let result = generator.generate(&request(&["eggs"], false)).await.unwrap();
        assert!(result.used_fallback());
        assert_eq!(result.recipes.len(), 3);
    }

    #[tokio::test]
    async fn test_recoverable_errors_fall_back() {
        for err in [
            GenerationError::EmptyResponse,
            GenerationError::Parse("bad".to_string()),
            GenerationError::Transport("connection refused".to_string()),
        ] {
            let generator = RecipeGenerator::with_provider(FakeProvider::with_error(err));
            let result = generator.generate(&request(&["rice"], true)).await.unwrap();
            assert_eq!(result.source, RecipeSource::Mock);
            assert_eq!(result.recipes.len(), 1);
        }
    }

    #[tokio::test]
    async fn test_empty_array_reply_falls_back() {
        let generator = RecipeGenerator::with_provider(FakeProvider::with_reply("[]"));
        let result = generator.generate(&request(&["rice"], false)).await.unwrap();
        assert_eq!(result.source, RecipeSource::Mock);
    }

    #[tokio::test]
    async fn test_remote_service_error_propagates() {
        let remote = GenerationError::RemoteService {
            status: 429,
            message: "Rate limit exceeded".to_string(),
        };
        let generator = RecipeGenerator::with_provider(FakeProvider::with_error(remote.clone()));
        let err = generator
            .generate(&request(&["rice"], false))
            .await
            .unwrap_err();
        assert_eq!(err, remote);
    }

    #[tokio::test]
    async fn test_generate_with_fallback_defaults_to_offline() {
        let result = generate_with_fallback(&request(&["kale"], true), None)
            .await
            .unwrap();
        assert_eq!(result.source, RecipeSource::Mock);
        assert_eq!(result.recipes[0].name, "Fusion kale Delight");
    }

    #[test]
    fn test_from_config_without_key_has_no_provider() {
        assert!(!RecipeGenerator::from_config(&GeneratorConfig::default()).has_provider());
        assert!(
            RecipeGenerator::from_config(&GeneratorConfig::default().with_api_key("k"))
                .has_provider()
        );
    }
}
