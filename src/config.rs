//! Generator Configuration
//!
//! Everything is read from environment variables. A missing API key is a
//! supported mode: the generator then serves fallback recipes only.

use anyhow::{Context, Result};

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "google/gemma-3n-e4b-it:free";
pub const DEFAULT_APP_URL: &str = "http://localhost:3000";
pub const DEFAULT_APP_TITLE: &str = "SmartChef Recipe Generator";
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// OpenRouter API key; `None` means fallback-only
    pub api_key: Option<String>,
    /// Completion API base, without the `/chat/completions` suffix
    pub base_url: String,
    pub model: String,
    /// Sent as `HTTP-Referer`
    pub app_url: String,
    /// Sent as `X-Title`
    pub app_title: String,
    pub max_tokens: u32,
}

impl GeneratorConfig {
    /// Load configuration from the process environment
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Self {
            api_key: lookup("OPENROUTER_API_KEY")
                .map(|key| key.trim().to_string())
                .filter(|key| !key.is_empty()),

            base_url: lookup("OPENROUTER_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),

            model: lookup("OPENROUTER_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),

            app_url: lookup("SMARTCHEF_APP_URL").unwrap_or_else(|| DEFAULT_APP_URL.to_string()),

            app_title: lookup("SMARTCHEF_APP_TITLE")
                .unwrap_or_else(|| DEFAULT_APP_TITLE.to_string()),

            max_tokens: lookup("SMARTCHEF_MAX_TOKENS")
                .unwrap_or_else(|| DEFAULT_MAX_TOKENS.to_string())
                .parse()
                .context("SMARTCHEF_MAX_TOKENS must be a valid number")?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Same configuration with an API key set
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Same configuration pointed at another completion API
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn validate(&self) -> Result<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            anyhow::bail!("OPENROUTER_BASE_URL must be an http(s) URL");
        }

        if self.model.trim().is_empty() {
            anyhow::bail!("OPENROUTER_MODEL cannot be empty");
        }

        if self.max_tokens == 0 {
            anyhow::bail!("SMARTCHEF_MAX_TOKENS must be greater than 0");
        }

        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            app_url: DEFAULT_APP_URL.to_string(),
            app_title: DEFAULT_APP_TITLE.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<GeneratorConfig> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        GeneratorConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = load(&[]).unwrap();
        assert_eq!(config, GeneratorConfig::default());
        assert!(!config.has_credentials());
        assert_eq!(
            config.completions_url(),
            "https://openrouter.ai/api/v1/chat/completions"
        );
    }

    #[test]
    fn test_blank_key_means_no_credentials() {
        let config = load(&[("OPENROUTER_API_KEY", "   ")]).unwrap();
        assert!(!config.has_credentials());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("OPENROUTER_API_KEY", "sk-or-123"),
            ("OPENROUTER_BASE_URL", "http://127.0.0.1:9000/api/"),
            ("OPENROUTER_MODEL", "meta-llama/llama-3-8b"),
            ("SMARTCHEF_MAX_TOKENS", "512"),
        ])
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("sk-or-123"));
        assert_eq!(
            config.completions_url(),
            "http://127.0.0.1:9000/api/chat/completions"
        );
        assert_eq!(config.model, "meta-llama/llama-3-8b");
        assert_eq!(config.max_tokens, 512);
    }

    #[test]
    fn test_validation() {
        assert!(load(&[("SMARTCHEF_MAX_TOKENS", "lots")]).is_err());
        assert!(load(&[("SMARTCHEF_MAX_TOKENS", "0")]).is_err());
        assert!(load(&[("OPENROUTER_BASE_URL", "ftp://example.com")]).is_err());
        assert!(load(&[("OPENROUTER_MODEL", " ")]).is_err());
    }
}
