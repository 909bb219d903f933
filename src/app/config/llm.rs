//! LLM provider configuration.

use serde::Deserialize;

/// LLM configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LlmConfig {
    /// Which provider to use.
    #[serde(default)]
    pub provider: LlmProvider,
    /// Anthropic-specific settings.
    #[serde(default)]
    pub anthropic: AnthropicConfig,
    /// OpenRouter-specific settings.
    #[serde(default)]
    pub openrouter: OpenRouterConfig,
}

/// LLM provider selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    Anthropic,
    #[default]
    OpenRouter,
}

/// Anthropic-specific configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicConfig {
    /// Model name.
    #[serde(default = "default_anthropic_model")]
    pub model: String,
    /// Temperature for generation.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Maximum tokens in response.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            model: default_anthropic_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// OpenRouter-specific configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OpenRouterConfig {
    /// Model name.
    #[serde(default = "default_openrouter_model")]
    pub model: String,
    /// Temperature for generation.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Maximum tokens in response.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            model: default_openrouter_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

fn default_anthropic_model() -> String {
    "claude-sonnet-4-6".to_string()
}

fn default_openrouter_model() -> String {
    "openai/gpt-4".to_string()
}

fn default_temperature() -> f64 {
    0.3
}

fn default_max_tokens() -> usize {
    4096
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_openrouter() {
        let config = LlmConfig::default();
        assert_eq!(config.provider, LlmProvider::OpenRouter);
        assert_eq!(config.openrouter.model, "openai/gpt-4");
        assert!((config.openrouter.temperature - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn provider_parses_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            provider: LlmProvider,
        }

        let wrapper: Wrapper = toml::from_str("provider = \"anthropic\"").unwrap();
        assert_eq!(wrapper.provider, LlmProvider::Anthropic);
    }
}
