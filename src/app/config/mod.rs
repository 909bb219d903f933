//! Application configuration loading and validation.
//!
//! Configuration is loaded from a TOML file with environment variable
//! overrides for sensitive values like `DATABASE_URL` and API keys.

use serde::Deserialize;
use std::path::Path;

use crate::error::{ConfigError, Result};

mod collector;
mod llm;
mod logging;

pub use collector::CollectorConfig;
pub use llm::{AnthropicConfig, LlmConfig, LlmProvider, OpenRouterConfig};
pub use logging::LoggingConfig;

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite database URL. Overridden by `DATABASE_URL` when set.
    #[serde(default = "default_database_url")]
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Listen address for the REST API.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

/// Sentiment signal configuration. API keys come from the environment
/// (`CRYPTOPANIC_API_KEY`, `HUGGINGFACE_API_KEY`), never the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct SentimentConfig {
    /// Disable to run the pipeline without a sentiment signal.
    #[serde(default = "default_sentiment_enabled")]
    pub enabled: bool,
    #[serde(skip)]
    pub cryptopanic_api_key: Option<String>,
    #[serde(skip)]
    pub huggingface_api_key: Option<String>,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            enabled: default_sentiment_enabled(),
            cryptopanic_api_key: None,
            huggingface_api_key: None,
        }
    }
}

/// Main application configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub collector: CollectorConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub sentiment: SentimentConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file, then apply environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if
    /// validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Self = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.finish()
    }

    /// Like [`Config::load`], but a missing file falls back to defaults.
    /// Any other read or parse failure is still fatal.
    ///
    /// # Errors
    ///
    /// Returns an error on unreadable or malformed config, or if
    /// validation fails.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Self::default().finish()
        }
    }

    fn finish(mut self) -> Result<Self> {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            self.database.url = url;
        }
        self.sentiment.cryptopanic_api_key = std::env::var("CRYPTOPANIC_API_KEY").ok();
        self.sentiment.huggingface_api_key = std::env::var("HUGGINGFACE_API_KEY").ok();

        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        if self.database.url.is_empty() {
            return Err(ConfigError::MissingField {
                field: "database.url",
            }
            .into());
        }
        if self.server.listen_addr.is_empty() {
            return Err(ConfigError::MissingField {
                field: "server.listen_addr",
            }
            .into());
        }
        if self.collector.yield_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "collector.yield_interval_secs",
                reason: "must be greater than zero".into(),
            }
            .into());
        }
        if self.collector.enrich_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "collector.enrich_interval_secs",
                reason: "must be greater than zero".into(),
            }
            .into());
        }
        if self.collector.enrich_top_n <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "collector.enrich_top_n",
                reason: "must be greater than zero".into(),
            }
            .into());
        }
        Ok(())
    }
}

fn default_database_url() -> String {
    "yieldscout.db".to_string()
}

fn default_listen_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_sentiment_enabled() -> bool {
    true
}
