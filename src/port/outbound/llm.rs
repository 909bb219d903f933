//! LLM completion port.
//!
//! Defines a generic interface for large language model completion
//! requests, used by the insight generator.

use async_trait::async_trait;

use crate::error::Result;

/// Client for large language model text completion.
///
/// Implementations wrap specific providers (Anthropic, OpenAI-compatible
/// routers) and handle authentication and response parsing. They must be
/// `Send + Sync` to support concurrent requests.
#[async_trait]
pub trait Llm: Send + Sync {
    /// Return the provider name for logging.
    fn name(&self) -> &'static str;

    /// Send a completion request and return the generated text.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the response is
    /// invalid.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
