//! Market-sentiment signal port.

use async_trait::async_trait;

use crate::error::Result;

/// Source of an aggregate market-sentiment label.
#[async_trait]
pub trait SentimentSource: Send + Sync {
    /// Return the current majority sentiment label, e.g. "positive",
    /// "neutral", "negative", or "unknown" when nothing classifies.
    async fn market_sentiment(&self) -> Result<String>;
}
