//! Insight generator port.
//!
//! The generator is an external collaborator boundary: given pools,
//! sentiment, and contract-interaction context it returns a structured
//! recommendation. How it does so (prompting, model choice) is an
//! adapter concern.

use async_trait::async_trait;

use crate::domain::{InsightInput, InsightOutput};
use crate::error::Result;

/// Produces a natural-language insight plus a structured action list.
#[async_trait]
pub trait InsightGenerator: Send + Sync {
    /// Generate a recommendation for the assembled input.
    ///
    /// # Errors
    ///
    /// Returns an error if generation fails or the response cannot be
    /// parsed into the structured contract.
    async fn generate(&self, input: &InsightInput) -> Result<InsightOutput>;
}
