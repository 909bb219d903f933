//! Outbound port for the yields aggregator.

use async_trait::async_trait;

use crate::domain::{Chain, EnrichedPool, PoolYield};

/// Client for the external yields aggregator.
///
/// Both methods are best-effort by contract: callers treat an empty or
/// `None` result as "no data this cycle", never as a hard error, so a
/// flaky upstream cannot crash ingestion.
#[async_trait]
pub trait YieldSource: Send + Sync {
    /// Fetch every pool on the aggregator, normalized and filtered to the
    /// requested chain set. Returns `[]` on any transport/parse failure.
    async fn fetch_pool_yields(&self, chains: &[Chain]) -> Vec<PoolYield>;

    /// Fetch enriched metadata for one pool id. Returns `None` on failure
    /// or an empty payload.
    async fn fetch_enriched_pool(&self, pool_id: &str) -> Option<EnrichedPool>;
}
