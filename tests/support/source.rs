use std::collections::HashMap;

use async_trait::async_trait;
use yieldscout::domain::{Chain, EnrichedPool, PoolYield};
use yieldscout::port::outbound::YieldSource;

/// Scripted aggregator that serves canned yields and enrichment records.
///
/// An empty `yields` list doubles as the "upstream fetch failed" case,
/// since the real client degrades failures to an empty result.
#[derive(Default)]
pub struct ScriptedSource {
    pub yields: Vec<PoolYield>,
    pub enriched: HashMap<String, EnrichedPool>,
}

impl ScriptedSource {
    pub fn with_yields(yields: Vec<PoolYield>) -> Self {
        Self {
            yields,
            enriched: HashMap::new(),
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }
}

#[async_trait]
impl YieldSource for ScriptedSource {
    async fn fetch_pool_yields(&self, chains: &[Chain]) -> Vec<PoolYield> {
        self.yields
            .iter()
            .filter(|y| chains.contains(&y.chain))
            .cloned()
            .collect()
    }

    async fn fetch_enriched_pool(&self, pool_id: &str) -> Option<EnrichedPool> {
        self.enriched.get(pool_id).cloned()
    }
}
