//! Collector scheduling configuration.

use serde::Deserialize;

use crate::domain::Chain;

/// Collector configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectorConfig {
    /// Chain whose pools are ingested.
    #[serde(default = "default_chain")]
    pub chain: Chain,
    /// Seconds between pool-yield collection cycles.
    #[serde(default = "default_yield_interval_secs")]
    pub yield_interval_secs: u64,
    /// Seconds between enriched-pool collection cycles.
    #[serde(default = "default_enrich_interval_secs")]
    pub enrich_interval_secs: u64,
    /// TVL floor for pools considered worth enriching.
    #[serde(default = "default_min_tvl_usd")]
    pub min_tvl_usd: f64,
    /// How many top-APY pools to enrich per cycle.
    #[serde(default = "default_enrich_top_n")]
    pub enrich_top_n: i64,
    /// Lookback window, in hours, for suggestions still eligible for
    /// action derivation.
    #[serde(default = "default_action_lookback_hours")]
    pub action_lookback_hours: i64,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            chain: default_chain(),
            yield_interval_secs: default_yield_interval_secs(),
            enrich_interval_secs: default_enrich_interval_secs(),
            min_tvl_usd: default_min_tvl_usd(),
            enrich_top_n: default_enrich_top_n(),
            action_lookback_hours: default_action_lookback_hours(),
        }
    }
}

fn default_chain() -> Chain {
    Chain::Aptos
}

fn default_yield_interval_secs() -> u64 {
    600
}

fn default_enrich_interval_secs() -> u64 {
    3600
}

fn default_min_tvl_usd() -> f64 {
    100_000.0
}

fn default_enrich_top_n() -> i64 {
    10
}

fn default_action_lookback_hours() -> i64 {
    24
}
