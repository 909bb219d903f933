//! Pool-yield observations and enriched pool metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::chain::{Chain, DataSource};

/// One APY/TVL observation for a (pool, data-source) pair at ingestion time.
///
/// Identity is `(original_id, data_source)`; `original_id` is the source
/// system's pool identifier. Optional percentage fields stay `None` when the
/// aggregator omits them, never a zero stand-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolYield {
    pub original_id: String,
    pub data_source: DataSource,
    pub chain: Chain,
    pub symbol: String,
    pub project: String,
    pub apy: f64,
    pub apy_base: Option<f64>,
    pub apy_base_7d: Option<f64>,
    pub apy_mean_30d: Option<f64>,
    pub apy_pct_1d: Option<f64>,
    pub apy_pct_7d: Option<f64>,
    pub apy_pct_30d: Option<f64>,
    pub tvl_usd: f64,
}

/// Supplementary statistical and predictive metadata for a single pool,
/// refreshed on a slower cadence than [`PoolYield`].
///
/// `chain` stays the raw aggregator string here; the enriched endpoint is
/// queried per pool id so there is no chain filtering to normalize for.
/// `sigma` is the volatility proxy used by risk-tiered filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedPool {
    pub pool: String,
    pub timestamp: DateTime<Utc>,
    pub project: String,
    pub chain: String,
    pub symbol: String,
    pub pool_meta: Option<String>,
    pub underlying_tokens: Vec<String>,
    pub reward_tokens: Option<Vec<String>>,
    pub tvl_usd: f64,
    pub apy: f64,
    pub apy_base: Option<f64>,
    pub apy_reward: Option<f64>,
    pub il_7d: Option<f64>,
    pub apy_base_7d: Option<f64>,
    pub volume_usd_1d: Option<f64>,
    pub volume_usd_7d: Option<f64>,
    pub apy_base_inception: Option<f64>,
    pub url: Option<String>,
    pub apy_pct_1d: Option<f64>,
    pub apy_pct_7d: Option<f64>,
    pub apy_pct_30d: Option<f64>,
    pub apy_mean_30d: Option<f64>,
    pub stablecoin: bool,
    pub il_risk: String,
    pub exposure: String,
    pub return_value: Option<f64>,
    pub count: Option<i32>,
    pub apy_mean_expanding: Option<f64>,
    pub apy_std_expanding: Option<f64>,
    pub mu: Option<f64>,
    pub sigma: Option<f64>,
    pub outlier: bool,
    pub project_factorized: Option<i32>,
    pub chain_factorized: Option<i32>,
    pub predicted_class: Option<String>,
    pub predicted_probability: Option<f64>,
    pub binned_confidence: Option<f64>,
    pub pool_old: Option<String>,
}
