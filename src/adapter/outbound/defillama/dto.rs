//! Wire types for the DefiLlama yields API and the pure normalizer that
//! maps them onto the internal schema.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::{normalize_chain, DataSource, EnrichedPool, PoolYield};

/// Envelope every yields endpoint wraps its payload in.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: Vec<T>,
}

/// One record from `GET /pools`.
///
/// Numeric fields the aggregator may omit are optional here and stay
/// optional through normalization; they are never coerced to 0.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPoolYield {
    pub pool: String,
    pub chain: String,
    pub project: String,
    pub symbol: String,
    #[serde(rename = "tvlUsd")]
    pub tvl_usd: f64,
    pub apy: f64,
    #[serde(rename = "apyBase", default)]
    pub apy_base: Option<f64>,
    #[serde(rename = "apyBase7d", default)]
    pub apy_base_7d: Option<f64>,
    #[serde(rename = "apyMean30d", default)]
    pub apy_mean_30d: Option<f64>,
    #[serde(rename = "apyPct1D", default)]
    pub apy_pct_1d: Option<f64>,
    #[serde(rename = "apyPct7D", default)]
    pub apy_pct_7d: Option<f64>,
    #[serde(rename = "apyPct30D", default)]
    pub apy_pct_30d: Option<f64>,
}

/// Map a raw aggregator record into the internal shape.
///
/// Pure function: tags `DataSource::Defillama`, normalizes the chain label
/// case-insensitively (unrecognized chains become `Chain::Unknown` rather
/// than failing), and passes optional numerics through untouched.
#[must_use]
pub fn normalize(raw: RawPoolYield) -> PoolYield {
    PoolYield {
        original_id: raw.pool,
        data_source: DataSource::Defillama,
        chain: normalize_chain(&raw.chain),
        symbol: raw.symbol,
        project: raw.project,
        apy: raw.apy,
        apy_base: raw.apy_base,
        apy_base_7d: raw.apy_base_7d,
        apy_mean_30d: raw.apy_mean_30d,
        apy_pct_1d: raw.apy_pct_1d,
        apy_pct_7d: raw.apy_pct_7d,
        apy_pct_30d: raw.apy_pct_30d,
        tvl_usd: raw.tvl_usd,
    }
}

/// Classifier output triple nested inside enriched records.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPredictions {
    #[serde(rename = "predictedClass", default)]
    pub predicted_class: Option<String>,
    #[serde(rename = "predictedProbability", default)]
    pub predicted_probability: Option<f64>,
    #[serde(rename = "binnedConfidence", default)]
    pub binned_confidence: Option<f64>,
}

/// One record from `GET /poolsEnriched?pool=<id>`.
///
/// The endpoint mixes camelCase with a few snake_case fields; the renames
/// below follow the payload exactly.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEnrichedPool {
    pub pool: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    pub project: String,
    pub chain: String,
    pub symbol: String,
    #[serde(rename = "poolMeta", default)]
    pub pool_meta: Option<String>,
    #[serde(rename = "underlyingTokens", default)]
    pub underlying_tokens: Option<Vec<String>>,
    #[serde(rename = "rewardTokens", default)]
    pub reward_tokens: Option<Vec<String>>,
    #[serde(rename = "tvlUsd")]
    pub tvl_usd: f64,
    pub apy: f64,
    #[serde(rename = "apyBase", default)]
    pub apy_base: Option<f64>,
    #[serde(rename = "apyReward", default)]
    pub apy_reward: Option<f64>,
    #[serde(rename = "il7d", default)]
    pub il_7d: Option<f64>,
    #[serde(rename = "apyBase7d", default)]
    pub apy_base_7d: Option<f64>,
    #[serde(rename = "volumeUsd1d", default)]
    pub volume_usd_1d: Option<f64>,
    #[serde(rename = "volumeUsd7d", default)]
    pub volume_usd_7d: Option<f64>,
    #[serde(rename = "apyBaseInception", default)]
    pub apy_base_inception: Option<f64>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(rename = "apyPct1D", default)]
    pub apy_pct_1d: Option<f64>,
    #[serde(rename = "apyPct7D", default)]
    pub apy_pct_7d: Option<f64>,
    #[serde(rename = "apyPct30D", default)]
    pub apy_pct_30d: Option<f64>,
    #[serde(rename = "apyMean30d", default)]
    pub apy_mean_30d: Option<f64>,
    #[serde(default)]
    pub stablecoin: bool,
    #[serde(rename = "ilRisk", default)]
    pub il_risk: String,
    #[serde(default)]
    pub exposure: String,
    #[serde(rename = "return", default)]
    pub return_value: Option<f64>,
    #[serde(default)]
    pub count: Option<i32>,
    #[serde(rename = "apyMeanExpanding", default)]
    pub apy_mean_expanding: Option<f64>,
    #[serde(rename = "apyStdExpanding", default)]
    pub apy_std_expanding: Option<f64>,
    #[serde(default)]
    pub mu: Option<f64>,
    #[serde(default)]
    pub sigma: Option<f64>,
    #[serde(default)]
    pub outlier: bool,
    #[serde(rename = "project_factorized", default)]
    pub project_factorized: Option<i32>,
    #[serde(rename = "chain_factorized", default)]
    pub chain_factorized: Option<i32>,
    #[serde(default)]
    pub predictions: RawPredictions,
    #[serde(rename = "pool_old", default)]
    pub pool_old: Option<String>,
}

impl From<RawEnrichedPool> for EnrichedPool {
    fn from(raw: RawEnrichedPool) -> Self {
        Self {
            pool: raw.pool,
            timestamp: raw.timestamp.unwrap_or_else(Utc::now),
            project: raw.project,
            chain: raw.chain,
            symbol: raw.symbol,
            pool_meta: raw.pool_meta,
            underlying_tokens: raw.underlying_tokens.unwrap_or_default(),
            reward_tokens: raw.reward_tokens,
            tvl_usd: raw.tvl_usd,
            apy: raw.apy,
            apy_base: raw.apy_base,
            apy_reward: raw.apy_reward,
            il_7d: raw.il_7d,
            apy_base_7d: raw.apy_base_7d,
            volume_usd_1d: raw.volume_usd_1d,
            volume_usd_7d: raw.volume_usd_7d,
            apy_base_inception: raw.apy_base_inception,
            url: raw.url,
            apy_pct_1d: raw.apy_pct_1d,
            apy_pct_7d: raw.apy_pct_7d,
            apy_pct_30d: raw.apy_pct_30d,
            apy_mean_30d: raw.apy_mean_30d,
            stablecoin: raw.stablecoin,
            il_risk: raw.il_risk,
            exposure: raw.exposure,
            return_value: raw.return_value,
            count: raw.count,
            apy_mean_expanding: raw.apy_mean_expanding,
            apy_std_expanding: raw.apy_std_expanding,
            mu: raw.mu,
            sigma: raw.sigma,
            outlier: raw.outlier,
            project_factorized: raw.project_factorized,
            chain_factorized: raw.chain_factorized,
            predicted_class: raw.predictions.predicted_class,
            predicted_probability: raw.predictions.predicted_probability,
            binned_confidence: raw.predictions.binned_confidence,
            pool_old: raw.pool_old,
        }
    }
}
