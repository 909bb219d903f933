//! Database model types for Diesel ORM.
//!
//! Rows store timestamps as RFC 3339 text, enums as their integer
//! encodings, and token lists as JSON arrays. Conversions back to domain
//! types fail loudly on values that do not round-trip.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{
    available_interactions, defillama_enriched_pools, pool_yields, yield_actions,
    yield_suggestion_intent_tx_history, yield_suggestion_intents, yield_suggestions,
};
use crate::domain::{
    ActionType, AvailableInteraction, Chain, DataSource, EnrichedPool, IntentStatus,
    InvestmentTimeframe, NewYieldAction, NewYieldSuggestion, PoolYield, RiskTolerance,
    TxHistoryEntry, TxStatus, YieldAction, YieldSuggestion, YieldSuggestionIntent,
};
use crate::error::{Error, Result};

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Parse(format!("invalid timestamp {value:?}: {e}")))
}

/// Database row for a pool-yield observation (insertable).
#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = pool_yields)]
pub struct NewPoolYieldRow {
    pub timestamp: String,
    pub original_id: String,
    pub data_source: i32,
    pub chain: i32,
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

impl NewPoolYieldRow {
    pub fn from_domain(pool_yield: &PoolYield, observed_at: DateTime<Utc>) -> Self {
        Self {
            timestamp: observed_at.to_rfc3339(),
            original_id: pool_yield.original_id.clone(),
            data_source: pool_yield.data_source.as_i32(),
            chain: pool_yield.chain.as_i32(),
            symbol: pool_yield.symbol.clone(),
            project: pool_yield.project.clone(),
            apy: pool_yield.apy,
            apy_base: pool_yield.apy_base,
            apy_base_7d: pool_yield.apy_base_7d,
            apy_mean_30d: pool_yield.apy_mean_30d,
            apy_pct_1d: pool_yield.apy_pct_1d,
            apy_pct_7d: pool_yield.apy_pct_7d,
            apy_pct_30d: pool_yield.apy_pct_30d,
            tvl_usd: pool_yield.tvl_usd,
        }
    }
}

/// Database row for a pool-yield observation (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = pool_yields)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct PoolYieldRow {
    pub id: i32,
    pub timestamp: String,
    pub original_id: String,
    pub data_source: i32,
    pub chain: i32,
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

impl TryFrom<PoolYieldRow> for PoolYield {
    type Error = Error;

    fn try_from(row: PoolYieldRow) -> Result<Self> {
        Ok(Self {
            original_id: row.original_id,
            data_source: DataSource::try_from(row.data_source)?,
            chain: Chain::try_from(row.chain)?,
            symbol: row.symbol,
            project: row.project,
            apy: row.apy,
            apy_base: row.apy_base,
            apy_base_7d: row.apy_base_7d,
            apy_mean_30d: row.apy_mean_30d,
            apy_pct_1d: row.apy_pct_1d,
            apy_pct_7d: row.apy_pct_7d,
            apy_pct_30d: row.apy_pct_30d,
            tvl_usd: row.tvl_usd,
        })
    }
}

/// Database row for an enriched pool. One struct serves both directions
/// since the table's primary key is the natural pool id.
#[derive(Queryable, Selectable, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = defillama_enriched_pools)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EnrichedPoolRow {
    pub pool: String,
    pub timestamp: String,
    pub project: String,
    pub chain: String,
    pub symbol: String,
    pub pool_meta: Option<String>,
    pub underlying_tokens: String,
    pub reward_tokens: Option<String>,
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

impl EnrichedPoolRow {
    /// # Errors
    ///
    /// Returns an error if a token list cannot be serialized to JSON.
    pub fn from_domain(pool: &EnrichedPool) -> Result<Self> {
        Ok(Self {
            pool: pool.pool.clone(),
            timestamp: pool.timestamp.to_rfc3339(),
            project: pool.project.clone(),
            chain: pool.chain.clone(),
            symbol: pool.symbol.clone(),
            pool_meta: pool.pool_meta.clone(),
            underlying_tokens: serde_json::to_string(&pool.underlying_tokens)?,
            reward_tokens: pool
                .reward_tokens
                .as_ref()
                .map(serde_json::to_string)
                .transpose()?,
            tvl_usd: pool.tvl_usd,
            apy: pool.apy,
            apy_base: pool.apy_base,
            apy_reward: pool.apy_reward,
            il_7d: pool.il_7d,
            apy_base_7d: pool.apy_base_7d,
            volume_usd_1d: pool.volume_usd_1d,
            volume_usd_7d: pool.volume_usd_7d,
            apy_base_inception: pool.apy_base_inception,
            url: pool.url.clone(),
            apy_pct_1d: pool.apy_pct_1d,
            apy_pct_7d: pool.apy_pct_7d,
            apy_pct_30d: pool.apy_pct_30d,
            apy_mean_30d: pool.apy_mean_30d,
            stablecoin: pool.stablecoin,
            il_risk: pool.il_risk.clone(),
            exposure: pool.exposure.clone(),
            return_value: pool.return_value,
            count: pool.count,
            apy_mean_expanding: pool.apy_mean_expanding,
            apy_std_expanding: pool.apy_std_expanding,
            mu: pool.mu,
            sigma: pool.sigma,
            outlier: pool.outlier,
            project_factorized: pool.project_factorized,
            chain_factorized: pool.chain_factorized,
            predicted_class: pool.predicted_class.clone(),
            predicted_probability: pool.predicted_probability,
            binned_confidence: pool.binned_confidence,
            pool_old: pool.pool_old.clone(),
        })
    }
}

impl TryFrom<EnrichedPoolRow> for EnrichedPool {
    type Error = Error;

    fn try_from(row: EnrichedPoolRow) -> Result<Self> {
        Ok(Self {
            timestamp: parse_timestamp(&row.timestamp)?,
            underlying_tokens: serde_json::from_str(&row.underlying_tokens)?,
            reward_tokens: row
                .reward_tokens
                .as_deref()
                .map(serde_json::from_str)
                .transpose()?,
            pool: row.pool,
            project: row.project,
            chain: row.chain,
            symbol: row.symbol,
            pool_meta: row.pool_meta,
            tvl_usd: row.tvl_usd,
            apy: row.apy,
            apy_base: row.apy_base,
            apy_reward: row.apy_reward,
            il_7d: row.il_7d,
            apy_base_7d: row.apy_base_7d,
            volume_usd_1d: row.volume_usd_1d,
            volume_usd_7d: row.volume_usd_7d,
            apy_base_inception: row.apy_base_inception,
            url: row.url,
            apy_pct_1d: row.apy_pct_1d,
            apy_pct_7d: row.apy_pct_7d,
            apy_pct_30d: row.apy_pct_30d,
            apy_mean_30d: row.apy_mean_30d,
            stablecoin: row.stablecoin,
            il_risk: row.il_risk,
            exposure: row.exposure,
            return_value: row.return_value,
            count: row.count,
            apy_mean_expanding: row.apy_mean_expanding,
            apy_std_expanding: row.apy_std_expanding,
            mu: row.mu,
            sigma: row.sigma,
            outlier: row.outlier,
            project_factorized: row.project_factorized,
            chain_factorized: row.chain_factorized,
            predicted_class: row.predicted_class,
            predicted_probability: row.predicted_probability,
            binned_confidence: row.binned_confidence,
            pool_old: row.pool_old,
        })
    }
}

/// Database row for a suggestion (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = yield_suggestions)]
pub struct NewYieldSuggestionRow {
    pub timestamp: String,
    pub insight: String,
    pub is_actionable: bool,
    pub symbol: String,
    pub investment_timeframe: i32,
    pub risk_tolerance: i32,
    pub chain: i32,
    pub project: String,
    pub original_id: String,
    pub data_source: i32,
}

impl From<&NewYieldSuggestion> for NewYieldSuggestionRow {
    fn from(suggestion: &NewYieldSuggestion) -> Self {
        Self {
            timestamp: suggestion.timestamp.to_rfc3339(),
            insight: suggestion.insight.clone(),
            is_actionable: suggestion.is_actionable,
            symbol: suggestion.symbol.clone(),
            investment_timeframe: suggestion.investment_timeframe.as_i32(),
            risk_tolerance: suggestion.risk_tolerance.as_i32(),
            chain: suggestion.chain.as_i32(),
            project: suggestion.project.clone(),
            original_id: suggestion.original_id.clone(),
            data_source: suggestion.data_source.as_i32(),
        }
    }
}

/// Database row for a suggestion (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = yield_suggestions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct YieldSuggestionRow {
    pub id: i32,
    pub timestamp: String,
    pub insight: String,
    pub is_actionable: bool,
    pub symbol: String,
    pub investment_timeframe: i32,
    pub risk_tolerance: i32,
    pub chain: i32,
    pub project: String,
    pub original_id: String,
    pub data_source: i32,
}

impl TryFrom<YieldSuggestionRow> for YieldSuggestion {
    type Error = Error;

    fn try_from(row: YieldSuggestionRow) -> Result<Self> {
        Ok(Self {
            id: row.id,
            timestamp: parse_timestamp(&row.timestamp)?,
            insight: row.insight,
            is_actionable: row.is_actionable,
            symbol: row.symbol,
            investment_timeframe: InvestmentTimeframe::try_from(row.investment_timeframe)?,
            risk_tolerance: RiskTolerance::try_from(row.risk_tolerance)?,
            chain: Chain::try_from(row.chain)?,
            project: row.project,
            original_id: row.original_id,
            data_source: DataSource::try_from(row.data_source)?,
        })
    }
}

/// Database row for a suggestion action (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = yield_actions)]
pub struct NewYieldActionRow {
    pub yield_suggestion_id: i32,
    pub sequence_number: i32,
    pub title: String,
    pub description: String,
    pub action_type: i32,
}

impl From<&NewYieldAction> for NewYieldActionRow {
    fn from(action: &NewYieldAction) -> Self {
        Self {
            yield_suggestion_id: action.suggestion_id,
            sequence_number: action.sequence_number,
            title: action.title.clone(),
            description: action.description.clone(),
            action_type: action.action_type.as_i32(),
        }
    }
}

/// Database row for a suggestion action (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = yield_actions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct YieldActionRow {
    pub id: i32,
    pub yield_suggestion_id: i32,
    pub sequence_number: i32,
    pub title: String,
    pub description: String,
    pub action_type: i32,
}

impl TryFrom<YieldActionRow> for YieldAction {
    type Error = Error;

    fn try_from(row: YieldActionRow) -> Result<Self> {
        Ok(Self {
            id: row.id,
            suggestion_id: row.yield_suggestion_id,
            sequence_number: row.sequence_number,
            title: row.title,
            description: row.description,
            action_type: ActionType::try_from(row.action_type)?,
        })
    }
}

/// Database row for an intent (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = yield_suggestion_intents)]
pub struct NewIntentRow {
    pub wallet_address: String,
    pub yield_suggestion_id: i32,
    pub asset_amount: f64,
    pub status: i32,
}

/// Database row for an intent (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = yield_suggestion_intents)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct IntentRow {
    pub id: i32,
    pub wallet_address: String,
    pub yield_suggestion_id: i32,
    pub asset_amount: f64,
    pub status: i32,
}

impl TryFrom<IntentRow> for YieldSuggestionIntent {
    type Error = Error;

    fn try_from(row: IntentRow) -> Result<Self> {
        Ok(Self {
            id: row.id,
            wallet_address: row.wallet_address,
            suggestion_id: row.yield_suggestion_id,
            asset_amount: row.asset_amount,
            status: IntentStatus::try_from(row.status)?,
        })
    }
}

/// Database row for a ledger entry (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = yield_suggestion_intent_tx_history)]
pub struct NewTxHistoryRow {
    pub wallet_address: String,
    pub yield_suggestion_id: i32,
    pub yield_suggestion_intent_id: i32,
    pub sequence_number: i32,
    pub tx_hash: String,
    pub tx_status: i32,
}

/// Database row for a ledger entry (queryable).
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = yield_suggestion_intent_tx_history)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TxHistoryRow {
    pub id: i32,
    pub wallet_address: String,
    pub yield_suggestion_id: i32,
    pub yield_suggestion_intent_id: i32,
    pub sequence_number: i32,
    pub tx_hash: String,
    pub tx_status: i32,
}

impl TryFrom<TxHistoryRow> for TxHistoryEntry {
    type Error = Error;

    fn try_from(row: TxHistoryRow) -> Result<Self> {
        Ok(Self {
            id: row.id,
            wallet_address: row.wallet_address,
            suggestion_id: row.yield_suggestion_id,
            intent_id: row.yield_suggestion_intent_id,
            sequence_number: row.sequence_number,
            tx_hash: row.tx_hash,
            tx_status: TxStatus::try_from(row.tx_status)?,
        })
    }
}

/// Database row for a catalog interaction.
#[derive(Queryable, Selectable, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = available_interactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InteractionRow {
    pub chain: i32,
    pub project: String,
    pub name: String,
    pub args: String,
}

impl From<&AvailableInteraction> for InteractionRow {
    fn from(interaction: &AvailableInteraction) -> Self {
        Self {
            chain: interaction.chain.as_i32(),
            project: interaction.project.clone(),
            name: interaction.name.clone(),
            args: interaction.args.clone(),
        }
    }
}

impl TryFrom<InteractionRow> for AvailableInteraction {
    type Error = Error;

    fn try_from(row: InteractionRow) -> Result<Self> {
        Ok(Self {
            chain: Chain::try_from(row.chain)?,
            project: row.project,
            name: row.name,
            args: row.args,
        })
    }
}
