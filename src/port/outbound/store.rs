//! Persistence ports for pool yields, suggestions, intents, and the
//! interaction catalog.

use async_trait::async_trait;
use chrono::Duration;

use crate::domain::{
    AvailableInteraction, Chain, EnrichedPool, NewYieldAction, NewYieldSuggestion, PoolYield,
    RiskTolerance, TxHistoryEntry, TxStatus, YieldAction, YieldSuggestion, YieldSuggestionIntent,
};
use crate::error::Result;

/// Parameters for the risk-tiered qualification query.
#[derive(Debug, Clone)]
pub struct QualifiedPoolQuery {
    pub chain: Chain,
    pub risk_tolerance: RiskTolerance,
    /// Reserved for future filtering; carried through unchanged.
    pub max_drawdown: f64,
    /// Case-sensitive substring match against the pool symbol.
    pub asset_symbol: String,
    pub asset_value_usd: f64,
    /// Reserved for future filtering; carried through unchanged.
    pub investment_timeframe_days: i32,
    pub limit: i64,
}

/// Storage operations for pool-yield observations and enriched metadata.
///
/// The upsert methods are best-effort: ingestion never crashes on a flaky
/// cycle, so failures are logged and reported as 0 rows upserted rather
/// than propagated.
#[async_trait]
pub trait PoolYieldStore: Send + Sync {
    /// Upsert a batch of pool yields keyed by `(original_id, data_source)`.
    /// Returns the number of rows written; 0 on empty input or failure.
    async fn upsert_pool_yields(&self, yields: &[PoolYield]) -> usize;

    /// Upsert a batch of enriched pools keyed by `pool`.
    /// Returns the number of rows written; 0 on empty input or failure.
    async fn upsert_enriched_pools(&self, pools: &[EnrichedPool]) -> usize;

    /// Pools with `apy > 0` and `tvl_usd > min_tvl_usd`, highest APY first.
    async fn top_apy_pool_yields(
        &self,
        chain: Chain,
        min_tvl_usd: f64,
        limit: i64,
    ) -> Result<Vec<PoolYield>>;

    /// Risk-tiered qualification query joining yields to enriched sigma.
    async fn qualified_pool_yields(&self, query: &QualifiedPoolQuery) -> Result<Vec<PoolYield>>;

    /// One row per distinct symbol: the highest-APY pool among `apy > 0`.
    async fn best_pool_yield_by_asset(&self, chain: Chain) -> Result<Vec<PoolYield>>;
}

/// Storage operations for suggestions and their actions.
#[async_trait]
pub trait SuggestionStore: Send + Sync {
    /// Persist a suggestion and return it with its generated id.
    async fn insert_suggestion(&self, suggestion: &NewYieldSuggestion) -> Result<YieldSuggestion>;

    /// All suggestions, unfiltered.
    async fn suggestions(&self) -> Result<Vec<YieldSuggestion>>;

    /// A single suggestion by id, or `None`.
    async fn suggestion(&self, id: i32) -> Result<Option<YieldSuggestion>>;

    /// Most-recent suggestion per `(symbol, risk_tolerance,
    /// investment_timeframe)` within the lookback window.
    async fn latest_suggestions(&self, lookback: Duration) -> Result<Vec<YieldSuggestion>>;

    /// Append actions to their suggestions. Returns rows inserted.
    async fn insert_actions(&self, actions: &[NewYieldAction]) -> Result<usize>;

    /// Actions for a suggestion, ordered by sequence number.
    async fn actions_by_suggestion(&self, suggestion_id: i32) -> Result<Vec<YieldAction>>;
}

/// Storage operations for intents and their transaction ledger.
#[async_trait]
pub trait IntentStore: Send + Sync {
    /// Create an intent in status `New` and return it with its id.
    async fn create_intent(
        &self,
        suggestion: &YieldSuggestion,
        wallet_address: &str,
        asset_amount: f64,
    ) -> Result<YieldSuggestionIntent>;

    /// A single intent by id, or `None`.
    async fn intent(&self, id: i32) -> Result<Option<YieldSuggestionIntent>>;

    /// Intents belonging to a wallet.
    async fn intents_by_wallet(
        &self,
        wallet_address: &str,
        limit: i64,
    ) -> Result<Vec<YieldSuggestionIntent>>;

    /// Next sequence number for the intent's ledger: max existing + 1,
    /// starting at 1 when no history rows exist.
    async fn current_sequence_number(&self, intent: &YieldSuggestionIntent) -> Result<i32>;

    /// Append one ledger row. Rows are never mutated in place.
    async fn insert_tx_history(
        &self,
        intent: &YieldSuggestionIntent,
        sequence_number: i32,
        tx_hash: &str,
        tx_status: TxStatus,
    ) -> Result<TxHistoryEntry>;

    /// Full ledger for a wallet across all intents.
    async fn tx_history_by_wallet(&self, wallet_address: &str) -> Result<Vec<TxHistoryEntry>>;
}

/// Storage operations for the interaction catalog.
#[async_trait]
pub trait InteractionStore: Send + Sync {
    /// Idempotent upsert keyed by `(chain, project, name)`.
    async fn upsert_interactions(&self, interactions: &[AvailableInteraction]) -> Result<usize>;

    /// All interactions on a chain.
    async fn interactions(&self, chain: Chain) -> Result<Vec<AvailableInteraction>>;

    /// Interactions for one project on a chain.
    async fn interactions_by_project(
        &self,
        chain: Chain,
        project: &str,
    ) -> Result<Vec<AvailableInteraction>>;
}
