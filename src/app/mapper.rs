//! Mapping from user preferences to qualified pools.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{PoolYield, UserPreferences};
use crate::error::Result;
use crate::port::outbound::store::{PoolYieldStore, QualifiedPoolQuery};

const DEFAULT_LIMIT: i64 = 5;

/// Translates a user's preferences into the store-level qualification
/// query.
pub struct MappingEngine {
    store: Arc<dyn PoolYieldStore>,
}

impl MappingEngine {
    #[must_use]
    pub fn new(store: Arc<dyn PoolYieldStore>) -> Self {
        Self { store }
    }

    /// Qualified pools for the given preferences, capped at the default
    /// limit.
    ///
    /// # Errors
    ///
    /// Returns an error if the store query fails.
    pub async fn qualified_pools(&self, preferences: &UserPreferences) -> Result<Vec<PoolYield>> {
        let query = QualifiedPoolQuery {
            chain: preferences.chain,
            risk_tolerance: preferences.risk_tolerance,
            max_drawdown: preferences.max_drawdown,
            asset_symbol: preferences.asset_symbol.clone(),
            asset_value_usd: preferences.capital_size,
            investment_timeframe_days: preferences.investment_timeframe.as_i32(),
            limit: DEFAULT_LIMIT,
        };

        let pools = self.store.qualified_pool_yields(&query).await?;
        debug!(
            count = pools.len(),
            risk = ?preferences.risk_tolerance,
            "mapped preferences to qualified pools"
        );
        Ok(pools)
    }
}
