//! Periodic data collection.
//!
//! Pulls pool yields and enriched metadata from the aggregator on
//! wall-clock-aligned intervals and derives actions for fresh
//! suggestions. Every sub-step failure is isolated: a bad cycle logs and
//! leaves previously stored data untouched.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use futures_util::future::join_all;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{error, info, warn};

use crate::app::actions::ActionCatalog;
use crate::app::config::CollectorConfig;
use crate::domain::EnrichedPool;
use crate::error::Result;
use crate::port::outbound::store::{PoolYieldStore, SuggestionStore};
use crate::port::outbound::YieldSource;

/// Periodic collector over one chain.
pub struct Collector {
    source: Arc<dyn YieldSource>,
    pool_store: Arc<dyn PoolYieldStore>,
    suggestion_store: Arc<dyn SuggestionStore>,
    catalog: ActionCatalog,
    config: CollectorConfig,
}

impl Collector {
    #[must_use]
    pub fn new(
        source: Arc<dyn YieldSource>,
        pool_store: Arc<dyn PoolYieldStore>,
        suggestion_store: Arc<dyn SuggestionStore>,
        config: CollectorConfig,
    ) -> Self {
        Self {
            source,
            pool_store,
            suggestion_store,
            catalog: ActionCatalog::default(),
            config,
        }
    }

    /// Fetch and upsert the current pool-yield snapshot.
    pub async fn update_pool_yields(&self) -> usize {
        let yields = self.source.fetch_pool_yields(&[self.config.chain]).await;
        if yields.is_empty() {
            warn!(chain = ?self.config.chain, "no pool yields fetched this cycle");
            return 0;
        }
        let written = self.pool_store.upsert_pool_yields(&yields).await;
        info!(fetched = yields.len(), written, "updated pool yields");
        written
    }

    /// Enrich the current top pools above the TVL floor.
    pub async fn update_enriched_pools(&self) -> usize {
        let top = match self
            .pool_store
            .top_apy_pool_yields(
                self.config.chain,
                self.config.min_tvl_usd,
                self.config.enrich_top_n,
            )
            .await
        {
            Ok(top) => top,
            Err(err) => {
                error!(error = %err, "failed to load top pools for enrichment");
                return 0;
            }
        };

        let fetches = top
            .iter()
            .map(|pool_yield| self.source.fetch_enriched_pool(&pool_yield.original_id));
        let enriched: Vec<EnrichedPool> = join_all(fetches)
            .await
            .into_iter()
            .flatten()
            .collect();

        let written = self.pool_store.upsert_enriched_pools(&enriched).await;
        info!(
            candidates = top.len(),
            enriched = enriched.len(),
            written,
            "updated enriched pools"
        );
        written
    }

    /// Derive and persist actions for recent suggestions that have none
    /// yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the latest-suggestion query fails; per-
    /// suggestion persistence failures are logged and skipped.
    pub async fn update_yield_actions(&self) -> Result<usize> {
        let lookback = Duration::hours(self.config.action_lookback_hours);
        let latest = self.suggestion_store.latest_suggestions(lookback).await?;

        let mut written = 0;
        for suggestion in &latest {
            match self
                .suggestion_store
                .actions_by_suggestion(suggestion.id)
                .await
            {
                Ok(existing) if !existing.is_empty() => continue,
                Ok(_) => {}
                Err(err) => {
                    warn!(suggestion_id = suggestion.id, error = %err, "failed to load existing actions");
                    continue;
                }
            }

            let actions = self.catalog.derive(suggestion);
            if actions.is_empty() {
                continue;
            }
            match self.suggestion_store.insert_actions(&actions).await {
                Ok(count) => written += count,
                Err(err) => {
                    warn!(suggestion_id = suggestion.id, error = %err, "failed to persist derived actions");
                }
            }
        }

        if written > 0 {
            info!(written, "derived yield actions");
        }
        Ok(written)
    }

    /// One full collection cycle. Sub-step failures are logged, never
    /// propagated.
    pub async fn run_once(&self) {
        self.update_pool_yields().await;
        self.update_enriched_pools().await;
        if let Err(err) = self.update_yield_actions().await {
            error!(error = %err, "action derivation cycle failed");
        }
    }

    /// Run forever on the configured intervals.
    pub async fn run(&self) {
        let mut yield_ticks = aligned_interval(StdDuration::from_secs(
            self.config.yield_interval_secs,
        ));
        let mut enrich_ticks = aligned_interval(StdDuration::from_secs(
            self.config.enrich_interval_secs,
        ));

        info!(
            chain = ?self.config.chain,
            yield_interval_secs = self.config.yield_interval_secs,
            enrich_interval_secs = self.config.enrich_interval_secs,
            "collector started"
        );

        loop {
            tokio::select! {
                _ = yield_ticks.tick() => {
                    self.update_pool_yields().await;
                    if let Err(err) = self.update_yield_actions().await {
                        error!(error = %err, "action derivation cycle failed");
                    }
                }
                _ = enrich_ticks.tick() => {
                    self.update_enriched_pools().await;
                }
            }
        }
    }
}

/// Interval aligned to the next wall-clock multiple of `period`, skipping
/// missed ticks instead of bursting.
fn aligned_interval(period: StdDuration) -> Interval {
    let period_ms = i64::try_from(period.as_millis()).unwrap_or(i64::MAX).max(1);
    let since_epoch_ms = Utc::now().timestamp_millis();
    let delay_ms = period_ms - since_epoch_ms.rem_euclid(period_ms);

    let start = Instant::now() + StdDuration::from_millis(delay_ms.unsigned_abs());
    let mut interval = interval_at(start, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::sqlite::testutil::test_pool;
    use crate::adapter::outbound::sqlite::{SqlitePoolYieldStore, SqliteSuggestionStore};
    use crate::domain::{
        Chain, DataSource, InvestmentTimeframe, NewYieldSuggestion, PoolYield, RiskTolerance,
    };
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct ScriptedSource {
        yields: Vec<PoolYield>,
        enriched: HashMap<String, EnrichedPool>,
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

    fn sample_yield(original_id: &str, project: &str, apy: f64, tvl_usd: f64) -> PoolYield {
        PoolYield {
            original_id: original_id.into(),
            data_source: DataSource::Defillama,
            chain: Chain::Aptos,
            symbol: "APT".into(),
            project: project.into(),
            apy,
            apy_base: None,
            apy_base_7d: None,
            apy_mean_30d: None,
            apy_pct_1d: None,
            apy_pct_7d: None,
            apy_pct_30d: None,
            tvl_usd,
        }
    }

    fn collector(
        source: ScriptedSource,
        pool_store: Arc<SqlitePoolYieldStore>,
        suggestion_store: Arc<SqliteSuggestionStore>,
    ) -> Collector {
        Collector::new(
            Arc::new(source),
            pool_store,
            suggestion_store,
            CollectorConfig::default(),
        )
    }

    #[tokio::test]
    async fn pool_yield_cycle_persists_fetched_rows() {
        let (_dir, pool) = test_pool();
        let pool_store = Arc::new(SqlitePoolYieldStore::new(pool.clone()));
        let suggestion_store = Arc::new(SqliteSuggestionStore::new(pool));

        let source = ScriptedSource {
            yields: vec![
                sample_yield("pool-1", "echelon", 8.0, 500_000.0),
                sample_yield("pool-2", "amnis", 4.0, 900_000.0),
            ],
            enriched: HashMap::new(),
        };
        let collector = collector(source, pool_store.clone(), suggestion_store);

        assert_eq!(collector.update_pool_yields().await, 2);
        let stored = pool_store
            .top_apy_pool_yields(Chain::Aptos, 0.0, 10)
            .await
            .unwrap();
        assert_eq!(stored.len(), 2);
    }

    #[tokio::test]
    async fn failed_fetch_leaves_prior_rows_untouched() {
        let (_dir, pool) = test_pool();
        let pool_store = Arc::new(SqlitePoolYieldStore::new(pool.clone()));
        let suggestion_store = Arc::new(SqliteSuggestionStore::new(pool));

        pool_store
            .upsert_pool_yields(&[sample_yield("pool-1", "echelon", 8.0, 500_000.0)])
            .await;

        let source = ScriptedSource {
            yields: vec![],
            enriched: HashMap::new(),
        };
        let collector = collector(source, pool_store.clone(), suggestion_store);
        collector.run_once().await;

        let stored = pool_store
            .top_apy_pool_yields(Chain::Aptos, 0.0, 10)
            .await
            .unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[tokio::test]
    async fn enrichment_targets_top_pools_only() {
        let (_dir, pool) = test_pool();
        let pool_store = Arc::new(SqlitePoolYieldStore::new(pool.clone()));
        let suggestion_store = Arc::new(SqliteSuggestionStore::new(pool));

        pool_store
            .upsert_pool_yields(&[
                sample_yield("big", "echelon", 8.0, 500_000.0),
                sample_yield("small", "amnis", 9.0, 10_000.0),
            ])
            .await;

        let mut enriched = HashMap::new();
        for id in ["big", "small"] {
            let record =
                crate::adapter::outbound::defillama::dto::RawEnrichedPool {
                    pool: id.into(),
                    timestamp: Some(Utc::now()),
                    project: "echelon".into(),
                    chain: "Aptos".into(),
                    symbol: "APT".into(),
                    pool_meta: None,
                    underlying_tokens: None,
                    reward_tokens: None,
                    tvl_usd: 500_000.0,
                    apy: 8.0,
                    apy_base: None,
                    apy_reward: None,
                    il_7d: None,
                    apy_base_7d: None,
                    volume_usd_1d: None,
                    volume_usd_7d: None,
                    apy_base_inception: None,
                    url: None,
                    apy_pct_1d: None,
                    apy_pct_7d: None,
                    apy_pct_30d: None,
                    apy_mean_30d: None,
                    stablecoin: false,
                    il_risk: "no".into(),
                    exposure: "single".into(),
                    return_value: None,
                    count: None,
                    apy_mean_expanding: None,
                    apy_std_expanding: None,
                    mu: None,
                    sigma: Some(0.1),
                    outlier: false,
                    project_factorized: None,
                    chain_factorized: None,
                    predictions: Default::default(),
                    pool_old: None,
                };
            enriched.insert(id.to_string(), record.into());
        }

        let source = ScriptedSource {
            yields: vec![],
            enriched,
        };
        let collector = collector(source, pool_store.clone(), suggestion_store);

        // "small" sits below the TVL floor, so only "big" gets enriched.
        assert_eq!(collector.update_enriched_pools().await, 1);
    }

    #[tokio::test]
    async fn action_derivation_runs_once_per_suggestion() {
        let (_dir, pool) = test_pool();
        let pool_store = Arc::new(SqlitePoolYieldStore::new(pool.clone()));
        let suggestion_store = Arc::new(SqliteSuggestionStore::new(pool));

        let suggestion = suggestion_store
            .insert_suggestion(&NewYieldSuggestion {
                timestamp: Utc::now(),
                insight: "stake it".into(),
                is_actionable: true,
                symbol: "APT".into(),
                investment_timeframe: InvestmentTimeframe::Days30,
                risk_tolerance: RiskTolerance::Low,
                chain: Chain::Aptos,
                project: "echelon".into(),
                original_id: "pool-1".into(),
                data_source: DataSource::Defillama,
            })
            .await
            .unwrap();

        let source = ScriptedSource {
            yields: vec![],
            enriched: HashMap::new(),
        };
        let collector = collector(source, pool_store, suggestion_store.clone());

        assert_eq!(collector.update_yield_actions().await.unwrap(), 1);
        assert_eq!(collector.update_yield_actions().await.unwrap(), 0);

        let actions = suggestion_store
            .actions_by_suggestion(suggestion.id)
            .await
            .unwrap();
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].title, "lend");
    }
}
