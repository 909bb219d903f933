mod support;

use std::sync::Arc;

use yieldscout::adapter::outbound::sqlite::SqlitePoolYieldStore;
use yieldscout::adapter::outbound::sqlite::SqliteSuggestionStore;
use yieldscout::app::config::CollectorConfig;
use yieldscout::app::Collector;
use yieldscout::domain::{Chain, RiskTolerance};
use yieldscout::port::outbound::store::{PoolYieldStore, QualifiedPoolQuery};

use support::data::{make_enriched, make_pool_yield};
use support::db::temp_db;
use support::source::ScriptedSource;

fn collector_with(
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
async fn ingestion_surfaces_only_pools_above_the_tvl_floor() {
    let (_dir, pool) = temp_db();
    let pool_store = Arc::new(SqlitePoolYieldStore::new(pool.clone()));
    let suggestion_store = Arc::new(SqliteSuggestionStore::new(pool));

    let source = ScriptedSource::with_yields(vec![
        make_pool_yield("aptos-echelon", "APT", "echelon", 8.2, 500_000.0),
        make_pool_yield("aptos-random", "APT", "randomproj", 400.0, 50.0),
    ]);
    let collector = collector_with(source, pool_store.clone(), suggestion_store);

    let written = collector.update_pool_yields().await;
    assert_eq!(written, 2);

    let top = pool_store
        .top_apy_pool_yields(Chain::Aptos, 100_000.0, 5)
        .await
        .unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].original_id, "aptos-echelon");
    assert_eq!(top[0].project, "echelon");
}

#[tokio::test]
async fn failed_fetch_leaves_prior_rows_untouched() {
    let (_dir, pool) = temp_db();
    let pool_store = Arc::new(SqlitePoolYieldStore::new(pool.clone()));
    let suggestion_store = Arc::new(SqliteSuggestionStore::new(pool));

    let seeded = pool_store
        .upsert_pool_yields(&[make_pool_yield(
            "aptos-echelon",
            "APT",
            "echelon",
            8.2,
            500_000.0,
        )])
        .await;
    assert_eq!(seeded, 1);

    let collector = collector_with(
        ScriptedSource::failing(),
        pool_store.clone(),
        suggestion_store,
    );
    collector.run_once().await;

    let top = pool_store
        .top_apy_pool_yields(Chain::Aptos, 100_000.0, 5)
        .await
        .unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].original_id, "aptos-echelon");
}

#[tokio::test]
async fn enrichment_feeds_the_qualification_query() {
    let (_dir, pool) = temp_db();
    let pool_store = Arc::new(SqlitePoolYieldStore::new(pool.clone()));
    let suggestion_store = Arc::new(SqliteSuggestionStore::new(pool));

    let mut source = ScriptedSource::with_yields(vec![make_pool_yield(
        "aptos-echelon",
        "APT",
        "echelon",
        8.2,
        500_000.0,
    )]);
    source.enriched.insert(
        "aptos-echelon".into(),
        make_enriched("aptos-echelon", Some(0.1), 500_000.0),
    );

    let collector = collector_with(source, pool_store.clone(), suggestion_store);
    collector.update_pool_yields().await;
    let enriched = collector.update_enriched_pools().await;
    assert_eq!(enriched, 1);

    let qualified = pool_store
        .qualified_pool_yields(&QualifiedPoolQuery {
            chain: Chain::Aptos,
            risk_tolerance: RiskTolerance::Low,
            max_drawdown: 0.1,
            asset_symbol: "APT".into(),
            asset_value_usd: 100.0,
            investment_timeframe_days: 30,
            limit: 5,
        })
        .await
        .unwrap();
    assert_eq!(qualified.len(), 1);
    assert_eq!(qualified[0].original_id, "aptos-echelon");
}
