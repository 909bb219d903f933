mod support;

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{Duration, Utc};
use yieldscout::adapter::inbound::http::routes::{health_check, intents, pool_yields, suggestions};
use yieldscout::adapter::inbound::http::AppState;
use yieldscout::adapter::outbound::sqlite::{
    SqliteIntentStore, SqliteInteractionStore, SqlitePoolYieldStore, SqliteSuggestionStore,
};
use yieldscout::app::{MappingEngine, Orchestrator, TransactionBuilder};
use yieldscout::domain::{
    Chain, DataSource, InsightInput, InsightOutput, InvestmentTimeframe, NewYieldSuggestion,
    RiskTolerance,
};
use yieldscout::error::{Error, Result};
use yieldscout::port::outbound::InsightGenerator;

use support::data::{make_enriched, make_pool_yield};
use support::db::temp_db;

struct CannedInsight;

#[async_trait]
impl InsightGenerator for CannedInsight {
    async fn generate(&self, input: &InsightInput) -> Result<InsightOutput> {
        Ok(InsightOutput {
            recommended_pools: input.pools.iter().map(|p| p.original_id.clone()).collect(),
            insight: "canned insight".into(),
            actions: vec![],
        })
    }
}

fn make_state() -> (tempfile::TempDir, Arc<AppState>) {
    let (dir, pool) = temp_db();
    let pool_store = Arc::new(SqlitePoolYieldStore::new(pool.clone()));
    let suggestion_store = Arc::new(SqliteSuggestionStore::new(pool.clone()));
    let intent_store = Arc::new(SqliteIntentStore::new(pool.clone()));
    let interaction_store = Arc::new(SqliteInteractionStore::new(pool));

    let orchestrator = Arc::new(Orchestrator::new(
        MappingEngine::new(pool_store.clone()),
        None,
        interaction_store,
        Arc::new(CannedInsight),
        suggestion_store.clone(),
    ));

    let state = Arc::new(AppState {
        pool_yields: pool_store.clone(),
        suggestions: suggestion_store,
        intents: intent_store,
        mapper: MappingEngine::new(pool_store),
        orchestrator,
        tx_builder: TransactionBuilder,
        chain: Chain::Aptos,
        min_tvl_usd: 100_000.0,
        suggestion_lookback: Duration::hours(24),
    });
    (dir, state)
}

async fn seed_qualified_pool(state: &AppState) {
    state
        .pool_yields
        .upsert_pool_yields(&[make_pool_yield(
            "aptos-echelon",
            "APT",
            "echelon",
            8.2,
            500_000.0,
        )])
        .await;
    state
        .pool_yields
        .upsert_enriched_pools(&[make_enriched("aptos-echelon", Some(0.1), 500_000.0)])
        .await;
}

fn make_suggestion() -> NewYieldSuggestion {
    NewYieldSuggestion {
        timestamp: Utc::now(),
        insight: "lend APT on echelon".into(),
        is_actionable: true,
        symbol: "APT".into(),
        investment_timeframe: InvestmentTimeframe::Days30,
        risk_tolerance: RiskTolerance::Low,
        chain: Chain::Aptos,
        project: "echelon".into(),
        original_id: "aptos-echelon".into(),
        data_source: DataSource::Defillama,
    }
}

#[tokio::test]
async fn health_check_reports_running() {
    let Json(body) = health_check().await;
    assert_eq!(body["message"], "API is running");
}

#[tokio::test]
async fn top_lists_pools_above_the_floor() {
    let (_dir, state) = make_state();
    seed_qualified_pool(&state).await;
    state
        .pool_yields
        .upsert_pool_yields(&[make_pool_yield(
            "aptos-tiny",
            "APT",
            "tinyproj",
            400.0,
            50.0,
        )])
        .await;

    let Json(pools) = pool_yields::top(State(state), Query(pool_yields::TopQuery { limit: None }))
        .await
        .unwrap();
    assert_eq!(pools.len(), 1);
    assert_eq!(pools[0].original_id, "aptos-echelon");
}

#[tokio::test]
async fn top_rejects_non_positive_limits() {
    let (_dir, state) = make_state();
    let err = pool_yields::top(State(state), Query(pool_yields::TopQuery { limit: Some(0) }))
        .await
        .unwrap_err();
    assert!(matches!(err.0, Error::InvalidInput(_)));
}

#[tokio::test]
async fn suggest_returns_qualified_pools() {
    let (_dir, state) = make_state();
    seed_qualified_pool(&state).await;

    let query = pool_yields::SuggestQuery {
        risk_tolerance: "LOW".into(),
        asset: "APT".into(),
        asset_value_usd: 100.0,
        investment_timeframe: 30,
        max_drawdown: None,
    };
    let Json(pools) = pool_yields::suggest(State(state), Query(query)).await.unwrap();
    assert_eq!(pools.len(), 1);
    assert_eq!(pools[0].project, "echelon");
}

#[tokio::test]
async fn suggest_rejects_unknown_risk_tolerance() {
    let (_dir, state) = make_state();
    let query = pool_yields::SuggestQuery {
        risk_tolerance: "AGGRESSIVE".into(),
        asset: "APT".into(),
        asset_value_usd: 100.0,
        investment_timeframe: 30,
        max_drawdown: None,
    };
    let err = pool_yields::suggest(State(state), Query(query)).await.unwrap_err();
    assert!(matches!(err.0, Error::InvalidInput(_)));
}

#[tokio::test]
async fn suggestion_by_id_returns_404_when_missing() {
    let (_dir, state) = make_state();
    let err = suggestions::by_id(State(state), Path(99)).await.unwrap_err();
    assert!(matches!(err.0, Error::NotFound(_)));
}

#[tokio::test]
async fn posting_preferences_runs_the_pipeline() {
    let (_dir, state) = make_state();
    seed_qualified_pool(&state).await;

    let request = suggestions::SuggestionRequest {
        chain: None,
        risk_tolerance: "LOW".into(),
        max_drawdown: 0.1,
        capital_size: 100.0,
        investment_timeframe: 30,
        asset_symbol: "APT".into(),
    };
    let Json(output) = suggestions::create(State(state.clone()), Json(request))
        .await
        .unwrap();
    assert_eq!(output.recommended_pools, vec!["aptos-echelon".to_string()]);
    assert_eq!(output.insight, "canned insight");

    let Json(listed) = suggestions::list(State(state)).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].insight, "canned insight");
}

#[tokio::test]
async fn intent_flow_builds_payload_and_appends_ledger_rows() {
    let (_dir, state) = make_state();
    let suggestion = state
        .suggestions
        .insert_suggestion(&make_suggestion())
        .await
        .unwrap();

    let request = intents::CreateIntentRequest {
        wallet_address: "0xwallet".into(),
        asset_amount: 25.0,
    };
    let Json(created) = intents::create_intent(
        State(state.clone()),
        Path(suggestion.id),
        Json(request),
    )
    .await
    .unwrap();
    assert_eq!(created.intent.suggestion_id, suggestion.id);
    assert_eq!(created.payload.function, "0x1::echelon::stake");

    let submit = intents::SubmitSignedTransactionRequest {
        tx_hash: "0xhash1".into(),
    };
    let Json(entry) = intents::submit_signed_transaction(
        State(state),
        Path(created.intent.id),
        Json(submit),
    )
    .await
    .unwrap();
    assert_eq!(entry.sequence_number, 1);
    assert_eq!(entry.tx_hash, "0xhash1");
}

#[tokio::test]
async fn create_intent_rejects_missing_suggestions() {
    let (_dir, state) = make_state();
    let request = intents::CreateIntentRequest {
        wallet_address: "0xwallet".into(),
        asset_amount: 25.0,
    };
    let err = intents::create_intent(State(state), Path(42), Json(request))
        .await
        .unwrap_err();
    assert!(matches!(err.0, Error::NotFound(_)));
}
