//! Process wiring: pool, stores, clients, collector, HTTP server.

use std::sync::Arc;

use chrono::Duration;
use tracing::{info, warn};

use crate::adapter::inbound::http::{build_router, AppState};
use crate::adapter::outbound::defillama::DefiLlamaClient;
use crate::adapter::outbound::insight::LlmInsightGenerator;
use crate::adapter::outbound::llm::{Anthropic, OpenRouter};
use crate::adapter::outbound::sentiment::NewsSentiment;
use crate::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations};
use crate::adapter::outbound::sqlite::{
    SqliteIntentStore, SqliteInteractionStore, SqlitePoolYieldStore, SqliteSuggestionStore,
};
use crate::app::config::{Config, LlmConfig, LlmProvider, SentimentConfig};
use crate::app::collector::Collector;
use crate::app::mapper::MappingEngine;
use crate::app::orchestrator::Orchestrator;
use crate::app::txbuilder::TransactionBuilder;
use crate::domain::{AvailableInteraction, Chain};
use crate::error::Result;
use crate::port::outbound::store::InteractionStore;
use crate::port::outbound::{Llm, SentimentSource};

pub struct App;

impl App {
    /// Run the service until the server exits.
    ///
    /// # Errors
    ///
    /// Returns an error on any startup failure: pool creation, migrations,
    /// missing LLM credentials, or a port that cannot be bound. Callers
    /// treat these as fatal.
    pub async fn run(config: Config) -> Result<()> {
        let pool = create_pool(&config.database.url)?;
        run_migrations(&pool)?;
        info!(url = %config.database.url, "database ready");

        let pool_store = Arc::new(SqlitePoolYieldStore::new(pool.clone()));
        let suggestion_store = Arc::new(SqliteSuggestionStore::new(pool.clone()));
        let intent_store = Arc::new(SqliteIntentStore::new(pool.clone()));
        let interaction_store = Arc::new(SqliteInteractionStore::new(pool));

        seed_interactions(interaction_store.as_ref()).await?;

        let source = Arc::new(DefiLlamaClient::new()?);
        let collector = Collector::new(
            source,
            pool_store.clone(),
            suggestion_store.clone(),
            config.collector.clone(),
        );
        tokio::spawn(async move { collector.run().await });

        let llm = build_llm(&config.llm)?;
        info!(provider = llm.name(), "llm client ready");
        let insight = Arc::new(LlmInsightGenerator::new(llm));
        let sentiment = build_sentiment(&config.sentiment);

        let orchestrator = Arc::new(Orchestrator::new(
            MappingEngine::new(pool_store.clone()),
            sentiment,
            interaction_store,
            insight,
            suggestion_store.clone(),
        ));

        let state = Arc::new(AppState {
            pool_yields: pool_store.clone(),
            suggestions: suggestion_store,
            intents: intent_store,
            mapper: MappingEngine::new(pool_store),
            orchestrator,
            tx_builder: TransactionBuilder,
            chain: config.collector.chain,
            min_tvl_usd: config.collector.min_tvl_usd,
            suggestion_lookback: Duration::hours(config.collector.action_lookback_hours),
        });

        let router = build_router(state);
        let listener = tokio::net::TcpListener::bind(&config.server.listen_addr).await?;
        info!(addr = %config.server.listen_addr, "listening");
        axum::serve(listener, router).await?;

        Ok(())
    }
}

fn build_llm(config: &LlmConfig) -> Result<Arc<dyn Llm>> {
    match config.provider {
        LlmProvider::Anthropic => {
            let anthropic = &config.anthropic;
            Ok(Arc::new(Anthropic::from_env(
                anthropic.model.clone(),
                anthropic.max_tokens,
                anthropic.temperature,
            )?))
        }
        LlmProvider::OpenRouter => {
            let openrouter = &config.openrouter;
            Ok(Arc::new(OpenRouter::from_env(
                openrouter.model.clone(),
                openrouter.max_tokens,
                openrouter.temperature,
            )?))
        }
    }
}

fn build_sentiment(config: &SentimentConfig) -> Option<Arc<dyn SentimentSource>> {
    if !config.enabled {
        return None;
    }
    match (&config.cryptopanic_api_key, &config.huggingface_api_key) {
        (Some(cryptopanic), Some(huggingface)) => Some(Arc::new(NewsSentiment::new(
            reqwest::Client::new(),
            cryptopanic.clone(),
            huggingface.clone(),
        ))),
        _ => {
            warn!("sentiment enabled but API keys are not set; running without it");
            None
        }
    }
}

/// Idempotent startup seed of the interactions the service can build
/// transactions for. Kept in step with
/// [`ActionCatalog`](crate::app::actions::ActionCatalog).
async fn seed_interactions(store: &dyn InteractionStore) -> Result<()> {
    let seeds = [
        AvailableInteraction {
            chain: Chain::Aptos,
            project: "echelon".into(),
            name: "lend".into(),
            args: r#"{"amount":"u64"}"#.into(),
        },
        AvailableInteraction {
            chain: Chain::Aptos,
            project: "amnis".into(),
            name: "stake".into(),
            args: r#"{"amount":"u64"}"#.into(),
        },
    ];
    store.upsert_interactions(&seeds).await?;
    Ok(())
}
