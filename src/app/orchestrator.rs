//! Suggestion pipeline orchestration.
//!
//! Fans out to the qualification mapper, the sentiment signal, and the
//! interaction catalog, then hands the assembled context to the insight
//! generator. Any sub-step failure aborts the whole call with one wrapped
//! pipeline error; a partial recommendation without pools or sentiment is
//! not meaningful to the caller.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::app::mapper::MappingEngine;
use crate::domain::{
    DataSource, InsightInput, InsightOutput, NewYieldSuggestion, UserPreferences,
};
use crate::error::{Error, Result};
use crate::port::outbound::store::{InteractionStore, SuggestionStore};
use crate::port::outbound::{InsightGenerator, SentimentSource};

/// Composes the suggestion-producing pipeline.
pub struct Orchestrator {
    mapper: MappingEngine,
    sentiment: Option<Arc<dyn SentimentSource>>,
    interactions: Arc<dyn InteractionStore>,
    insight: Arc<dyn InsightGenerator>,
    suggestions: Arc<dyn SuggestionStore>,
}

impl Orchestrator {
    #[must_use]
    pub fn new(
        mapper: MappingEngine,
        sentiment: Option<Arc<dyn SentimentSource>>,
        interactions: Arc<dyn InteractionStore>,
        insight: Arc<dyn InsightGenerator>,
        suggestions: Arc<dyn SuggestionStore>,
    ) -> Self {
        Self {
            mapper,
            sentiment,
            interactions,
            insight,
            suggestions,
        }
    }

    /// Run the full pipeline for one set of preferences and return the
    /// generator's structured output verbatim. A suggestion row is
    /// recorded for the best qualified pool as part of the same call.
    ///
    /// # Errors
    ///
    /// Any sub-step failure returns [`Error::Pipeline`].
    pub async fn run(&self, preferences: &UserPreferences) -> Result<InsightOutput> {
        self.run_inner(preferences)
            .await
            .map_err(|err| Error::Pipeline(err.to_string()))
    }

    async fn run_inner(&self, preferences: &UserPreferences) -> Result<InsightOutput> {
        let (pools, sentiment, contracts) = tokio::try_join!(
            self.mapper.qualified_pools(preferences),
            self.market_sentiment(),
            self.interactions.interactions(preferences.chain),
        )?;

        info!(
            pools = pools.len(),
            sentiment = sentiment.as_deref().unwrap_or("disabled"),
            contracts = contracts.len(),
            "assembled insight input"
        );

        let input = InsightInput {
            preferences: preferences.clone(),
            pools: pools.clone(),
            sentiment,
            contracts,
        };
        let output = self.insight.generate(&input).await?;

        if let Some(best) = pools.first() {
            let suggestion = NewYieldSuggestion {
                timestamp: Utc::now(),
                insight: output.insight.clone(),
                is_actionable: !output.actions.is_empty(),
                symbol: best.symbol.clone(),
                investment_timeframe: preferences.investment_timeframe,
                risk_tolerance: preferences.risk_tolerance,
                chain: best.chain,
                project: best.project.clone(),
                original_id: best.original_id.clone(),
                data_source: DataSource::Defillama,
            };
            self.suggestions.insert_suggestion(&suggestion).await?;
        } else {
            warn!("no qualified pools; returning insight without recording a suggestion");
        }

        Ok(output)
    }

    async fn market_sentiment(&self) -> Result<Option<String>> {
        match &self.sentiment {
            Some(source) => source.market_sentiment().await.map(Some),
            None => Ok(None),
        }
    }
}
