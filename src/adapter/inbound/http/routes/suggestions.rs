use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::super::{ApiError, AppState};
use crate::domain::{
    Chain, InsightOutput, InvestmentTimeframe, RiskTolerance, UserPreferences, YieldAction,
    YieldSuggestion,
};
use crate::error::Error;

/// GET /api/v1/yield_suggestions — latest suggestion per
/// (symbol, risk tolerance, timeframe) within the lookback window.
pub async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<YieldSuggestion>>, ApiError> {
    let rows = state
        .suggestions
        .latest_suggestions(state.suggestion_lookback)
        .await?;
    Ok(Json(rows))
}

#[derive(Debug, Serialize)]
pub struct SuggestionWithActions {
    #[serde(flatten)]
    pub suggestion: YieldSuggestion,
    pub actions: Vec<YieldAction>,
}

/// GET /api/v1/yield_suggestions/{id} — one suggestion with its actions.
pub async fn by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<SuggestionWithActions>, ApiError> {
    let suggestion = state
        .suggestions
        .suggestion(id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("yield suggestion {id}")))?;
    let actions = state.suggestions.actions_by_suggestion(id).await?;
    Ok(Json(SuggestionWithActions {
        suggestion,
        actions,
    }))
}

#[derive(Deserialize)]
pub struct SuggestionRequest {
    pub chain: Option<Chain>,
    #[serde(rename = "riskTolerance")]
    pub risk_tolerance: String,
    #[serde(rename = "maxDrawdown")]
    pub max_drawdown: f64,
    #[serde(rename = "capitalSize")]
    pub capital_size: f64,
    #[serde(rename = "investmentTimeframe")]
    pub investment_timeframe: i32,
    #[serde(rename = "assetSymbol")]
    pub asset_symbol: String,
}

/// POST /api/v1/yield_suggestions — run the suggestion pipeline.
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SuggestionRequest>,
) -> Result<Json<InsightOutput>, ApiError> {
    if request.capital_size <= 0.0 {
        return Err(ApiError(Error::InvalidInput(
            "capitalSize must be positive".into(),
        )));
    }

    let preferences = UserPreferences {
        chain: request.chain.unwrap_or(state.chain),
        risk_tolerance: request.risk_tolerance.parse::<RiskTolerance>()?,
        max_drawdown: request.max_drawdown,
        capital_size: request.capital_size,
        investment_timeframe: InvestmentTimeframe::try_from(request.investment_timeframe)?,
        asset_symbol: request.asset_symbol,
    };

    let output = state.orchestrator.run(&preferences).await?;
    Ok(Json(output))
}
