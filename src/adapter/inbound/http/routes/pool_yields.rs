use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use super::super::{ApiError, AppState};
use crate::domain::{InvestmentTimeframe, PoolYield, RiskTolerance, UserPreferences};

const DEFAULT_LIMIT: i64 = 5;

/// Drawdown bound assumed when the caller does not supply one.
const DEFAULT_MAX_DRAWDOWN: f64 = 0.1;

#[derive(Deserialize)]
pub struct TopQuery {
    pub limit: Option<i64>,
}

/// GET /api/v1/pool_yields/top — highest-APY pools above the TVL floor.
pub async fn top(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TopQuery>,
) -> Result<Json<Vec<PoolYield>>, ApiError> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
    if limit <= 0 {
        return Err(ApiError(crate::error::Error::InvalidInput(
            "limit must be positive".into(),
        )));
    }

    let pools = state
        .pool_yields
        .top_apy_pool_yields(state.chain, state.min_tvl_usd, limit)
        .await?;
    Ok(Json(pools))
}

#[derive(Deserialize)]
pub struct SuggestQuery {
    #[serde(rename = "riskTolerance")]
    pub risk_tolerance: String,
    pub asset: String,
    #[serde(rename = "assetValueUsd")]
    pub asset_value_usd: f64,
    #[serde(rename = "investmentTimeframe")]
    pub investment_timeframe: i32,
    #[serde(rename = "maxDrawdown")]
    pub max_drawdown: Option<f64>,
}

/// GET /api/v1/pool_yields/suggest — risk-qualified pools for an asset.
pub async fn suggest(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SuggestQuery>,
) -> Result<Json<Vec<PoolYield>>, ApiError> {
    let risk_tolerance: RiskTolerance = query.risk_tolerance.parse()?;
    let investment_timeframe = InvestmentTimeframe::try_from(query.investment_timeframe)?;

    let preferences = UserPreferences {
        chain: state.chain,
        risk_tolerance,
        max_drawdown: query.max_drawdown.unwrap_or(DEFAULT_MAX_DRAWDOWN),
        capital_size: query.asset_value_usd,
        investment_timeframe,
        asset_symbol: query.asset,
    };

    let pools = state.mapper.qualified_pools(&preferences).await?;
    Ok(Json(pools))
}
