use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::super::{ApiError, AppState};
use crate::app::txbuilder::TransactionPayload;
use crate::domain::{TxHistoryEntry, TxStatus, YieldSuggestionIntent};
use crate::error::Error;

#[derive(Deserialize)]
pub struct CreateIntentRequest {
    #[serde(rename = "walletAddress")]
    pub wallet_address: String,
    #[serde(rename = "assetAmount")]
    pub asset_amount: f64,
}

#[derive(Debug, Serialize)]
pub struct CreateIntentResponse {
    pub intent: YieldSuggestionIntent,
    pub payload: TransactionPayload,
}

/// POST /api/v1/yield_suggestions/{id}/createIntent — commit a wallet to a
/// suggestion and hand back the unsigned transaction payload.
pub async fn create_intent(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(request): Json<CreateIntentRequest>,
) -> Result<Json<CreateIntentResponse>, ApiError> {
    if request.wallet_address.is_empty() {
        return Err(ApiError(Error::InvalidInput(
            "walletAddress must not be empty".into(),
        )));
    }
    if request.asset_amount <= 0.0 {
        return Err(ApiError(Error::InvalidInput(
            "assetAmount must be positive".into(),
        )));
    }

    let suggestion = state
        .suggestions
        .suggestion(id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("yield suggestion {id}")))?;

    let intent = state
        .intents
        .create_intent(&suggestion, &request.wallet_address, request.asset_amount)
        .await?;
    let payload = state.tx_builder.build_stake_payload(&intent, &suggestion);

    Ok(Json(CreateIntentResponse { intent, payload }))
}

#[derive(Deserialize)]
pub struct SubmitSignedTransactionRequest {
    #[serde(rename = "txHash")]
    pub tx_hash: String,
}

/// POST /api/v1/yield_suggestion_intent/{id}/submitSignedTransaction —
/// append a pending transaction to the intent's ledger.
pub async fn submit_signed_transaction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(request): Json<SubmitSignedTransactionRequest>,
) -> Result<Json<TxHistoryEntry>, ApiError> {
    if request.tx_hash.is_empty() {
        return Err(ApiError(Error::InvalidInput(
            "txHash must not be empty".into(),
        )));
    }

    let intent = state
        .intents
        .intent(id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("yield suggestion intent {id}")))?;

    let sequence_number = state.intents.current_sequence_number(&intent).await?;
    let entry = state
        .intents
        .insert_tx_history(&intent, sequence_number, &request.tx_hash, TxStatus::Pending)
        .await?;

    Ok(Json(entry))
}
