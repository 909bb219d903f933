//! Placeholder on-chain transaction payload construction.
//!
//! Produces Aptos entry-function payloads shaped like the real thing but
//! never submitted anywhere; wallets sign and submit out of band.

use serde::Serialize;

use crate::domain::{YieldSuggestion, YieldSuggestionIntent};

/// Aptos entry-function payload for a staking action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionPayload {
    #[serde(rename = "type")]
    pub payload_type: String,
    pub function: String,
    pub type_arguments: Vec<String>,
    pub arguments: Vec<String>,
}

/// Builds placeholder transaction payloads for intents.
#[derive(Debug, Default)]
pub struct TransactionBuilder;

impl TransactionBuilder {
    /// Build the stake payload for an intent against its suggestion.
    #[must_use]
    pub fn build_stake_payload(
        &self,
        intent: &YieldSuggestionIntent,
        suggestion: &YieldSuggestion,
    ) -> TransactionPayload {
        TransactionPayload {
            payload_type: "entry_function_payload".to_string(),
            function: format!("0x1::{}::stake", suggestion.project),
            type_arguments: vec!["0x1::aptos_coin::AptosCoin".to_string()],
            arguments: vec![
                intent.wallet_address.clone(),
                intent.asset_amount.to_string(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Chain, DataSource, IntentStatus, InvestmentTimeframe, RiskTolerance,
    };
    use chrono::Utc;

    #[test]
    fn stake_payload_is_deterministic() {
        let suggestion = YieldSuggestion {
            id: 1,
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
        };
        let intent = YieldSuggestionIntent {
            id: 3,
            wallet_address: "0xwallet".into(),
            suggestion_id: 1,
            asset_amount: 25.0,
            status: IntentStatus::New,
        };

        let payload = TransactionBuilder.build_stake_payload(&intent, &suggestion);

        assert_eq!(payload.payload_type, "entry_function_payload");
        assert_eq!(payload.function, "0x1::echelon::stake");
        assert_eq!(payload.arguments, vec!["0xwallet".to_string(), "25".to_string()]);

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["type"], "entry_function_payload");
    }
}
