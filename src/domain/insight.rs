//! Input/output contract of the insight generator.

use serde::{Deserialize, Serialize};

use super::interaction::AvailableInteraction;
use super::pool::PoolYield;
use super::suggestion::UserPreferences;

/// Everything the insight generator sees for one request.
#[derive(Debug, Clone, Serialize)]
pub struct InsightInput {
    pub preferences: UserPreferences,
    pub pools: Vec<PoolYield>,
    pub sentiment: Option<String>,
    pub contracts: Vec<AvailableInteraction>,
}

/// Structured recommendation returned by the insight generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightOutput {
    #[serde(rename = "recommendedPools")]
    pub recommended_pools: Vec<String>,
    pub insight: String,
    #[serde(default)]
    pub actions: Vec<InsightAction>,
}

/// One executable step proposed by the insight generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightAction {
    pub pool: String,
    pub function: String,
    #[serde(rename = "contractAddress")]
    pub contract_address: String,
}
