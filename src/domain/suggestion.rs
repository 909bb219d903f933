//! Yield suggestions, their executable actions, and user preferences.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::chain::{Chain, DataSource};
use crate::error::Error;

/// How much volatility a user is willing to accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTolerance {
    Low = 0,
    Medium = 1,
    High = 2,
}

impl RiskTolerance {
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Upper bound on enriched-pool `sigma` for pools this tier accepts.
    #[must_use]
    pub fn max_sigma(self) -> f64 {
        match self {
            Self::Low => 0.15,
            Self::Medium => 0.5,
            Self::High => 5.0,
        }
    }
}

impl TryFrom<i32> for RiskTolerance {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Low),
            1 => Ok(Self::Medium),
            2 => Ok(Self::High),
            other => Err(Error::InvalidInput(format!("invalid risk tolerance: {other}"))),
        }
    }
}

impl FromStr for RiskTolerance {
    type Err = Error;

    /// Accepts the tier name (any case) or its integer encoding.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            other => other
                .parse::<i32>()
                .map_err(|_| Error::InvalidInput(format!("invalid risk tolerance: {s}")))
                .and_then(Self::try_from),
        }
    }
}

/// Supported investment horizons, in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InvestmentTimeframe {
    Days30 = 30,
    Days90 = 90,
    Days180 = 180,
}

impl InvestmentTimeframe {
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    #[must_use]
    pub fn days(self) -> u32 {
        self as u32
    }
}

impl TryFrom<i32> for InvestmentTimeframe {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            30 => Ok(Self::Days30),
            90 => Ok(Self::Days90),
            180 => Ok(Self::Days180),
            other => Err(Error::InvalidInput(format!(
                "invalid investment timeframe: {other}"
            ))),
        }
    }
}

/// Kind of on-chain step an action represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Swap = 0,
    Stake = 1,
}

impl ActionType {
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for ActionType {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Swap),
            1 => Ok(Self::Stake),
            other => Err(Error::Parse(format!("unknown action type: {other}"))),
        }
    }
}

/// A point-in-time recommendation for a symbol/risk/timeframe combination.
///
/// Immutable once created; the action-derivation pass may append
/// [`YieldAction`]s but never rewrites the suggestion itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldSuggestion {
    pub id: i32,
    pub timestamp: DateTime<Utc>,
    pub insight: String,
    pub is_actionable: bool,
    pub symbol: String,
    pub investment_timeframe: InvestmentTimeframe,
    pub risk_tolerance: RiskTolerance,
    pub chain: Chain,
    pub project: String,
    pub original_id: String,
    pub data_source: DataSource,
}

/// A suggestion that has not been persisted yet (no id).
#[derive(Debug, Clone, PartialEq)]
pub struct NewYieldSuggestion {
    pub timestamp: DateTime<Utc>,
    pub insight: String,
    pub is_actionable: bool,
    pub symbol: String,
    pub investment_timeframe: InvestmentTimeframe,
    pub risk_tolerance: RiskTolerance,
    pub chain: Chain,
    pub project: String,
    pub original_id: String,
    pub data_source: DataSource,
}

/// One executable step attached to a suggestion.
///
/// `sequence_number` orders the steps within a suggestion, starting at 1;
/// `(suggestion_id, sequence_number)` is unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldAction {
    pub id: i32,
    pub suggestion_id: i32,
    pub sequence_number: i32,
    pub title: String,
    pub description: String,
    pub action_type: ActionType,
}

/// An action that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewYieldAction {
    pub suggestion_id: i32,
    pub sequence_number: i32,
    pub title: String,
    pub description: String,
    pub action_type: ActionType,
}

/// What a user asks the suggestion pipeline for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub chain: Chain,
    pub risk_tolerance: RiskTolerance,
    pub max_drawdown: f64,
    pub capital_size: f64,
    pub investment_timeframe: InvestmentTimeframe,
    pub asset_symbol: String,
}
