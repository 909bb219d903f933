//! Plain domain types: pool observations, suggestions, intents, and the
//! insight contract.

pub mod chain;
pub mod insight;
pub mod intent;
pub mod interaction;
pub mod pool;
pub mod suggestion;

pub use chain::{normalize_chain, Chain, DataSource};
pub use insight::{InsightAction, InsightInput, InsightOutput};
pub use intent::{IntentStatus, TxHistoryEntry, TxStatus, YieldSuggestionIntent};
pub use interaction::AvailableInteraction;
pub use pool::{EnrichedPool, PoolYield};
pub use suggestion::{
    ActionType, InvestmentTimeframe, NewYieldAction, NewYieldSuggestion, RiskTolerance,
    UserPreferences, YieldAction, YieldSuggestion,
};
