//! HTTP surface over the suggestion pipeline and the data store.

pub mod error;
pub mod routes;

use std::sync::Arc;

use chrono::Duration;

use crate::app::mapper::MappingEngine;
use crate::app::orchestrator::Orchestrator;
use crate::app::txbuilder::TransactionBuilder;
use crate::domain::Chain;
use crate::port::outbound::store::{IntentStore, PoolYieldStore, SuggestionStore};

pub use error::ApiError;
pub use routes::build_router;

/// Everything the request handlers need, shared behind one `Arc`.
pub struct AppState {
    pub pool_yields: Arc<dyn PoolYieldStore>,
    pub suggestions: Arc<dyn SuggestionStore>,
    pub intents: Arc<dyn IntentStore>,
    pub mapper: MappingEngine,
    pub orchestrator: Arc<Orchestrator>,
    pub tx_builder: TransactionBuilder,
    /// Default chain for queries that do not name one.
    pub chain: Chain,
    /// TVL floor applied to the top-APY listing.
    pub min_tvl_usd: f64,
    /// Window for the "latest suggestions" listing.
    pub suggestion_lookback: Duration,
}
