//! Yieldscout - DeFi yield aggregation and suggestion service.
//!
//! Periodically pulls yield-pool data from the DefiLlama aggregator,
//! persists snapshots to SQLite, and serves risk-filtered pool
//! recommendations over a REST API. An LLM-backed insight pipeline turns
//! qualified pools, market sentiment, and the on-chain interaction catalog
//! into a structured recommendation, and placeholder Aptos staking payloads
//! are built for intents users commit to.
//!
//! # Modules
//!
//! - [`domain`] - plain types: pools, suggestions, intents, preferences
//! - [`port`] - trait seams the application depends on
//! - [`adapter`] - DefiLlama, SQLite, LLM, sentiment, and HTTP adapters
//! - [`app`] - configuration, collector, orchestrator, and process wiring
//! - [`error`] - error types for the crate

pub mod adapter;
pub mod app;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{Error, Result};
