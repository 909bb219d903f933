//! Application layer - configuration, collection, orchestration, wiring.

pub mod actions;
pub mod bootstrap;
pub mod collector;
pub mod config;
pub mod mapper;
pub mod orchestrator;
pub mod txbuilder;

pub use actions::ActionCatalog;
pub use bootstrap::App;
pub use collector::Collector;
pub use config::Config;
pub use mapper::MappingEngine;
pub use orchestrator::Orchestrator;
pub use txbuilder::{TransactionBuilder, TransactionPayload};
