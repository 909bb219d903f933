//! Outbound adapters: concrete implementations of the outbound ports.

pub mod defillama;
pub mod insight;
pub mod llm;
pub mod sentiment;
pub mod sqlite;
