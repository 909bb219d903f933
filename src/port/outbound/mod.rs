//! Outbound ports: interfaces this application depends on.

pub mod insight;
pub mod llm;
pub mod sentiment;
pub mod source;
pub mod store;

pub use insight::InsightGenerator;
pub use llm::Llm;
pub use sentiment::SentimentSource;
pub use source::YieldSource;
pub use store::{
    IntentStore, InteractionStore, PoolYieldStore, QualifiedPoolQuery, SuggestionStore,
};
