//! LLM adapter modules.
//!
//! Provides implementations of the [`Llm`](crate::port::outbound::llm::Llm)
//! trait for Anthropic Claude and OpenRouter.

pub mod anthropic;
pub mod openrouter;

pub use anthropic::Anthropic;
pub use openrouter::OpenRouter;
