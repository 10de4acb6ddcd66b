//! AI adapter module. Implements ScoringPort for LLM integration.
//!
//! Provides OpenAI-compatible adapter and mock adapter for testing.

pub mod mock_adapter;
pub mod openai_adapter;
pub mod payload;

pub use mock_adapter::MockAiAdapter;
pub use openai_adapter::OpenAiAdapter;
