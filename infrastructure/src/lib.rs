//! Infrastructure layer for llm-council
//!
//! External adapters: HTTP provider transports, TOML configuration
//! loading, and JSONL history persistence.

pub mod config;
pub mod history;
pub mod providers;

// Re-export commonly used types
pub use config::{ConfigError, ConfigIssue, ConfigLoader, FileConfig, Severity};
pub use history::jsonl_store::JsonlHistoryStore;
pub use providers::{
    ProviderAdapter, anthropic::AnthropicAdapter, gemini::GeminiAdapter, openai::OpenAiAdapter,
    routing::RoutingGateway,
};
