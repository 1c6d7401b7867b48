//! Application layer for llm-council
//!
//! This crate contains the debate use case and the port definitions its
//! collaborators implement. It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    history::{HistoryStore, NoHistory},
    llm_gateway::{GenerationRequest, LlmGateway, ProviderError},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::run_debate::{RunDebateError, RunDebateInput, RunDebateUseCase};
