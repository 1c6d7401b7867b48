//! LLM Gateway port
//!
//! Defines the interface for communicating with LLM providers.

use async_trait::async_trait;
use council_domain::{Completion, CouncilMember, FailureKind, GenerationOptions, Provider};
use thiserror::Error;

/// Errors that can occur at the provider boundary
///
/// One variant per failure kind the debate records distinguish. Adapters
/// perform a single network attempt per call; retry policy (there is none)
/// belongs to the round executor, not here.
#[derive(Error, Debug, Clone)]
pub enum ProviderError {
    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("rate limited: {0}")]
    RateLimit(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("provider error: {0}")]
    Unknown(String),
}

impl ProviderError {
    /// The failure kind this error maps to in a slot
    pub fn kind(&self) -> FailureKind {
        match self {
            ProviderError::Auth(_) => FailureKind::Auth,
            ProviderError::Timeout(_) => FailureKind::Timeout,
            ProviderError::RateLimit(_) => FailureKind::RateLimit,
            ProviderError::MalformedResponse(_) => FailureKind::MalformedResponse,
            ProviderError::Unknown(_) => FailureKind::Unknown,
        }
    }
}

/// One generation request, fully self-describing
///
/// Carries everything an adapter needs for a single outbound call; the
/// adapter never sees council-level state.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub provider: Provider,
    pub model: String,
    pub system_prompt: String,
    pub user_prompt: String,
    pub options: GenerationOptions,
}

impl GenerationRequest {
    /// Build a request for a member (or the moderator) and one prompt pair
    pub fn for_member(
        member: &CouncilMember,
        system_prompt: impl Into<String>,
        user_prompt: impl Into<String>,
    ) -> Self {
        Self {
            provider: member.provider,
            model: member.model.clone(),
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            options: member.options.clone(),
        }
    }
}

/// Gateway for LLM communication
///
/// This port defines how the application layer talks to providers.
/// Implementations (adapters) live in the infrastructure layer. One
/// outbound network call per invocation; no retries inside.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<Completion, ProviderError>;
}
