//! Provider adapters
//!
//! One adapter per vendor, all behind [`ProviderAdapter`]. Adapters differ
//! only in payload shape and the vendor key their opaque extended-reasoning
//! settings are embedded under; the orchestrator never sees any of it.
//!
//! An adapter performs exactly one outbound HTTP call per `generate`
//! invocation and never retries - the round executor owns the timeout and
//! the (absent) retry policy.

pub mod anthropic;
pub mod gemini;
pub mod openai;
pub mod routing;

use async_trait::async_trait;
use council_application::ports::llm_gateway::{GenerationRequest, ProviderError};
use council_domain::{Completion, Provider};

#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// The vendor this adapter talks to
    fn provider(&self) -> Provider;

    /// One completion call; no retries
    async fn generate(&self, request: &GenerationRequest) -> Result<Completion, ProviderError>;

    /// Model identifiers this vendor currently offers
    async fn list_models(&self) -> Result<Vec<String>, ProviderError>;
}

/// Map a reqwest transport error onto the provider error taxonomy
pub(crate) fn transport_error(provider: Provider, error: reqwest::Error) -> ProviderError {
    if error.is_timeout() {
        ProviderError::Timeout(format!("{provider}: {error}"))
    } else {
        ProviderError::Unknown(format!("{provider}: {error}"))
    }
}

/// Map a non-2xx HTTP status onto the provider error taxonomy
pub(crate) fn status_error(
    provider: Provider,
    status: reqwest::StatusCode,
    body: &str,
) -> ProviderError {
    let message = format!("{provider} request failed: {status} {body}");
    match status.as_u16() {
        401 | 403 => ProviderError::Auth(message),
        429 => ProviderError::RateLimit(message),
        _ => ProviderError::Unknown(message),
    }
}

/// Reject calls made without a configured API key
pub(crate) fn require_api_key<'a>(
    provider: Provider,
    api_key: Option<&'a str>,
) -> Result<&'a str, ProviderError> {
    api_key
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| ProviderError::Auth(format!("missing API key for {provider}")))
}
