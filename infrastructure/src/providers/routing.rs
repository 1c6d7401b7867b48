//! Vendor routing gateway
//!
//! Implements the application's [`LlmGateway`] port by dispatching each
//! request to the adapter registered for its provider. All three vendor
//! adapters are registered unconditionally; a member whose key or model is
//! missing fails at call time and occupies its slot as a failure, it is
//! never silently dropped from the council.

use super::ProviderAdapter;
use async_trait::async_trait;
use council_application::ports::llm_gateway::{GenerationRequest, LlmGateway, ProviderError};
use council_domain::{Completion, Provider};
use std::sync::Arc;

pub struct RoutingGateway {
    adapters: Vec<Arc<dyn ProviderAdapter>>,
}

impl RoutingGateway {
    pub fn new(adapters: Vec<Arc<dyn ProviderAdapter>>) -> Self {
        Self { adapters }
    }

    fn resolve(&self, provider: Provider) -> Result<&dyn ProviderAdapter, ProviderError> {
        self.adapters
            .iter()
            .find(|a| a.provider() == provider)
            .map(|a| a.as_ref())
            .ok_or_else(|| {
                ProviderError::Unknown(format!("no adapter registered for provider {provider}"))
            })
    }

    /// Model listings from every registered adapter, in registration order
    pub async fn list_all_models(&self) -> Vec<(Provider, Result<Vec<String>, ProviderError>)> {
        futures::future::join_all(
            self.adapters
                .iter()
                .map(|adapter| async move { (adapter.provider(), adapter.list_models().await) }),
        )
        .await
    }
}

#[async_trait]
impl LlmGateway for RoutingGateway {
    async fn generate(&self, request: GenerationRequest) -> Result<Completion, ProviderError> {
        if request.model.trim().is_empty() {
            return Err(ProviderError::Unknown(format!(
                "no model configured for provider {}",
                request.provider
            )));
        }
        self.resolve(request.provider)?.generate(&request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{CouncilMember, GenerationOptions};

    struct StubAdapter {
        provider: Provider,
        reply: &'static str,
    }

    #[async_trait]
    impl ProviderAdapter for StubAdapter {
        fn provider(&self) -> Provider {
            self.provider
        }

        async fn generate(
            &self,
            _request: &GenerationRequest,
        ) -> Result<Completion, ProviderError> {
            Ok(Completion::new(self.reply))
        }

        async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
            Ok(vec![format!("{}-model", self.provider)])
        }
    }

    fn request(provider: Provider, model: &str) -> GenerationRequest {
        let member = CouncilMember::new(provider.as_str(), provider, model)
            .with_options(GenerationOptions::new());
        GenerationRequest::for_member(&member, "s", "u")
    }

    fn gateway() -> RoutingGateway {
        RoutingGateway::new(vec![
            Arc::new(StubAdapter {
                provider: Provider::Gemini,
                reply: "from gemini",
            }),
            Arc::new(StubAdapter {
                provider: Provider::OpenAi,
                reply: "from openai",
            }),
        ])
    }

    #[tokio::test]
    async fn routes_by_provider() {
        let completion = gateway()
            .generate(request(Provider::OpenAi, "gpt-4.1-mini"))
            .await
            .unwrap();
        assert_eq!(completion.text, "from openai");
    }

    #[tokio::test]
    async fn unregistered_provider_is_an_error() {
        let result = gateway()
            .generate(request(Provider::Anthropic, "claude-3-5-sonnet"))
            .await;
        assert!(matches!(result, Err(ProviderError::Unknown(_))));
    }

    #[tokio::test]
    async fn empty_model_fails_before_dispatch() {
        let result = gateway().generate(request(Provider::OpenAi, "")).await;
        assert!(matches!(result, Err(ProviderError::Unknown(_))));
    }

    #[tokio::test]
    async fn lists_models_for_every_adapter() {
        let listings = gateway().list_all_models().await;
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].0, Provider::Gemini);
        assert_eq!(listings[0].1.as_ref().unwrap()[0], "gemini-model");
    }
}
