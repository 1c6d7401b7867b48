//! Anthropic provider adapter (Messages API)

use super::{ProviderAdapter, require_api_key, status_error, transport_error};
use async_trait::async_trait;
use council_application::ports::llm_gateway::{GenerationRequest, ProviderError};
use council_domain::{Completion, Provider, TokenUsage};
use serde_json::{Value, json};
use std::time::Instant;
use tracing::debug;

/// Messages API requires an explicit max_tokens
const DEFAULT_MAX_TOKENS: u32 = 1024;

pub struct AnthropicAdapter {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    api_version: String,
}

impl AnthropicAdapter {
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        api_version: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key,
            api_version: api_version.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.trim_end_matches('/'))
    }

    /// Build the Messages API payload for one request
    ///
    /// The system prompt rides in the top-level `system` field; the opaque
    /// reasoning settings land under the vendor's `thinking` key.
    fn build_payload(request: &GenerationRequest) -> Value {
        let mut payload = json!({
            "model": request.model,
            "max_tokens": request.options.max_output_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            "messages": [
                {
                    "role": "user",
                    "content": [{"type": "text", "text": request.user_prompt}],
                },
            ],
        });
        if !request.system_prompt.is_empty() {
            payload["system"] = json!(request.system_prompt);
        }
        if let Some(temperature) = request.options.temperature {
            payload["temperature"] = json!(temperature);
        }
        if let Some(thinking) = &request.options.reasoning {
            payload["thinking"] = thinking.clone();
        }
        payload
    }

    /// Concatenate text blocks; thinking blocks become the reasoning trace
    fn extract_content(data: &Value) -> (String, Option<String>) {
        let mut text_parts = Vec::new();
        let mut thinking_parts = Vec::new();
        if let Some(blocks) = data.get("content").and_then(Value::as_array) {
            for block in blocks {
                match block.get("type").and_then(Value::as_str) {
                    Some("text") => {
                        if let Some(text) = block.get("text").and_then(Value::as_str) {
                            text_parts.push(text);
                        }
                    }
                    Some("thinking") => {
                        if let Some(thinking) = block.get("thinking").and_then(Value::as_str) {
                            thinking_parts.push(thinking);
                        }
                    }
                    _ => {}
                }
            }
        }
        let reasoning = if thinking_parts.is_empty() {
            None
        } else {
            Some(thinking_parts.concat())
        };
        (text_parts.concat(), reasoning)
    }

    fn extract_usage(data: &Value) -> Option<TokenUsage> {
        let usage = data.get("usage")?;
        Some(TokenUsage::new(
            usage.get("input_tokens")?.as_u64()? as u32,
            usage.get("output_tokens")?.as_u64()? as u32,
        ))
    }
}

#[async_trait]
impl ProviderAdapter for AnthropicAdapter {
    fn provider(&self) -> Provider {
        Provider::Anthropic
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<Completion, ProviderError> {
        let api_key = require_api_key(Provider::Anthropic, self.api_key.as_deref())?;
        let payload = Self::build_payload(request);

        debug!(model = %request.model, "anthropic: sending completion request");
        let started = Instant::now();
        let response = self
            .client
            .post(self.endpoint("messages"))
            .header("x-api-key", api_key)
            .header("anthropic-version", &self.api_version)
            .json(&payload)
            .send()
            .await
            .map_err(|e| transport_error(Provider::Anthropic, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(Provider::Anthropic, e))?;
        if !status.is_success() {
            return Err(status_error(Provider::Anthropic, status, &body));
        }

        let data: Value = serde_json::from_str(&body)
            .map_err(|e| ProviderError::MalformedResponse(format!("anthropic: {e}")))?;

        let (text, reasoning) = Self::extract_content(&data);
        let mut completion =
            Completion::new(text).with_latency_ms(started.elapsed().as_millis() as u64);
        if let Some(reasoning) = reasoning {
            completion = completion.with_reasoning(reasoning);
        }
        if let Some(usage) = Self::extract_usage(&data) {
            completion = completion.with_usage(usage);
        }
        Ok(completion)
    }

    async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
        let api_key = require_api_key(Provider::Anthropic, self.api_key.as_deref())?;
        let response = self
            .client
            .get(self.endpoint("models"))
            .header("x-api-key", api_key)
            .header("anthropic-version", &self.api_version)
            .send()
            .await
            .map_err(|e| transport_error(Provider::Anthropic, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(Provider::Anthropic, e))?;
        if !status.is_success() {
            return Err(status_error(Provider::Anthropic, status, &body));
        }

        let data: Value = serde_json::from_str(&body)
            .map_err(|e| ProviderError::MalformedResponse(format!("anthropic: {e}")))?;
        let mut models: Vec<String> = data
            .get("data")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.get("id").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        models.sort();
        Ok(models)
    }
}
