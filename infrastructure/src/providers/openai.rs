//! OpenAI provider adapter (Responses API)

use super::{ProviderAdapter, require_api_key, status_error, transport_error};
use async_trait::async_trait;
use council_application::ports::llm_gateway::{GenerationRequest, ProviderError};
use council_domain::{Completion, Provider, TokenUsage};
use serde_json::{Value, json};
use std::time::Instant;
use tracing::debug;

pub struct OpenAiAdapter {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenAiAdapter {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url.trim_end_matches('/'))
    }

    /// Build the Responses API payload for one request
    fn build_payload(request: &GenerationRequest) -> Value {
        let input = json!([
            {
                "role": "system",
                "content": [{"type": "text", "text": request.system_prompt}],
            },
            {
                "role": "user",
                "content": [{"type": "text", "text": request.user_prompt}],
            },
        ]);
        let mut payload = json!({
            "model": request.model,
            "input": input,
        });
        if let Some(temperature) = request.options.temperature {
            payload["temperature"] = json!(temperature);
        }
        if let Some(max_output_tokens) = request.options.max_output_tokens {
            payload["max_output_tokens"] = json!(max_output_tokens);
        }
        if let Some(reasoning) = &request.options.reasoning {
            payload["reasoning"] = reasoning.clone();
        }
        payload
    }

    /// Pull the completion text out of a Responses API body
    ///
    /// Prefers the `output_text` convenience field; otherwise walks
    /// `output[].content[].text`.
    fn extract_text(data: &Value) -> String {
        if let Some(text) = data.get("output_text").and_then(Value::as_str) {
            return text.to_string();
        }
        let mut parts = Vec::new();
        if let Some(items) = data.get("output").and_then(Value::as_array) {
            for item in items {
                if let Some(contents) = item.get("content").and_then(Value::as_array) {
                    for content in contents {
                        if let Some(text) = content.get("text").and_then(Value::as_str) {
                            parts.push(text);
                        }
                    }
                }
            }
        }
        parts.concat()
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
impl ProviderAdapter for OpenAiAdapter {
    fn provider(&self) -> Provider {
        Provider::OpenAi
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<Completion, ProviderError> {
        let api_key = require_api_key(Provider::OpenAi, self.api_key.as_deref())?;
        let payload = Self::build_payload(request);

        debug!(model = %request.model, "openai: sending completion request");
        let started = Instant::now();
        let response = self
            .client
            .post(self.endpoint("responses"))
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| transport_error(Provider::OpenAi, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(Provider::OpenAi, e))?;
        if !status.is_success() {
            return Err(status_error(Provider::OpenAi, status, &body));
        }

        let data: Value = serde_json::from_str(&body)
            .map_err(|e| ProviderError::MalformedResponse(format!("openai: {e}")))?;

        let mut completion = Completion::new(Self::extract_text(&data))
            .with_latency_ms(started.elapsed().as_millis() as u64);
        if let Some(usage) = Self::extract_usage(&data) {
            completion = completion.with_usage(usage);
        }
        Ok(completion)
    }

    async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
        let api_key = require_api_key(Provider::OpenAi, self.api_key.as_deref())?;
        let response = self
            .client
            .get(self.endpoint("models"))
            .bearer_auth(api_key)
            .send()
            .await
            .map_err(|e| transport_error(Provider::OpenAi, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(Provider::OpenAi, e))?;
        if !status.is_success() {
            return Err(status_error(Provider::OpenAi, status, &body));
        }

        let data: Value = serde_json::from_str(&body)
            .map_err(|e| ProviderError::MalformedResponse(format!("openai: {e}")))?;
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
