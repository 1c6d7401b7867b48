//! Gemini provider adapter (generateContent API)

use super::{ProviderAdapter, require_api_key, status_error, transport_error};
use async_trait::async_trait;
use council_application::ports::llm_gateway::{GenerationRequest, ProviderError};
use council_domain::{Completion, Provider, TokenUsage};
use serde_json::{Map, Value, json};
use std::time::Instant;
use tracing::debug;

pub struct GeminiAdapter {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl GeminiAdapter {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key,
        }
    }

    /// Build the generateContent payload for one request
    ///
    /// Temperature and max tokens map into `generationConfig`; opaque
    /// reasoning settings merge into the same object (the vendor keeps its
    /// thinking knobs there).
    fn build_payload(request: &GenerationRequest) -> Value {
        let mut payload = json!({
            "contents": [
                {"role": "user", "parts": [{"text": request.user_prompt}]},
            ],
        });
        if !request.system_prompt.is_empty() {
            payload["systemInstruction"] = json!({"parts": [{"text": request.system_prompt}]});
        }

        let mut generation_config = Map::new();
        if let Some(temperature) = request.options.temperature {
            generation_config.insert("temperature".to_string(), json!(temperature));
        }
        if let Some(max_output_tokens) = request.options.max_output_tokens {
            generation_config.insert("maxOutputTokens".to_string(), json!(max_output_tokens));
        }
        if let Some(Value::Object(extra)) = &request.options.reasoning {
            for (key, value) in extra {
                generation_config.insert(key.clone(), value.clone());
            }
        }
        if !generation_config.is_empty() {
            payload["generationConfig"] = Value::Object(generation_config);
        }
        payload
    }

    /// Pull the first candidate's text out of a generateContent body
    fn extract_text(data: &Value) -> Result<String, ProviderError> {
        let candidates = data
            .get("candidates")
            .and_then(Value::as_array)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| {
                ProviderError::MalformedResponse("gemini: response has no candidates".to_string())
            })?;
        let parts = candidates[0]
            .get("content")
            .and_then(|c| c.get("parts"))
            .and_then(Value::as_array);
        let text = parts
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|p| p.get("text").and_then(Value::as_str))
                    .collect::<Vec<_>>()
                    .concat()
            })
            .unwrap_or_default();
        Ok(text)
    }

    fn extract_usage(data: &Value) -> Option<TokenUsage> {
        let usage = data.get("usageMetadata")?;
        Some(TokenUsage::new(
            usage.get("promptTokenCount")?.as_u64()? as u32,
            usage.get("candidatesTokenCount")?.as_u64()? as u32,
        ))
    }
}

#[async_trait]
impl ProviderAdapter for GeminiAdapter {
    fn provider(&self) -> Provider {
        Provider::Gemini
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<Completion, ProviderError> {
        let api_key = require_api_key(Provider::Gemini, self.api_key.as_deref())?;
        let payload = Self::build_payload(request);
        let url = format!(
            "{}/models/{}:generateContent?key={api_key}",
            self.base_url.trim_end_matches('/'),
            request.model
        );

        debug!(model = %request.model, "gemini: sending completion request");
        let started = Instant::now();
        let response = self
            .client
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| transport_error(Provider::Gemini, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(Provider::Gemini, e))?;
        if !status.is_success() {
            return Err(status_error(Provider::Gemini, status, &body));
        }

        let data: Value = serde_json::from_str(&body)
            .map_err(|e| ProviderError::MalformedResponse(format!("gemini: {e}")))?;

        let mut completion = Completion::new(Self::extract_text(&data)?)
            .with_latency_ms(started.elapsed().as_millis() as u64);
        if let Some(usage) = Self::extract_usage(&data) {
            completion = completion.with_usage(usage);
        }
        Ok(completion)
    }

    async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
        let api_key = require_api_key(Provider::Gemini, self.api_key.as_deref())?;
        let url = format!(
            "{}/models?key={api_key}",
            self.base_url.trim_end_matches('/')
        );
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| transport_error(Provider::Gemini, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(Provider::Gemini, e))?;
        if !status.is_success() {
            return Err(status_error(Provider::Gemini, status, &body));
        }

        let data: Value = serde_json::from_str(&body)
            .map_err(|e| ProviderError::MalformedResponse(format!("gemini: {e}")))?;
        let mut models: Vec<String> = data
            .get("models")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.get("name").and_then(Value::as_str))
                    .map(|name| name.strip_prefix("models/").unwrap_or(name).to_string())
                    .collect()
            })
            .unwrap_or_default();
        models.sort();
        Ok(models)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{CouncilMember, GenerationOptions};

    fn request(options: GenerationOptions) -> GenerationRequest {
        let member =
            CouncilMember::new("gemini", Provider::Gemini, "gemini-1.5-pro").with_options(options);
        GenerationRequest::for_member(&member, "be direct", "What is Rust?")
    }

    #[test]
    fn test_payload_shape() {
        let payload = GeminiAdapter::build_payload(&request(
            GenerationOptions::new()
                .with_temperature(0.2)
                .with_max_output_tokens(1024),
        ));
        assert_eq!(payload["contents"][0]["parts"][0]["text"], "What is Rust?");
        assert_eq!(payload["systemInstruction"]["parts"][0]["text"], "be direct");
        assert_eq!(payload["generationConfig"]["temperature"], 0.2);
        assert_eq!(payload["generationConfig"]["maxOutputTokens"], 1024);
    }

    #[test]
    fn test_reasoning_merges_into_generation_config() {
        let payload = GeminiAdapter::build_payload(&request(
            GenerationOptions::new()
                .with_temperature(0.2)
                .with_reasoning(json!({"thinkingConfig": {"thinkingBudget": 1024}})),
        ));
        assert_eq!(payload["generationConfig"]["temperature"], 0.2);
        assert_eq!(
            payload["generationConfig"]["thinkingConfig"]["thinkingBudget"],
            1024
        );
    }

    #[test]
    fn test_extract_text_from_first_candidate() {
        let data = json!({
            "candidates": [
                {"content": {"parts": [{"text": "answer one"}]}},
                {"content": {"parts": [{"text": "ignored"}]}},
            ]
        });
        assert_eq!(GeminiAdapter::extract_text(&data).unwrap(), "answer one");
    }

    #[test]
    fn test_no_candidates_is_malformed() {
        let result = GeminiAdapter::extract_text(&json!({"candidates": []}));
        assert!(matches!(result, Err(ProviderError::MalformedResponse(_))));
    }

    #[test]
    fn test_extract_usage() {
        let data = json!({"usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 34}});
        let usage = GeminiAdapter::extract_usage(&data).unwrap();
        assert_eq!(usage.input_tokens, 12);
        assert_eq!(usage.output_tokens, 34);
    }
}
