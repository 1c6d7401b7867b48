//! Provider configuration from TOML (`[providers]` section)

use serde::{Deserialize, Serialize};

/// Resolve an API key: inline value wins over the environment variable.
pub(crate) fn resolve_api_key(inline: &Option<String>, env_name: &str) -> Option<String> {
    if let Some(key) = inline {
        let key = key.trim();
        if !key.is_empty() {
            return Some(key.to_string());
        }
    }
    std::env::var(env_name).ok().filter(|k| !k.is_empty())
}

/// Gemini API provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    /// Environment variable name for the API key.
    pub api_key_env: String,
    /// Direct API key (not recommended - use the env var instead).
    pub api_key: Option<String>,
    /// Model this provider contributes to the council.
    pub model: String,
    /// Base URL for the Gemini API.
    pub base_url: String,
    /// Extra `generationConfig` entries, passed through opaquely.
    pub generation_config: Option<serde_json::Value>,
}

impl Default for FileGeminiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GEMINI_API_KEY".to_string(),
            api_key: None,
            model: String::new(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            generation_config: None,
        }
    }
}

impl FileGeminiConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_api_key(&self.api_key, &self.api_key_env)
    }
}

/// Anthropic API provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAnthropicConfig {
    /// Environment variable name for the API key.
    pub api_key_env: String,
    /// Direct API key (not recommended - use the env var instead).
    pub api_key: Option<String>,
    /// Model this provider contributes to the council.
    pub model: String,
    /// Base URL for the Anthropic API.
    pub base_url: String,
    /// Anthropic API version header.
    pub version: String,
    /// Extended thinking settings, passed through opaquely.
    pub thinking: Option<serde_json::Value>,
}

impl Default for FileAnthropicConfig {
    fn default() -> Self {
        Self {
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            api_key: None,
            model: String::new(),
            base_url: "https://api.anthropic.com/v1".to_string(),
            version: "2023-06-01".to_string(),
            thinking: None,
        }
    }
}

impl FileAnthropicConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_api_key(&self.api_key, &self.api_key_env)
    }
}

/// OpenAI API provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOpenAiConfig {
    /// Environment variable name for the API key.
    pub api_key_env: String,
    /// Direct API key (not recommended - use the env var instead).
    pub api_key: Option<String>,
    /// Model this provider contributes to the council.
    pub model: String,
    /// Base URL for the OpenAI API.
    pub base_url: String,
    /// Reasoning-effort settings, passed through opaquely.
    pub reasoning: Option<serde_json::Value>,
}

impl Default for FileOpenAiConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENAI_API_KEY".to_string(),
            api_key: None,
            model: String::new(),
            base_url: "https://api.openai.com/v1".to_string(),
            reasoning: None,
        }
    }
}

impl FileOpenAiConfig {
    pub fn resolve_api_key(&self) -> Option<String> {
        resolve_api_key(&self.api_key, &self.api_key_env)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProvidersConfig {
    pub gemini: FileGeminiConfig,
    pub anthropic: FileAnthropicConfig,
    pub openai: FileOpenAiConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_key_wins_over_env() {
        let key = resolve_api_key(
            &Some("inline-key".to_string()),
            "LLM_COUNCIL_TEST_KEY_THAT_IS_NOT_SET",
        );
        assert_eq!(key.unwrap(), "inline-key");
    }

    #[test]
    fn test_blank_inline_key_is_ignored() {
        let key = resolve_api_key(
            &Some("   ".to_string()),
            "LLM_COUNCIL_TEST_KEY_THAT_IS_NOT_SET",
        );
        assert!(key.is_none());
    }

    #[test]
    fn test_vendor_defaults() {
        let providers = FileProvidersConfig::default();
        assert_eq!(providers.gemini.api_key_env, "GEMINI_API_KEY");
        assert_eq!(providers.anthropic.version, "2023-06-01");
        assert!(providers.openai.base_url.contains("api.openai.com"));
    }
}
