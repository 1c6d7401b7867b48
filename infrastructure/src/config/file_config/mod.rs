//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file and
//! convert into the domain's `CouncilConfig` after validation.

mod council;
mod history;
mod providers;
mod request;

pub use council::{FileCouncilConfig, FileModeratorConfig};
pub use history::FileHistoryConfig;
pub use providers::{
    FileAnthropicConfig, FileGeminiConfig, FileOpenAiConfig, FileProvidersConfig,
};
pub use request::FileRequestConfig;

use super::{ConfigError, ConfigIssue};
use council_domain::{CouncilConfig, CouncilMember, GenerationOptions, Provider};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Council membership and order
    pub council: FileCouncilConfig,
    /// Moderator selection
    pub moderator: FileModeratorConfig,
    /// Per-call request tuning
    pub request: FileRequestConfig,
    /// History persistence settings
    pub history: FileHistoryConfig,
    /// Per-vendor transport settings
    pub providers: FileProvidersConfig,
}

impl FileConfig {
    /// Validate the configuration, returning all detected issues.
    ///
    /// Errors make a debate impossible; warnings mean individual member
    /// calls will fail at runtime but still occupy their slots.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.council.members.is_empty() {
            issues.push(ConfigIssue::error("council.members is empty"));
        }

        for name in &self.council.members {
            match name.parse::<Provider>() {
                Ok(provider) => {
                    if self.model_for(provider).is_empty() {
                        issues.push(ConfigIssue::warning(format!(
                            "providers.{name}.model is not set; {name} calls will fail"
                        )));
                    }
                }
                Err(_) => {
                    issues.push(ConfigIssue::error(format!(
                        "council.members contains unknown provider '{name}'"
                    )));
                }
            }
        }

        match self.moderator.provider.parse::<Provider>() {
            Ok(provider) => {
                if self.moderator.model.is_empty() && self.model_for(provider).is_empty() {
                    issues.push(ConfigIssue::warning(format!(
                        "no model configured for moderator provider '{}'",
                        self.moderator.provider
                    )));
                }
            }
            Err(_) => {
                issues.push(ConfigIssue::error(format!(
                    "moderator.provider is unknown provider '{}'",
                    self.moderator.provider
                )));
            }
        }

        if self.request.timeout_s == 0 {
            issues.push(ConfigIssue::warning(
                "request.timeout_s is 0; every call will time out immediately",
            ));
        }

        issues
    }

    /// Convert into the domain council configuration.
    ///
    /// Members keep their configured order. A member without an API key or
    /// model is still included: its calls fail at runtime and its slots
    /// record the failure, matching the one-slot-per-member invariant.
    pub fn to_council_config(&self) -> Result<CouncilConfig, ConfigError> {
        let mut members = Vec::with_capacity(self.council.members.len());
        for name in &self.council.members {
            let provider: Provider = name
                .parse()
                .map_err(|_| ConfigError::UnknownProvider(name.clone()))?;
            members.push(self.member_for(provider));
        }

        let moderator_provider: Provider = self
            .moderator
            .provider
            .parse()
            .map_err(|_| ConfigError::UnknownProvider(self.moderator.provider.clone()))?;
        let mut moderator = self.member_for(moderator_provider);
        if !self.moderator.model.is_empty() {
            moderator.model = self.moderator.model.clone();
        }

        Ok(CouncilConfig::new(members, moderator)
            .with_per_call_timeout(Duration::from_secs(self.request.timeout_s)))
    }

    fn model_for(&self, provider: Provider) -> &str {
        match provider {
            Provider::Gemini => &self.providers.gemini.model,
            Provider::Anthropic => &self.providers.anthropic.model,
            Provider::OpenAi => &self.providers.openai.model,
        }
    }

    fn member_for(&self, provider: Provider) -> CouncilMember {
        let reasoning = match provider {
            Provider::Gemini => self.providers.gemini.generation_config.clone(),
            Provider::Anthropic => self.providers.anthropic.thinking.clone(),
            Provider::OpenAi => self.providers.openai.reasoning.clone(),
        };
        let mut options = GenerationOptions::new()
            .with_temperature(self.request.temperature)
            .with_max_output_tokens(self.request.max_output_tokens);
        if let Some(reasoning) = reasoning {
            options = options.with_reasoning(reasoning);
        }
        CouncilMember::new(provider.as_str(), provider, self.model_for(provider))
            .with_options(options)
    }
}
