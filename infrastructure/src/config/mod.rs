//! Configuration loading and validation

pub mod file_config;
pub mod loader;

pub use file_config::FileConfig;
pub use loader::ConfigLoader;

use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or converting configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("unknown provider '{0}' in configuration")]
    UnknownProvider(String),

    #[error("configuration I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Severity of a configuration issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// One problem detected while validating a [`FileConfig`]
#[derive(Debug, Clone)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub message: String,
}

impl ConfigIssue {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

/// Starter configuration written by `--init-config`
pub const CONFIG_TEMPLATE: &str = r#"[council]
members = ["gemini", "anthropic", "openai"]

[moderator]
provider = "openai"
model = "gpt-4.1-mini"

[request]
timeout_s = 60
temperature = 0.2
max_output_tokens = 1024

[history]
enabled = true

[providers.gemini]
api_key_env = "GEMINI_API_KEY"
model = "gemini-1.5-pro"
base_url = "https://generativelanguage.googleapis.com/v1beta"

[providers.anthropic]
api_key_env = "ANTHROPIC_API_KEY"
model = "claude-3-5-sonnet-20240620"
base_url = "https://api.anthropic.com/v1"
version = "2023-06-01"
# thinking = { type = "enabled", budget_tokens = 1024 }

[providers.openai]
api_key_env = "OPENAI_API_KEY"
model = "gpt-4.1-mini"
base_url = "https://api.openai.com/v1"
# reasoning = { effort = "medium" }
"#;

/// Write the starter config, refusing to overwrite unless forced.
///
/// Returns `true` if the file was written.
pub fn write_template(path: &Path, force: bool) -> Result<bool, ConfigError> {
    if path.exists() && !force {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, CONFIG_TEMPLATE)?;
    Ok(true)
}
