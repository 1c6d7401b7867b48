//! Request tuning from TOML (`[request]` section)

use serde::{Deserialize, Serialize};

/// `[request]` section: applied to every provider call in a session.
///
/// `timeout_s` is the per-call deadline enforced by the round executor;
/// there is no separate global budget.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRequestConfig {
    pub timeout_s: u64,
    pub temperature: f64,
    pub max_output_tokens: u32,
}

impl Default for FileRequestConfig {
    fn default() -> Self {
        Self {
            timeout_s: 60,
            temperature: 0.2,
            max_output_tokens: 1024,
        }
    }
}
