//! Council membership from TOML (`[council]` and `[moderator]` sections)

use serde::{Deserialize, Serialize};

/// `[council]` section: the ordered member list.
///
/// Order here is the presentation order of every round in the transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCouncilConfig {
    pub members: Vec<String>,
}

impl Default for FileCouncilConfig {
    fn default() -> Self {
        Self {
            members: vec![
                "gemini".to_string(),
                "anthropic".to_string(),
                "openai".to_string(),
            ],
        }
    }
}

/// `[moderator]` section.
///
/// An empty model falls back to the provider's configured model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModeratorConfig {
    pub provider: String,
    pub model: String,
}

impl Default for FileModeratorConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: String::new(),
        }
    }
}
