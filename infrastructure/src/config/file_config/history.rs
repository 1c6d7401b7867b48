//! History persistence from TOML (`[history]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[history]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileHistoryConfig {
    pub enabled: bool,
    /// Log file path; unset means the platform data dir.
    pub path: Option<String>,
}

impl Default for FileHistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: None,
        }
    }
}

impl FileHistoryConfig {
    /// Resolved log path, or `None` when history is disabled.
    pub fn resolved_path(&self) -> Option<PathBuf> {
        if !self.enabled {
            return None;
        }
        match &self.path {
            Some(path) => Some(expand_tilde(path)),
            None => dirs::data_dir().map(|d| d.join("llm-council").join("history.jsonl")),
        }
    }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_history_has_no_path() {
        let config = FileHistoryConfig {
            enabled: false,
            path: Some("/tmp/history.jsonl".to_string()),
        };
        assert!(config.resolved_path().is_none());
    }

    #[test]
    fn test_explicit_path_is_used() {
        let config = FileHistoryConfig {
            enabled: true,
            path: Some("/tmp/council/history.jsonl".to_string()),
        };
        assert_eq!(
            config.resolved_path().unwrap(),
            PathBuf::from("/tmp/council/history.jsonl")
        );
    }

    #[test]
    fn test_tilde_expansion() {
        let expanded = expand_tilde("~/council/history.jsonl");
        if let Some(home) = dirs::home_dir() {
            assert!(expanded.starts_with(home));
        }
    }
}
