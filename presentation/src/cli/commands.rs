//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for debate results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Full transcript: both rounds and the moderator synthesis
    Full,
    /// Only the moderator synthesis
    Synthesis,
    /// Machine-readable JSON record
    Json,
}

/// CLI arguments for llm-council
#[derive(Parser, Debug)]
#[command(name = "llm-council")]
#[command(author, version, about = "LLM Council - independent models debate, one answer comes out")]
#[command(long_about = r#"
llm-council puts a question before a council of independently-hosted models.

The debate has three stages:
1. Round 1: every member answers the question independently, in parallel
2. Round 2: each surviving member rebuts the other members' answers
3. Synthesis: a moderator model merges everything into one recommendation

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./council.toml      Project-level config
3. ~/.config/llm-council/config.toml   Global config

Example:
  llm-council "Should we split this service?"
  llm-council --member anthropic --member openai "Compare async runtimes"
  llm-council --chat
"#)]
pub struct Cli {
    /// The question to put before the council (not required in chat mode)
    pub question: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Council members, in presentation order (overrides the config)
    #[arg(short, long, value_name = "PROVIDER")]
    pub member: Vec<String>,

    /// Moderator override, as "provider" or "provider:model"
    #[arg(long, value_name = "PROVIDER[:MODEL]")]
    pub moderator: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "full")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Skip history logging for this run
    #[arg(long)]
    pub no_history: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// List each provider's available models and exit
    #[arg(long)]
    pub list_models: bool,

    /// Write a starter config file and exit
    #[arg(long)]
    pub init_config: bool,

    /// Overwrite an existing config file (with --init-config)
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_is_positional() {
        let cli = Cli::parse_from(["llm-council", "Why Rust?"]);
        assert_eq!(cli.question.as_deref(), Some("Why Rust?"));
        assert!(!cli.chat);
    }

    #[test]
    fn test_members_accumulate_in_order() {
        let cli = Cli::parse_from([
            "llm-council",
            "--member",
            "openai",
            "--member",
            "gemini",
            "q",
        ]);
        assert_eq!(cli.member, ["openai", "gemini"]);
    }

    #[test]
    fn test_verbosity_counts() {
        let cli = Cli::parse_from(["llm-council", "-vv", "q"]);
        assert_eq!(cli.verbose, 2);
    }
}
