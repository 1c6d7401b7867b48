//! CLI entrypoint for llm-council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use council_application::{HistoryStore, NoHistory, RunDebateInput, RunDebateUseCase};
use council_domain::Question;
use council_infrastructure::{
    AnthropicAdapter, ConfigLoader, FileConfig, GeminiAdapter, JsonlHistoryStore, OpenAiAdapter,
    ProviderAdapter, RoutingGateway, Severity, config::write_template,
};
use council_presentation::{ChatRepl, Cli, ConsoleFormatter, OutputFormat, ProgressReporter};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    if cli.init_config {
        let path = cli
            .config
            .clone()
            .or_else(ConfigLoader::global_config_path)
            .context("could not determine a config path")?;
        if write_template(&path, cli.force)? {
            println!("Wrote config to {}", path.display());
        } else {
            println!(
                "Config already exists at {}. Use --force to overwrite.",
                path.display()
            );
        }
        return Ok(());
    }

    // Load configuration
    let mut file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };

    // Apply CLI overrides
    if !cli.member.is_empty() {
        file_config.council.members = cli.member.clone();
    }
    if let Some(moderator) = &cli.moderator {
        match moderator.split_once(':') {
            Some((provider, model)) => {
                file_config.moderator.provider = provider.to_string();
                file_config.moderator.model = model.to_string();
            }
            None => {
                file_config.moderator.provider = moderator.clone();
                file_config.moderator.model.clear();
            }
        }
    }

    // Surface configuration issues before any network call
    let issues = file_config.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Warning => eprintln!("warning: {}", issue.message),
            Severity::Error => eprintln!("error: {}", issue.message),
        }
    }
    if issues.iter().any(|i| i.severity == Severity::Error) {
        bail!("configuration is invalid");
    }

    // === Dependency injection ===
    let gateway = Arc::new(build_gateway(&file_config));

    if cli.list_models {
        for (provider, listing) in gateway.list_all_models().await {
            match listing {
                Ok(models) => {
                    println!("{provider}:");
                    for model in models {
                        println!("  - {model}");
                    }
                }
                Err(e) => println!("{provider}: {e}"),
            }
        }
        return Ok(());
    }

    let council = file_config.to_council_config()?;

    let history: Arc<dyn HistoryStore> = if cli.no_history {
        Arc::new(NoHistory)
    } else {
        match file_config.history.resolved_path() {
            Some(path) => match JsonlHistoryStore::open(&path) {
                Ok(store) => {
                    info!(path = %path.display(), "History enabled");
                    Arc::new(store)
                }
                Err(e) => {
                    eprintln!("warning: could not open history file: {e}");
                    Arc::new(NoHistory)
                }
            },
            None => Arc::new(NoHistory),
        }
    };

    // Chat mode
    if cli.chat {
        let repl = ChatRepl::new(gateway, council)
            .with_history(history)
            .with_output(cli.output)
            .with_progress(!cli.quiet);
        repl.run().await?;
        return Ok(());
    }

    // Single question mode - question is required
    let question = match cli.question {
        Some(q) => q,
        None => bail!("Question is required. Use --chat for interactive mode."),
    };
    let Some(question) = Question::try_new(question) else {
        bail!("Question cannot be empty.");
    };

    let use_case = RunDebateUseCase::new(gateway);
    let input = RunDebateInput::new(question, council);

    let record = if cli.quiet {
        use_case.execute(input).await?
    } else {
        let progress = ProgressReporter::new();
        use_case.execute_with_progress(input, &progress).await?
    };

    let output = match cli.output {
        OutputFormat::Full => ConsoleFormatter::format(&record),
        OutputFormat::Synthesis => ConsoleFormatter::format_synthesis_only(&record),
        OutputFormat::Json => ConsoleFormatter::format_json(&record),
    };
    println!("{output}");

    if let Err(e) = history.append(&record) {
        eprintln!("warning: could not write session history: {e}");
    }

    Ok(())
}

/// Register one adapter per vendor; members route by provider kind.
fn build_gateway(config: &FileConfig) -> RoutingGateway {
    let providers = &config.providers;
    let adapters: Vec<Arc<dyn ProviderAdapter>> = vec![
        Arc::new(GeminiAdapter::new(
            providers.gemini.base_url.clone(),
            providers.gemini.resolve_api_key(),
        )),
        Arc::new(AnthropicAdapter::new(
            providers.anthropic.base_url.clone(),
            providers.anthropic.resolve_api_key(),
            providers.anthropic.version.clone(),
        )),
        Arc::new(OpenAiAdapter::new(
            providers.openai.base_url.clone(),
            providers.openai.resolve_api_key(),
        )),
    ];
    RoutingGateway::new(adapters)
}
