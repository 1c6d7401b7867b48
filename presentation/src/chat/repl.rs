//! REPL (Read-Eval-Print Loop) for interactive debates

use crate::ConsoleFormatter;
use crate::ProgressReporter;
use crate::cli::commands::OutputFormat;
use council_application::{HistoryStore, LlmGateway, NoHistory, RunDebateInput, RunDebateUseCase};
use council_domain::{CouncilConfig, Question};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::sync::Arc;
use tracing::warn;

/// Interactive debate REPL
pub struct ChatRepl<G: LlmGateway + 'static> {
    use_case: RunDebateUseCase<G>,
    council: CouncilConfig,
    history: Arc<dyn HistoryStore>,
    output: OutputFormat,
    show_progress: bool,
}

impl<G: LlmGateway + 'static> ChatRepl<G> {
    /// Create a new ChatRepl
    pub fn new(gateway: Arc<G>, council: CouncilConfig) -> Self {
        Self {
            use_case: RunDebateUseCase::new(gateway),
            council,
            history: Arc::new(NoHistory),
            output: OutputFormat::Synthesis,
            show_progress: true,
        }
    }

    /// Set the history store for finished sessions
    pub fn with_history(mut self, history: Arc<dyn HistoryStore>) -> Self {
        self.history = history;
        self
    }

    /// Set the output format
    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        // Try to load readline history
        let history_path = dirs::data_dir().map(|p| p.join("llm-council").join("repl_history.txt"));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let readline = rl.readline("council> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(line) {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);
                    self.process_question(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {err:?}");
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("LLM Council - interactive mode. Type /help for commands.");
        println!(
            "Council: {}",
            self.council
                .members
                .iter()
                .map(|m| m.label())
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!("Moderator: {}", self.council.moderator.label());
        println!();
    }

    /// Handle slash commands. Returns true if the REPL should exit.
    fn handle_command(&self, cmd: &str) -> bool {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                true
            }
            "/help" | "/h" | "/?" => {
                println!();
                println!("Commands:");
                println!("  /help, /h, /?    - Show this help");
                println!("  /members         - Show the configured council");
                println!("  /quit, /exit, /q - Exit");
                println!();
                false
            }
            "/members" => {
                println!();
                println!("Council members:");
                for member in &self.council.members {
                    println!("  - {}", member.label());
                }
                println!("Moderator: {}", self.council.moderator.label());
                println!();
                false
            }
            _ => {
                println!("Unknown command: {cmd}");
                println!("Type /help for available commands");
                false
            }
        }
    }

    async fn process_question(&self, question: &str) {
        println!();

        let Some(question) = Question::try_new(question) else {
            return;
        };
        let input = RunDebateInput::new(question, self.council.clone());

        let result = if self.show_progress {
            let progress = ProgressReporter::new();
            self.use_case.execute_with_progress(input, &progress).await
        } else {
            self.use_case.execute(input).await
        };

        match result {
            Ok(record) => {
                let output = match self.output {
                    OutputFormat::Full => ConsoleFormatter::format(&record),
                    OutputFormat::Synthesis => ConsoleFormatter::format_synthesis_only(&record),
                    OutputFormat::Json => ConsoleFormatter::format_json(&record),
                };
                println!("{output}");

                if let Err(e) = self.history.append(&record) {
                    warn!("Could not write session history: {e}");
                }
            }
            Err(e) => {
                eprintln!("Error: {e}");
            }
        }
        println!();
    }
}
