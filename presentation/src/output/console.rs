//! Console output formatter for session records

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use council_domain::{MemberSlot, Round, RoundOutcome, SessionRecord};

/// Formats debate sessions for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the full transcript
    pub fn format(record: &SessionRecord) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("LLM Council Results"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n\n",
            "Question:".cyan().bold(),
            record.question
        ));

        let members: Vec<String> = record
            .round(Round::One)
            .map(|r| r.entries.iter().map(|e| e.member.to_string()).collect())
            .unwrap_or_default();
        output.push_str(&format!(
            "{} {}\n",
            "Council:".cyan().bold(),
            members.join(", ")
        ));

        if let Some(round1) = record.round(Round::One) {
            output.push_str(&Self::section_header("Round 1: Independent Answers"));
            Self::push_round(&mut output, round1);
        }

        if let Some(round2) = record.round(Round::Two) {
            output.push_str(&Self::section_header("Round 2: Rebuttals"));
            if round2.entries.is_empty() {
                output.push_str(&format!("\n{}\n", "(no surviving members)".dimmed()));
            } else {
                Self::push_round(&mut output, round2);
            }
        }

        output.push_str(&Self::section_header("Moderator Synthesis"));
        output.push_str(&format!(
            "\n{}\n",
            format!("Moderator: {}", record.moderator.member)
                .yellow()
                .bold()
        ));
        output.push_str(&Self::slot_body(&record.moderator.slot));

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON (the machine-readable record)
    pub fn format_json(record: &SessionRecord) -> String {
        serde_json::to_string_pretty(record).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the moderator synthesis only (concise output)
    pub fn format_synthesis_only(record: &SessionRecord) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== LLM Council Conclusion ===".cyan().bold()
        ));
        output.push_str(&format!("{} {}\n\n", "Q:".bold(), record.question));
        output.push_str(&Self::slot_body(&record.moderator.slot));
        output
    }

    fn push_round(output: &mut String, round: &RoundOutcome) {
        for entry in &round.entries {
            let title = match &entry.slot {
                MemberSlot::Completed(completion) => {
                    let mut title = format!("── {} ──", entry.member).yellow().bold().to_string();
                    if completion.latency_ms > 0 {
                        title.push_str(
                            &format!(" ({} ms)", completion.latency_ms).dimmed().to_string(),
                        );
                    }
                    title
                }
                MemberSlot::Failed(_) => format!("── {} ──", entry.member).red().bold().to_string(),
            };
            output.push_str(&format!("\n{title}\n"));
            output.push_str(&Self::slot_body(&entry.slot));
        }
    }

    fn slot_body(slot: &MemberSlot) -> String {
        match slot {
            MemberSlot::Completed(completion) => {
                let body = if completion.text.trim().is_empty() {
                    "(empty response)".dimmed().to_string()
                } else {
                    completion.text.trim().to_string()
                };
                format!("{body}\n")
            }
            MemberSlot::Failed(failure) => format!(
                "{}\n",
                format!("Error ({}): {}", failure.kind, failure.message)
                    .red()
                    .bold()
            ),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, record: &SessionRecord) -> String {
        Self::format(record)
    }

    fn format_json(&self, record: &SessionRecord) -> String {
        Self::format_json(record)
    }

    fn format_synthesis_only(&self, record: &SessionRecord) -> String {
        Self::format_synthesis_only(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{
        Completion, FailureKind, FailureRecord, MemberName, Question, RoundEntry, SessionId,
    };

    fn record() -> SessionRecord {
        SessionRecord {
            id: SessionId::new("s-1"),
            question: Question::new("Which queue should we use?"),
            started_at: "2026-01-01T00:00:00Z".to_string(),
            rounds: vec![
                RoundOutcome::new(
                    Round::One,
                    vec![
                        RoundEntry::completed(
                            MemberName::new("gemini"),
                            Completion::new("Kafka.").with_latency_ms(850),
                        ),
                        RoundEntry::failed(
                            MemberName::new("anthropic"),
                            FailureRecord::new(
                                FailureKind::Timeout,
                                "no response within 60s",
                                MemberName::new("anthropic"),
                            ),
                        ),
                    ],
                ),
                RoundOutcome::new(
                    Round::Two,
                    vec![RoundEntry::completed(
                        MemberName::new("gemini"),
                        Completion::new("Still Kafka."),
                    )],
                ),
            ],
            moderator: RoundEntry::completed(
                MemberName::new("moderator"),
                Completion::new("Use Kafka."),
            ),
        }
    }

    #[test]
    fn test_full_format_shows_all_sections() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format(&record());
        assert!(output.contains("Which queue should we use?"));
        assert!(output.contains("Round 1: Independent Answers"));
        assert!(output.contains("Round 2: Rebuttals"));
        assert!(output.contains("Moderator Synthesis"));
        assert!(output.contains("Kafka."));
        assert!(output.contains("Error (timeout): no response within 60s"));
    }

    #[test]
    fn test_synthesis_only_is_concise() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format_synthesis_only(&record());
        assert!(output.contains("Use Kafka."));
        assert!(!output.contains("Round 1"));
    }

    #[test]
    fn test_json_output_is_the_record() {
        let output = ConsoleFormatter::format_json(&record());
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["id"], "s-1");
        assert_eq!(value["rounds"][0]["round"], "one");
    }
}
