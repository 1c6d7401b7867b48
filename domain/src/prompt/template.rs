//! Prompt templates for the debate flow
//!
//! Round 1 sends the question untouched. Round 2 embeds every *other*
//! member's round 1 answer, labeled by identity, in council order. The
//! moderator sees each member's final-round position.

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for round 1
    pub fn round_one_system() -> &'static str {
        "You are a council member. Provide a direct, opinionated answer. \
         Be concise, practical, and avoid hedging unless needed."
    }

    /// System prompt for round 2
    pub fn round_two_system() -> &'static str {
        "You are a council member in a debate. Critique other responses, identify \
         weaknesses, and provide your improved stance. Avoid repeating your round 1 answer."
    }

    /// System prompt for moderator synthesis
    pub fn moderator_system() -> &'static str {
        "You are the council moderator. Synthesize a final answer that resolves \
         disagreements, highlights tradeoffs, and ends with clear recommendations."
    }

    /// Round 1 user prompt: the raw question, identical for all members
    pub fn round_one(question: &str) -> String {
        question.to_string()
    }

    /// Round 2 user prompt for one member
    ///
    /// `peers` holds (label, round 1 text) for every other member that
    /// succeeded, in council order. The member's own answer is excluded by
    /// the caller; an empty slice means the member debates alone.
    pub fn round_two(question: &str, peers: &[(String, String)]) -> String {
        let mut lines = vec![format!("User question:\n{question}"), String::new()];
        lines.push("Other council responses:".to_string());
        if peers.is_empty() {
            lines.push("- (no other council responses were available)".to_string());
        } else {
            for (label, text) in peers {
                lines.push(format!("- {label}: {text}"));
            }
        }
        lines.push(String::new());
        lines.push("Provide your rebuttal and improved answer.".to_string());
        lines.join("\n")
    }

    /// Moderator user prompt
    ///
    /// `positions` holds (label, final-round text) for every member with at
    /// least one completion, in council order.
    pub fn moderator(question: &str, positions: &[(String, String)]) -> String {
        let mut lines = vec![format!("User question:\n{question}"), String::new()];
        lines.push("Council positions (final round):".to_string());
        for (label, text) in positions {
            lines.push(format!("- {label}: {text}"));
        }
        lines.push(String::new());
        lines.push("Synthesize the final answer.".to_string());
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(label: &str, text: &str) -> (String, String) {
        (label.to_string(), text.to_string())
    }

    #[test]
    fn test_round_one_is_the_raw_question() {
        assert_eq!(PromptTemplate::round_one("What is Rust?"), "What is Rust?");
    }

    #[test]
    fn test_round_two_labels_each_peer() {
        let prompt = PromptTemplate::round_two(
            "What is Rust?",
            &[
                pair("gemini:gemini-1.5-pro", "A systems language."),
                pair("openai:gpt-4.1-mini", "A memory-safe language."),
            ],
        );
        assert!(prompt.contains("What is Rust?"));
        assert!(prompt.contains("- gemini:gemini-1.5-pro: A systems language."));
        assert!(prompt.contains("- openai:gpt-4.1-mini: A memory-safe language."));
        assert!(prompt.contains("rebuttal"));
    }

    #[test]
    fn test_round_two_without_peers_says_so() {
        let prompt = PromptTemplate::round_two("What is Rust?", &[]);
        assert!(prompt.contains("no other council responses were available"));
    }

    #[test]
    fn test_moderator_prompt_lists_positions() {
        let prompt = PromptTemplate::moderator(
            "What is Rust?",
            &[
                pair("gemini:gemini-1.5-pro", "Use it."),
                pair("anthropic:claude-3-5-sonnet", "Use it carefully."),
            ],
        );
        assert!(prompt.contains("Council positions"));
        assert!(prompt.contains("- gemini:gemini-1.5-pro: Use it."));
        assert!(prompt.contains("- anthropic:claude-3-5-sonnet: Use it carefully."));
        assert!(prompt.contains("Synthesize the final answer."));
    }
}
