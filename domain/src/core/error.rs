//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("No council members configured")]
    NoMembers,

    #[error("Duplicate council member: {0}")]
    DuplicateMember(String),

    #[error("All council members failed in round 1")]
    AllMembersFailed,

    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Illegal phase transition: {from} -> {to}")]
    IllegalTransition { from: String, to: String },

    #[error("Session is not complete (phase: {0})")]
    SessionIncomplete(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = DomainError::AllMembersFailed;
        assert_eq!(error.to_string(), "All council members failed in round 1");
    }

    #[test]
    fn test_transition_error_names_both_phases() {
        let error = DomainError::IllegalTransition {
            from: "round1_running".to_string(),
            to: "moderating".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("round1_running"));
        assert!(message.contains("moderating"));
    }
}
