//! Domain layer for llm-council
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Council
//!
//! A council is an ordered set of independently-hosted LLM endpoints
//! ("members") that debate a question over two rounds:
//!
//! - **Round 1**: every member answers the question independently
//! - **Round 2**: every surviving member rebuts the other members' answers
//!
//! A designated **moderator** model then synthesizes one final answer.
//!
//! ## Session
//!
//! The full transcript of one debate is captured in an immutable
//! [`SessionRecord`], assembled by the orchestrator through a
//! [`SessionRecordBuilder`] that tracks the [`DebatePhase`] state machine.

pub mod core;
pub mod council;
pub mod debate;
pub mod prompt;

// Re-export commonly used types
pub use crate::core::{error::DomainError, ids::SessionId, provider::Provider, question::Question};
pub use council::{
    entities::{CouncilConfig, CouncilMember},
    value_objects::{GenerationOptions, MemberName, TokenUsage},
};
pub use debate::{
    builder::SessionRecordBuilder,
    phase::{DebatePhase, DebateStage, Round},
    record::{Completion, FailureKind, FailureRecord, MemberSlot, RoundEntry, RoundOutcome, SessionRecord},
};
pub use prompt::template::PromptTemplate;
