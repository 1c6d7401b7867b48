//! Immutable debate records
//!
//! These types capture the outputs of a session:
//! - [`Completion`] - one member's successful output for one round
//! - [`FailureRecord`] - why a slot has no successful output
//! - [`MemberSlot`] - exactly one of the two, never absent
//! - [`RoundOutcome`] - all member slots for one round, in council order
//! - [`SessionRecord`] - the complete, replayable transcript

use crate::core::ids::SessionId;
use crate::core::question::Question;
use crate::council::value_objects::{MemberName, TokenUsage};
use crate::debate::phase::Round;
use serde::{Deserialize, Serialize};

/// Text produced by one member for one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    /// The response content
    pub text: String,
    /// Optional reasoning/thinking trace, when the vendor returns one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    /// Token accounting, when the vendor reports it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<TokenUsage>,
    /// Wall-clock latency of the producing call, in milliseconds
    pub latency_ms: u64,
}

impl Completion {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reasoning: None,
            usage: None,
            latency_ms: 0,
        }
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = Some(reasoning.into());
        self
    }

    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = Some(usage);
        self
    }

    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }
}

/// Why a member/round slot has no successful output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Auth,
    Timeout,
    RateLimit,
    MalformedResponse,
    Unknown,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Auth => "auth",
            FailureKind::Timeout => "timeout",
            FailureKind::RateLimit => "rate_limit",
            FailureKind::MalformedResponse => "malformed_response",
            FailureKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Structured placeholder occupying the slot a [`Completion`] would
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureRecord {
    pub kind: FailureKind,
    pub message: String,
    /// The member (or moderator) the failure originated from
    pub member: MemberName,
}

impl FailureRecord {
    pub fn new(kind: FailureKind, message: impl Into<String>, member: MemberName) -> Self {
        Self {
            kind,
            message: message.into(),
            member,
        }
    }
}

/// Outcome of one (member, round) pair - success or recorded failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberSlot {
    Completed(Completion),
    Failed(FailureRecord),
}

impl MemberSlot {
    pub fn is_success(&self) -> bool {
        matches!(self, MemberSlot::Completed(_))
    }

    pub fn completion(&self) -> Option<&Completion> {
        match self {
            MemberSlot::Completed(completion) => Some(completion),
            MemberSlot::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&FailureRecord> {
        match self {
            MemberSlot::Completed(_) => None,
            MemberSlot::Failed(failure) => Some(failure),
        }
    }
}

/// One member's slot within a round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundEntry {
    pub member: MemberName,
    pub slot: MemberSlot,
}

impl RoundEntry {
    pub fn completed(member: MemberName, completion: Completion) -> Self {
        Self {
            member,
            slot: MemberSlot::Completed(completion),
        }
    }

    pub fn failed(member: MemberName, failure: FailureRecord) -> Self {
        Self {
            member,
            slot: MemberSlot::Failed(failure),
        }
    }
}

/// All member slots for one round
///
/// Entry order is the configured council order, independent of the arrival
/// order of the concurrent calls that produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub round: Round,
    pub entries: Vec<RoundEntry>,
}

impl RoundOutcome {
    pub fn new(round: Round, entries: Vec<RoundEntry>) -> Self {
        Self { round, entries }
    }

    pub fn get(&self, member: &MemberName) -> Option<&MemberSlot> {
        self.entries
            .iter()
            .find(|e| &e.member == member)
            .map(|e| &e.slot)
    }

    /// Successful entries, in council order
    pub fn successes(&self) -> impl Iterator<Item = (&MemberName, &Completion)> {
        self.entries
            .iter()
            .filter_map(|e| e.slot.completion().map(|c| (&e.member, c)))
    }

    /// Failed entries, in council order
    pub fn failures(&self) -> impl Iterator<Item = (&MemberName, &FailureRecord)> {
        self.entries
            .iter()
            .filter_map(|e| e.slot.failure().map(|f| (&e.member, f)))
    }

    pub fn success_count(&self) -> usize {
        self.successes().count()
    }

    pub fn is_all_failed(&self) -> bool {
        self.success_count() == 0
    }
}

/// The immutable, complete output of one debate invocation
///
/// Built exclusively through [`SessionRecordBuilder`]; downstream
/// formatting and history consumers only read it.
///
/// [`SessionRecordBuilder`]: crate::debate::builder::SessionRecordBuilder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: SessionId,
    pub question: Question,
    /// RFC 3339 UTC timestamp of session start
    pub started_at: String,
    /// Round outcomes in execution order (round 1, then round 2)
    pub rounds: Vec<RoundOutcome>,
    /// The moderator's synthesis, or its recorded failure
    pub moderator: RoundEntry,
}

impl SessionRecord {
    pub fn round(&self, round: Round) -> Option<&RoundOutcome> {
        self.rounds.iter().find(|r| r.round == round)
    }

    /// A member's final-round completion: round 2, falling back to round 1
    pub fn final_completion(&self, member: &MemberName) -> Option<&Completion> {
        self.round(Round::Two)
            .and_then(|r| r.get(member))
            .and_then(MemberSlot::completion)
            .or_else(|| {
                self.round(Round::One)
                    .and_then(|r| r.get(member))
                    .and_then(MemberSlot::completion)
            })
    }

    pub fn synthesis(&self) -> Option<&Completion> {
        self.moderator.slot.completion()
    }
}
