//! Debate phase state machine

use serde::{Deserialize, Serialize};

/// One of the two debate rounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Round {
    One,
    Two,
}

impl Round {
    pub fn as_str(&self) -> &'static str {
        match self {
            Round::One => "round1",
            Round::Two => "round2",
        }
    }
}

impl std::fmt::Display for Round {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Stage of a debate, as reported to progress observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DebateStage {
    RoundOne,
    RoundTwo,
    Moderation,
}

impl DebateStage {
    pub fn display_name(&self) -> &'static str {
        match self {
            DebateStage::RoundOne => "Round 1: Independent Answers",
            DebateStage::RoundTwo => "Round 2: Rebuttals",
            DebateStage::Moderation => "Moderator Synthesis",
        }
    }

    pub fn round(&self) -> Option<Round> {
        match self {
            DebateStage::RoundOne => Some(Round::One),
            DebateStage::RoundTwo => Some(Round::Two),
            DebateStage::Moderation => None,
        }
    }
}

impl std::fmt::Display for DebateStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Orchestration state of one debate session
///
/// Phases advance strictly forward; `Failed` is reachable from any
/// non-terminal phase. The orchestrator is the sole writer and never
/// re-enters a prior phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebatePhase {
    Init,
    Round1Running,
    Round1Done,
    Round2Running,
    Round2Done,
    Moderating,
    Complete,
    Failed,
}

impl DebatePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            DebatePhase::Init => "init",
            DebatePhase::Round1Running => "round1_running",
            DebatePhase::Round1Done => "round1_done",
            DebatePhase::Round2Running => "round2_running",
            DebatePhase::Round2Done => "round2_done",
            DebatePhase::Moderating => "moderating",
            DebatePhase::Complete => "complete",
            DebatePhase::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, DebatePhase::Complete | DebatePhase::Failed)
    }

    /// The single legal successor in the happy path
    fn successor(&self) -> Option<DebatePhase> {
        match self {
            DebatePhase::Init => Some(DebatePhase::Round1Running),
            DebatePhase::Round1Running => Some(DebatePhase::Round1Done),
            DebatePhase::Round1Done => Some(DebatePhase::Round2Running),
            DebatePhase::Round2Running => Some(DebatePhase::Round2Done),
            DebatePhase::Round2Done => Some(DebatePhase::Moderating),
            DebatePhase::Moderating => Some(DebatePhase::Complete),
            DebatePhase::Complete | DebatePhase::Failed => None,
        }
    }

    /// Whether `next` is a legal transition from this phase
    pub fn can_advance_to(&self, next: DebatePhase) -> bool {
        if next == DebatePhase::Failed {
            return !self.is_terminal();
        }
        self.successor() == Some(next)
    }
}

impl std::fmt::Display for DebatePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
