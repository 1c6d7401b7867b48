//! Session record assembly
//!
//! The orchestrator is the sole writer of session state. It funnels every
//! mutation through this builder, which enforces the phase state machine
//! and withholds the finished [`SessionRecord`] until the session reaches
//! `Complete` - partial sessions never leak to formatting or history.

use crate::core::error::DomainError;
use crate::core::ids::SessionId;
use crate::core::question::Question;
use crate::debate::phase::DebatePhase;
use crate::debate::record::{RoundEntry, RoundOutcome, SessionRecord};

/// Accumulates round outcomes and the moderator outcome as the
/// orchestrator advances phases.
#[derive(Debug)]
pub struct SessionRecordBuilder {
    id: SessionId,
    question: Question,
    started_at: String,
    phase: DebatePhase,
    rounds: Vec<RoundOutcome>,
    moderator: Option<RoundEntry>,
}

impl SessionRecordBuilder {
    pub fn new(question: Question) -> Self {
        Self {
            id: SessionId::generate(),
            question,
            started_at: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            phase: DebatePhase::Init,
            rounds: Vec::new(),
            moderator: None,
        }
    }

    pub fn phase(&self) -> DebatePhase {
        self.phase
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Advance the state machine, rejecting skips and re-entry
    pub fn advance(&mut self, next: DebatePhase) -> Result<(), DomainError> {
        if !self.phase.can_advance_to(next) {
            return Err(DomainError::IllegalTransition {
                from: self.phase.to_string(),
                to: next.to_string(),
            });
        }
        self.phase = next;
        Ok(())
    }

    /// Mark the session as fatally failed
    pub fn fail(&mut self) {
        if !self.phase.is_terminal() {
            self.phase = DebatePhase::Failed;
        }
    }

    pub fn record_round(&mut self, outcome: RoundOutcome) {
        self.rounds.push(outcome);
    }

    pub fn record_moderator(&mut self, entry: RoundEntry) {
        self.moderator = Some(entry);
    }

    /// Consume the builder and produce the immutable record.
    ///
    /// Only legal once the session has reached `Complete` with both rounds
    /// and the moderator outcome recorded.
    pub fn finish(self) -> Result<SessionRecord, DomainError> {
        if self.phase != DebatePhase::Complete {
            return Err(DomainError::SessionIncomplete(self.phase.to_string()));
        }
        let moderator = self
            .moderator
            .ok_or_else(|| DomainError::SessionIncomplete("missing moderator outcome".into()))?;
        Ok(SessionRecord {
            id: self.id,
            question: self.question,
            started_at: self.started_at,
            rounds: self.rounds,
            moderator,
        })
    }
}
