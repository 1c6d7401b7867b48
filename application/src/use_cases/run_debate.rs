//! Run Debate use case
//!
//! Orchestrates the full debate flow: round 1 (independent answers),
//! round 2 (cross-informed rebuttals), then moderator synthesis.
//!
//! Within a round, member calls run concurrently and fail independently;
//! across rounds, execution is strictly sequential - round 2 dispatch
//! never begins before every round 1 call has reached a final state. The
//! orchestrating task is the only writer of session state: member tasks
//! return values into the round barrier, so no locks are needed.
//!
//! There is deliberately no retry on provider failure: one network attempt
//! per member per round, bounded by the configured per-call timeout.

use crate::ports::llm_gateway::{GenerationRequest, LlmGateway, ProviderError};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use council_domain::{
    CouncilConfig, CouncilMember, DebatePhase, DebateStage, DomainError, FailureKind,
    FailureRecord, MemberName, MemberSlot, PromptTemplate, Question, RoundEntry, RoundOutcome,
    SessionRecord, SessionRecordBuilder,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Errors that can occur during debate execution
///
/// Per-member failures are recovered into `FailureRecord` slots and never
/// surface here; only configuration problems and a fully-failed round 1
/// abort the session.
#[derive(Error, Debug)]
pub enum RunDebateError {
    #[error("no council members configured")]
    NoMembers,

    #[error("invalid council configuration: {0}")]
    InvalidCouncil(DomainError),

    #[error("all council members failed in round 1; nothing to debate")]
    AllMembersFailed,

    #[error("session assembly error: {0}")]
    Session(DomainError),
}

/// Input for the RunDebate use case
#[derive(Debug, Clone)]
pub struct RunDebateInput {
    /// The question to put before the council
    pub question: Question,
    /// Members, moderator, and the per-call timeout
    pub council: CouncilConfig,
}

impl RunDebateInput {
    pub fn new(question: impl Into<Question>, council: CouncilConfig) -> Self {
        Self {
            question: question.into(),
            council,
        }
    }
}

/// Use case for running a council debate
pub struct RunDebateUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
}

impl<G: LlmGateway + 'static> RunDebateUseCase<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunDebateInput) -> Result<SessionRecord, RunDebateError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunDebateInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<SessionRecord, RunDebateError> {
        let RunDebateInput { question, council } = input;

        council.validate().map_err(|e| match e {
            DomainError::NoMembers => RunDebateError::NoMembers,
            other => RunDebateError::InvalidCouncil(other),
        })?;

        info!(
            members = council.members.len(),
            session_timeout_s = council.per_call_timeout.as_secs(),
            "Starting council debate"
        );

        let mut builder = SessionRecordBuilder::new(question.clone());
        let timeout = council.per_call_timeout;
        let q = question.content().to_string();

        // Round 1: every member answers the raw question independently
        builder
            .advance(DebatePhase::Round1Running)
            .map_err(RunDebateError::Session)?;
        let round1 = self
            .run_round(
                DebateStage::RoundOne,
                &council.members,
                timeout,
                progress,
                |_member| {
                    (
                        PromptTemplate::round_one_system().to_string(),
                        PromptTemplate::round_one(&q),
                    )
                },
            )
            .await;
        builder
            .advance(DebatePhase::Round1Done)
            .map_err(RunDebateError::Session)?;

        if round1.is_all_failed() {
            warn!("All members failed in round 1; aborting session");
            builder.fail();
            return Err(RunDebateError::AllMembersFailed);
        }

        // Round 2: survivors only. A member that failed round 1 gets no
        // slot and never appears in any peer's rebuttal prompt.
        let survivors: Vec<CouncilMember> = council
            .members
            .iter()
            .filter(|m| round1.get(&m.name).is_some_and(MemberSlot::is_success))
            .cloned()
            .collect();
        debug!(survivors = survivors.len(), "Round 1 complete");

        builder
            .advance(DebatePhase::Round2Running)
            .map_err(RunDebateError::Session)?;
        let round2 = self
            .run_round(
                DebateStage::RoundTwo,
                &survivors,
                timeout,
                progress,
                |member| {
                    let peers: Vec<(String, String)> = council
                        .members
                        .iter()
                        .filter(|peer| peer.name != member.name)
                        .filter_map(|peer| {
                            round1
                                .get(&peer.name)
                                .and_then(MemberSlot::completion)
                                .map(|c| (peer.label(), c.text.clone()))
                        })
                        .collect();
                    (
                        PromptTemplate::round_two_system().to_string(),
                        PromptTemplate::round_two(&q, &peers),
                    )
                },
            )
            .await;
        builder
            .advance(DebatePhase::Round2Done)
            .map_err(RunDebateError::Session)?;

        // Moderator synthesis: one call over each member's final position
        // (round 2, falling back to round 1 when the rebuttal failed).
        builder
            .advance(DebatePhase::Moderating)
            .map_err(RunDebateError::Session)?;
        progress.on_stage_start(DebateStage::Moderation, 1);

        let positions: Vec<(String, String)> = council
            .members
            .iter()
            .filter_map(|member| {
                round2
                    .get(&member.name)
                    .and_then(MemberSlot::completion)
                    .or_else(|| round1.get(&member.name).and_then(MemberSlot::completion))
                    .map(|c| (member.label(), c.text.clone()))
            })
            .collect();

        let moderator = &council.moderator;
        let request = GenerationRequest::for_member(
            moderator,
            PromptTemplate::moderator_system(),
            PromptTemplate::moderator(&q, &positions),
        );
        let slot = Self::call_with_timeout(&self.gateway, request, &moderator.name, timeout).await;
        progress.on_member_done(DebateStage::Moderation, &moderator.name, slot.is_success());
        progress.on_stage_complete(DebateStage::Moderation);
        if let Some(failure) = slot.failure() {
            warn!(kind = %failure.kind, "Moderator synthesis failed: {}", failure.message);
        }

        builder.record_round(round1);
        builder.record_round(round2);
        builder.record_moderator(RoundEntry {
            member: moderator.name.clone(),
            slot,
        });
        builder
            .advance(DebatePhase::Complete)
            .map_err(RunDebateError::Session)?;
        builder.finish().map_err(RunDebateError::Session)
    }

    /// Run one round: dispatch every member concurrently, wait for the
    /// slowest outcome, and reassemble slots in council order.
    async fn run_round<F>(
        &self,
        stage: DebateStage,
        members: &[CouncilMember],
        timeout: Duration,
        progress: &dyn ProgressNotifier,
        prompt_for: F,
    ) -> RoundOutcome
    where
        F: Fn(&CouncilMember) -> (String, String),
    {
        let round = stage.round().expect("moderation is not a round");
        info!(stage = %stage, calls = members.len(), "Dispatching round");
        progress.on_stage_start(stage, members.len());

        let mut join_set = JoinSet::new();
        for member in members {
            let gateway = Arc::clone(&self.gateway);
            let name = member.name.clone();
            let (system_prompt, user_prompt) = prompt_for(member);
            let request = GenerationRequest::for_member(member, system_prompt, user_prompt);
            join_set.spawn(async move {
                let slot = Self::call_with_timeout(&gateway, request, &name, timeout).await;
                (name, slot)
            });
        }

        // Collection happens in arrival order; presentation order is
        // restored below from the configured member list.
        let mut slots: HashMap<MemberName, MemberSlot> = HashMap::new();
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((name, slot)) => {
                    if let Some(failure) = slot.failure() {
                        warn!(member = %name, kind = %failure.kind, "Member failed: {}", failure.message);
                    } else {
                        debug!(member = %name, "Member responded");
                    }
                    progress.on_member_done(stage, &name, slot.is_success());
                    slots.insert(name, slot);
                }
                Err(e) => {
                    warn!("Member task join error: {e}");
                }
            }
        }

        let entries = members
            .iter()
            .map(|member| RoundEntry {
                member: member.name.clone(),
                slot: slots.remove(&member.name).unwrap_or_else(|| {
                    MemberSlot::Failed(FailureRecord::new(
                        FailureKind::Unknown,
                        "member task aborted before completing",
                        member.name.clone(),
                    ))
                }),
            })
            .collect();

        progress.on_stage_complete(stage);
        RoundOutcome::new(round, entries)
    }

    /// One provider call bounded by the per-call timeout; every outcome
    /// becomes a slot value, never an error crossing the round barrier.
    async fn call_with_timeout(
        gateway: &G,
        request: GenerationRequest,
        member: &MemberName,
        timeout: Duration,
    ) -> MemberSlot {
        match tokio::time::timeout(timeout, gateway.generate(request)).await {
            Ok(Ok(completion)) => MemberSlot::Completed(completion),
            Ok(Err(error)) => {
                MemberSlot::Failed(FailureRecord::new(error.kind(), error.to_string(), member.clone()))
            }
            Err(_elapsed) => MemberSlot::Failed(FailureRecord::new(
                FailureKind::Timeout,
                format!("no response within {}s", timeout.as_secs()),
                member.clone(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use council_domain::{Completion, Provider, Round};
    use std::sync::Mutex;
    use tokio::time::Instant;

    // -- Scripted mock gateway -------------------------------------------------

    #[derive(Clone)]
    enum Behavior {
        Reply(&'static str),
        Fail(ProviderError),
        Slow(Duration, &'static str),
        /// Succeed in round 1, fail in the rebuttal round
        FailRebuttal(&'static str),
    }

    struct MockGateway {
        behaviors: HashMap<String, Behavior>,
        requests: Mutex<Vec<GenerationRequest>>,
    }

    impl MockGateway {
        fn new(behaviors: Vec<(&str, Behavior)>) -> Arc<Self> {
            Arc::new(Self {
                behaviors: behaviors
                    .into_iter()
                    .map(|(model, b)| (model.to_string(), b))
                    .collect(),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<GenerationRequest> {
            self.requests.lock().unwrap().clone()
        }

        fn rebuttal_requests(&self) -> Vec<GenerationRequest> {
            self.requests()
                .into_iter()
                .filter(|r| r.system_prompt == PromptTemplate::round_two_system())
                .collect()
        }
    }

    #[async_trait]
    impl LlmGateway for MockGateway {
        async fn generate(
            &self,
            request: GenerationRequest,
        ) -> Result<Completion, ProviderError> {
            self.requests.lock().unwrap().push(request.clone());
            let behavior = self
                .behaviors
                .get(&request.model)
                .cloned()
                .unwrap_or(Behavior::Fail(ProviderError::Unknown("unscripted".into())));
            match behavior {
                Behavior::Reply(text) => Ok(Completion::new(text)),
                Behavior::Fail(error) => Err(error),
                Behavior::Slow(delay, text) => {
                    tokio::time::sleep(delay).await;
                    Ok(Completion::new(text))
                }
                Behavior::FailRebuttal(round_one_text) => {
                    if request.system_prompt == PromptTemplate::round_two_system() {
                        Err(ProviderError::Unknown("rebuttal refused".into()))
                    } else {
                        Ok(Completion::new(round_one_text))
                    }
                }
            }
        }
    }

    // -- Helpers ---------------------------------------------------------------

    fn member(name: &str) -> CouncilMember {
        CouncilMember::new(name, Provider::OpenAi, format!("{name}-model"))
    }

    fn council(names: &[&str]) -> CouncilConfig {
        CouncilConfig::new(
            names.iter().map(|n| member(n)).collect(),
            member("moderator"),
        )
        .with_per_call_timeout(Duration::from_secs(60))
    }

    fn input(names: &[&str]) -> RunDebateInput {
        RunDebateInput::new("Which database should we pick?", council(names))
    }

    fn round_members(record: &SessionRecord, round: Round) -> Vec<String> {
        record
            .round(round)
            .unwrap()
            .entries
            .iter()
            .map(|e| e.member.to_string())
            .collect()
    }

    // -- Tests -----------------------------------------------------------------

    #[tokio::test]
    async fn round_one_has_exactly_one_slot_per_member() {
        let gateway = MockGateway::new(vec![
            ("a-model", Behavior::Reply("a says")),
            ("b-model", Behavior::Fail(ProviderError::RateLimit("429".into()))),
            ("c-model", Behavior::Reply("c says")),
            ("moderator-model", Behavior::Reply("verdict")),
        ]);
        let record = RunDebateUseCase::new(gateway)
            .execute(input(&["a", "b", "c"]))
            .await
            .unwrap();

        let round1 = record.round(Round::One).unwrap();
        assert_eq!(round1.entries.len(), 3);
        assert_eq!(round_members(&record, Round::One), ["a", "b", "c"]);
        assert_eq!(
            round1.get(&MemberName::new("b")).unwrap().failure().unwrap().kind,
            FailureKind::RateLimit
        );
    }

    #[tokio::test]
    async fn failed_member_is_excluded_from_round_two_entirely() {
        let gateway = MockGateway::new(vec![
            ("a-model", Behavior::Reply("a position")),
            ("b-model", Behavior::Fail(ProviderError::Auth("no key".into()))),
            ("c-model", Behavior::Reply("c position")),
            ("moderator-model", Behavior::Reply("verdict")),
        ]);
        let record = RunDebateUseCase::new(Arc::clone(&gateway))
            .execute(input(&["a", "b", "c"]))
            .await
            .unwrap();

        // No round 2 slot for the failed member
        assert_eq!(round_members(&record, Round::Two), ["a", "c"]);

        // And no rebuttal prompt mentions it
        let rebuttals = gateway.rebuttal_requests();
        assert_eq!(rebuttals.len(), 2);
        for request in &rebuttals {
            assert!(!request.user_prompt.contains("b:"));
            assert!(!request.user_prompt.contains("b-model"));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn presentation_order_is_council_order_not_arrival_order() {
        // c is configured last but completes first
        let gateway = MockGateway::new(vec![
            ("a-model", Behavior::Slow(Duration::from_secs(5), "a says")),
            ("b-model", Behavior::Slow(Duration::from_secs(3), "b says")),
            ("c-model", Behavior::Reply("c says")),
            ("moderator-model", Behavior::Reply("verdict")),
        ]);
        let record = RunDebateUseCase::new(gateway)
            .execute(input(&["a", "b", "c"]))
            .await
            .unwrap();

        assert_eq!(round_members(&record, Round::One), ["a", "b", "c"]);
        assert_eq!(round_members(&record, Round::Two), ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn all_members_failing_round_one_is_fatal() {
        let gateway = MockGateway::new(vec![
            ("a-model", Behavior::Fail(ProviderError::Timeout("t".into()))),
            ("b-model", Behavior::Fail(ProviderError::Unknown("boom".into()))),
            ("moderator-model", Behavior::Reply("never reached")),
        ]);
        let result = RunDebateUseCase::new(Arc::clone(&gateway))
            .execute(input(&["a", "b"]))
            .await;

        assert!(matches!(result, Err(RunDebateError::AllMembersFailed)));
        // The moderator was never consulted
        assert!(
            gateway
                .requests()
                .iter()
                .all(|r| r.model != "moderator-model")
        );
    }

    #[tokio::test]
    async fn lone_survivor_still_debates_and_gets_moderated() {
        let gateway = MockGateway::new(vec![
            ("a-model", Behavior::Reply("a stands alone")),
            ("b-model", Behavior::Fail(ProviderError::Unknown("down".into()))),
            ("c-model", Behavior::Fail(ProviderError::Unknown("down".into()))),
            ("moderator-model", Behavior::Reply("verdict")),
        ]);
        let record = RunDebateUseCase::new(Arc::clone(&gateway))
            .execute(input(&["a", "b", "c"]))
            .await
            .unwrap();

        assert_eq!(round_members(&record, Round::Two), ["a"]);
        let rebuttals = gateway.rebuttal_requests();
        assert_eq!(rebuttals.len(), 1);
        assert!(
            rebuttals[0]
                .user_prompt
                .contains("no other council responses were available")
        );
        assert_eq!(record.synthesis().unwrap().text, "verdict");
    }

    #[tokio::test]
    async fn rebuttal_prompt_embeds_labeled_peer_answers_only() {
        let gateway = MockGateway::new(vec![
            ("m-model", Behavior::Reply("m unique position")),
            ("x-model", Behavior::Reply("x unique position")),
            ("y-model", Behavior::Reply("y unique position")),
            ("moderator-model", Behavior::Reply("verdict")),
        ]);
        RunDebateUseCase::new(Arc::clone(&gateway))
            .execute(input(&["m", "x", "y"]))
            .await
            .unwrap();

        let m_rebuttal = gateway
            .rebuttal_requests()
            .into_iter()
            .find(|r| r.model == "m-model")
            .unwrap();
        assert!(m_rebuttal.user_prompt.contains("x:x-model: x unique position"));
        assert!(m_rebuttal.user_prompt.contains("y:y-model: y unique position"));
        assert!(!m_rebuttal.user_prompt.contains("m unique position"));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_member_times_out_without_blocking_the_round() {
        let gateway = MockGateway::new(vec![
            ("a-model", Behavior::Slow(Duration::from_secs(300), "too late")),
            ("b-model", Behavior::Reply("on time")),
            ("moderator-model", Behavior::Reply("verdict")),
        ]);
        let started = Instant::now();
        let record = RunDebateUseCase::new(gateway)
            .execute(input(&["a", "b"]))
            .await
            .unwrap();

        let round1 = record.round(Round::One).unwrap();
        let a_failure = round1.get(&MemberName::new("a")).unwrap().failure().unwrap();
        assert_eq!(a_failure.kind, FailureKind::Timeout);
        assert!(round1.get(&MemberName::new("b")).unwrap().is_success());

        // The round barrier waited for the timeout, not the 300s sleep
        assert!(started.elapsed() < Duration::from_secs(300));
        assert!(started.elapsed() >= Duration::from_secs(60));
    }

    #[tokio::test]
    async fn moderator_failure_preserves_round_data() {
        let gateway = MockGateway::new(vec![
            ("a-model", Behavior::Reply("a says")),
            ("b-model", Behavior::Reply("b says")),
            (
                "moderator-model",
                Behavior::Fail(ProviderError::RateLimit("slow down".into())),
            ),
        ]);
        let record = RunDebateUseCase::new(gateway)
            .execute(input(&["a", "b"]))
            .await
            .unwrap();

        assert!(record.synthesis().is_none());
        assert_eq!(
            record.moderator.slot.failure().unwrap().kind,
            FailureKind::RateLimit
        );
        assert_eq!(record.round(Round::One).unwrap().success_count(), 2);
        assert_eq!(record.round(Round::Two).unwrap().success_count(), 2);
    }

    #[tokio::test]
    async fn moderator_prompt_falls_back_to_round_one_text() {
        let gateway = MockGateway::new(vec![
            ("a-model", Behavior::Reply("a final")),
            ("b-model", Behavior::FailRebuttal("b round one stance")),
            ("moderator-model", Behavior::Reply("verdict")),
        ]);
        RunDebateUseCase::new(Arc::clone(&gateway))
            .execute(input(&["a", "b"]))
            .await
            .unwrap();

        let moderator_request = gateway
            .requests()
            .into_iter()
            .find(|r| r.model == "moderator-model")
            .unwrap();
        assert!(moderator_request.user_prompt.contains("b round one stance"));
    }

    #[tokio::test]
    async fn empty_council_is_rejected_before_any_call() {
        let gateway = MockGateway::new(vec![]);
        let result = RunDebateUseCase::new(Arc::clone(&gateway))
            .execute(input(&[]))
            .await;
        assert!(matches!(result, Err(RunDebateError::NoMembers)));
        assert!(gateway.requests().is_empty());
    }

    #[tokio::test]
    async fn session_record_is_stamped_and_identified() {
        let gateway = MockGateway::new(vec![
            ("a-model", Behavior::Reply("a says")),
            ("moderator-model", Behavior::Reply("verdict")),
        ]);
        let record = RunDebateUseCase::new(gateway)
            .execute(input(&["a"]))
            .await
            .unwrap();

        assert!(!record.id.as_str().is_empty());
        assert!(record.started_at.ends_with('Z'));
        assert_eq!(record.rounds.len(), 2);
    }
}
