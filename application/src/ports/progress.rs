//! Progress notification port

use council_domain::{DebateStage, MemberName};

/// Callback for progress updates during a debate
///
/// Implementations must tolerate being called from the round executor's
/// collection loop in arrival order, which is non-deterministic.
pub trait ProgressNotifier: Send + Sync {
    /// Called when a stage starts
    fn on_stage_start(&self, stage: DebateStage, total_calls: usize);

    /// Called when one member's call resolves within a stage
    fn on_member_done(&self, stage: DebateStage, member: &MemberName, success: bool);

    /// Called when a stage completes
    fn on_stage_complete(&self, stage: DebateStage);
}

/// No-op progress notifier
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_stage_start(&self, _stage: DebateStage, _total_calls: usize) {}
    fn on_member_done(&self, _stage: DebateStage, _member: &MemberName, _success: bool) {}
    fn on_stage_complete(&self, _stage: DebateStage) {}
}
