//! Progress reporting for debate execution

use colored::Colorize;
use council_application::ports::progress::ProgressNotifier;
use council_domain::{DebateStage, MemberName};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports progress during a debate with progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    stage_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            stage_bar: Mutex::new(None),
        }
    }

    fn stage_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("=>-")
    }

    fn short_name(stage: DebateStage) -> &'static str {
        match stage {
            DebateStage::RoundOne => "Round 1",
            DebateStage::RoundTwo => "Round 2",
            DebateStage::Moderation => "Moderator",
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_stage_start(&self, stage: DebateStage, total_calls: usize) {
        let pb = self.multi.add(ProgressBar::new(total_calls as u64));
        pb.set_style(Self::stage_style());
        pb.set_prefix(stage.display_name());
        pb.set_message("Dispatching...");

        *self.stage_bar.lock().unwrap() = Some(pb);
    }

    fn on_member_done(&self, _stage: DebateStage, member: &MemberName, success: bool) {
        if let Some(pb) = self.stage_bar.lock().unwrap().as_ref() {
            let status = if success {
                format!("{} {}", "v".green(), member)
            } else {
                format!("{} {}", "x".red(), member)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_stage_complete(&self, stage: DebateStage) {
        if let Some(pb) = self.stage_bar.lock().unwrap().take() {
            let name = Self::short_name(stage);
            pb.finish_with_message(format!("{} complete", name.green()));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_stage_start(&self, stage: DebateStage, total_calls: usize) {
        println!(
            "{} {} ({} calls)",
            "->".cyan(),
            stage.display_name().bold(),
            total_calls
        );
    }

    fn on_member_done(&self, _stage: DebateStage, member: &MemberName, success: bool) {
        if success {
            println!("  {} {}", "v".green(), member);
        } else {
            println!("  {} {} (failed)", "x".red(), member);
        }
    }

    fn on_stage_complete(&self, _stage: DebateStage) {
        println!();
    }
}
