//! Launch stages and the transition table between them.
//!
//! The launch is a straight line: `CheckInterpreter -> InstallDeps -> SeedDb ->
//! RunApp -> Pause`. The only branch is the early abort taken when a fatal stage
//! fails.

use std::fmt;

use crate::core::types::StepStatus;

/// One state of the launch sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    CheckInterpreter,
    InstallDeps,
    SeedDb,
    RunApp,
    Pause,
}

/// What a stage failure means for the rest of the launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Print the error and abort the launch.
    Fatal,
    /// Print a warning and keep going.
    Warn,
    /// Keep going without comment.
    Proceed,
}

/// Result of feeding a stage's status into the transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Advance(Stage),
    Abort,
    Finish,
}

impl Stage {
    pub const FIRST: Stage = Stage::CheckInterpreter;

    /// Every stage in execution order.
    pub const ORDER: [Stage; 5] = [
        Stage::CheckInterpreter,
        Stage::InstallDeps,
        Stage::SeedDb,
        Stage::RunApp,
        Stage::Pause,
    ];

    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::CheckInterpreter => Some(Stage::InstallDeps),
            Stage::InstallDeps => Some(Stage::SeedDb),
            Stage::SeedDb => Some(Stage::RunApp),
            Stage::RunApp => Some(Stage::Pause),
            Stage::Pause => None,
        }
    }

    /// `None` for `Pause`, which runs nothing and cannot fail.
    pub fn failure_policy(self) -> Option<FailurePolicy> {
        match self {
            Stage::CheckInterpreter | Stage::InstallDeps => Some(FailurePolicy::Fatal),
            Stage::SeedDb => Some(FailurePolicy::Warn),
            Stage::RunApp => Some(FailurePolicy::Proceed),
            Stage::Pause => None,
        }
    }

    /// Progress numbering (`[n/total]`) for the working stages.
    pub fn banner_step(self) -> Option<(u8, u8)> {
        match self {
            Stage::CheckInterpreter => Some((1, 4)),
            Stage::InstallDeps => Some((2, 4)),
            Stage::SeedDb => Some((3, 4)),
            Stage::RunApp => Some((4, 4)),
            Stage::Pause => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::CheckInterpreter => "check_interpreter",
            Stage::InstallDeps => "install_deps",
            Stage::SeedDb => "seed_db",
            Stage::RunApp => "run_app",
            Stage::Pause => "pause",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decide where the launch goes after `stage` finished with `status`.
pub fn transition(stage: Stage, status: &StepStatus) -> Transition {
    let Some(next) = stage.next() else {
        return Transition::Finish;
    };
    if status.success() {
        return Transition::Advance(next);
    }
    match stage.failure_policy() {
        Some(FailurePolicy::Fatal) => Transition::Abort,
        Some(FailurePolicy::Warn | FailurePolicy::Proceed) | None => Transition::Advance(next),
    }
}
