//! Value types shared between the launch orchestration and step runners.

use std::fmt;

use crate::core::stage::Stage;

/// How an external step ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    /// Exit status zero.
    Succeeded,
    /// Non-zero exit. `None` when the process was terminated by a signal.
    Failed(Option<i32>),
    /// The program could not be started at all (missing binary, bad workdir, ...).
    Unavailable(String),
}

impl StepStatus {
    pub fn success(&self) -> bool {
        matches!(self, StepStatus::Succeeded)
    }

    pub fn from_exit_code(code: Option<i32>) -> Self {
        match code {
            Some(0) => StepStatus::Succeeded,
            other => StepStatus::Failed(other),
        }
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepStatus::Succeeded => f.write_str("succeeded"),
            StepStatus::Failed(Some(code)) => write!(f, "exited with code {code}"),
            StepStatus::Failed(None) => f.write_str("terminated by signal"),
            StepStatus::Unavailable(reason) => write!(f, "unavailable: {reason}"),
        }
    }
}

/// Status plus any captured text (only probes capture output).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub status: StepStatus,
    pub output: String,
}

impl StepOutcome {
    pub fn new(status: StepStatus) -> Self {
        Self {
            status,
            output: String::new(),
        }
    }

    pub fn with_output(status: StepStatus, output: impl Into<String>) -> Self {
        Self {
            status,
            output: output.into(),
        }
    }
}

/// One executed stage, in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub stage: Stage,
    pub status: StepStatus,
}
