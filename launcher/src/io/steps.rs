//! Step runner abstraction.
//!
//! [`StepRunner`] decouples the launch sequence from actually spawning
//! processes. Tests use scripted runners that return predetermined outcomes.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};

use anyhow::Result;
use tracing::{debug, info, instrument, warn};

use crate::core::stage::Stage;
use crate::core::types::{StepOutcome, StepStatus};
use crate::io::process::{run_foreground, run_foreground_shielded, run_probe};

/// Bound on captured probe output per stream.
pub const PROBE_OUTPUT_LIMIT_BYTES: usize = 64 * 1024;

/// How a step's process is attached to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepMode {
    /// Capture stdout/stderr; nothing reaches the console.
    Probe,
    /// Share the launcher's console.
    Foreground,
    /// Share the console and survive Ctrl+C aimed at the child.
    Interactive,
}

/// One external command to run for a stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRequest {
    pub stage: Stage,
    pub program: String,
    pub args: Vec<OsString>,
    pub workdir: PathBuf,
    pub env: BTreeMap<String, String>,
    pub mode: StepMode,
}

impl StepRequest {
    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).current_dir(&self.workdir);
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        cmd
    }
}

/// Abstraction over how stage commands are executed.
pub trait StepRunner {
    /// Run the request. A non-zero exit is a `StepStatus`, not an error; errors
    /// are reserved for failures of the runner itself.
    fn run(&self, request: &StepRequest) -> Result<StepOutcome>;
}

/// Runner that spawns real processes.
pub struct SystemStepRunner;

impl StepRunner for SystemStepRunner {
    #[instrument(skip_all, fields(stage = %request.stage, program = %request.program))]
    fn run(&self, request: &StepRequest) -> Result<StepOutcome> {
        if !request.workdir.is_dir() {
            warn!(workdir = %request.workdir.display(), "working directory missing");
            return Ok(StepOutcome::new(StepStatus::Unavailable(format!(
                "working directory {} does not exist",
                request.workdir.display()
            ))));
        }

        info!(args = ?request.args, "running step");
        let outcome = match request.mode {
            StepMode::Probe => match run_probe(request.command(), PROBE_OUTPUT_LIMIT_BYTES) {
                Ok(output) => {
                    StepOutcome::with_output(status_of(output.status), output.combined_text())
                }
                Err(err) => unavailable(&err),
            },
            StepMode::Foreground => match run_foreground(request.command()) {
                Ok(status) => StepOutcome::new(status_of(status)),
                Err(err) => unavailable(&err),
            },
            StepMode::Interactive => match run_foreground_shielded(request.command()) {
                Ok(status) => StepOutcome::new(status_of(status)),
                Err(err) => unavailable(&err),
            },
        };

        debug!(status = %outcome.status, "step finished");
        Ok(outcome)
    }
}

fn status_of(status: ExitStatus) -> StepStatus {
    StepStatus::from_exit_code(status.code())
}

fn unavailable(err: &anyhow::Error) -> StepOutcome {
    warn!(err = %format!("{err:#}"), "step could not be started");
    StepOutcome::new(StepStatus::Unavailable(format!("{err:#}")))
}
