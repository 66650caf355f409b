//! Orchestration of a launch: interpreter check, dependency install, database
//! seed, application run, final pause.
//!
//! The sequence is driven by [`transition`]; this module only turns stages into
//! commands, runs them through a [`StepRunner`], and prints the fixed console
//! text through a [`Console`].

use std::collections::BTreeMap;
use std::ffi::OsString;

use anyhow::{Result, bail};
use tracing::{debug, info, warn};

use crate::core::messages;
use crate::core::stage::{Stage, Transition, transition};
use crate::core::types::{StepOutcome, StepRecord, StepStatus};
use crate::core::version::parse_version_banner;
use crate::exit_codes;
use crate::io::config::LauncherConfig;
use crate::io::console::Console;
use crate::io::steps::{StepMode, StepRequest, StepRunner};

/// How the launch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchResult {
    /// Every stage ran; the application has exited.
    Completed,
    /// A fatal stage failed and the launch stopped there.
    Aborted(Stage),
}

/// Structured launch outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOutcome {
    /// Executed stages in order (the pause is not recorded).
    pub steps: Vec<StepRecord>,
    pub result: LaunchResult,
}

impl LaunchOutcome {
    pub fn exit_code(&self) -> i32 {
        match self.result {
            LaunchResult::Completed => exit_codes::OK,
            LaunchResult::Aborted(_) => exit_codes::ABORTED,
        }
    }

    pub fn stages(&self) -> Vec<Stage> {
        self.steps.iter().map(|record| record.stage).collect()
    }
}

/// The external command a stage runs, or `None` for `Pause`.
pub fn build_request(stage: Stage, config: &LauncherConfig) -> Option<StepRequest> {
    let (program, args, env, mode) = match stage {
        Stage::CheckInterpreter => (
            config.interpreter.clone(),
            vec![OsString::from("--version")],
            BTreeMap::new(),
            StepMode::Probe,
        ),
        Stage::InstallDeps => {
            let (program, leading) = config.installer.command.split_first()?;
            let mut args: Vec<OsString> = leading.iter().map(OsString::from).collect();
            args.push(OsString::from("-r"));
            args.push(config.requirements.clone().into_os_string());
            (program.clone(), args, BTreeMap::new(), StepMode::Foreground)
        }
        Stage::SeedDb => (
            config.interpreter.clone(),
            vec![config.seed_script.clone().into_os_string()],
            config.env.clone(),
            StepMode::Foreground,
        ),
        Stage::RunApp => (
            config.interpreter.clone(),
            vec![config.app_script.clone().into_os_string()],
            config.env.clone(),
            StepMode::Interactive,
        ),
        Stage::Pause => return None,
    };
    Some(StepRequest {
        stage,
        program,
        args,
        workdir: config.project_dir.clone(),
        env,
        mode,
    })
}

/// Run the whole launch sequence.
///
/// Step failures never surface as `Err`: they follow the stage's failure policy
/// and show up in the returned [`LaunchOutcome`]. `Err` means the console itself
/// failed.
pub fn run_launch<R: StepRunner, C: Console>(
    config: &LauncherConfig,
    runner: &R,
    console: &C,
) -> Result<LaunchOutcome> {
    console.say(messages::BANNER)?;

    let mut steps = Vec::new();
    let mut stage = Stage::FIRST;
    loop {
        let status = match stage {
            Stage::Pause => {
                if config.pause_on_exit {
                    console.pause(messages::PAUSE_PROMPT)?;
                }
                StepStatus::Succeeded
            }
            _ => {
                let status = run_stage(stage, config, runner, console)?;
                steps.push(StepRecord {
                    stage,
                    status: status.clone(),
                });
                status
            }
        };

        match transition(stage, &status) {
            Transition::Advance(next) => {
                debug!(from = %stage, to = %next, "advancing");
                stage = next;
            }
            Transition::Abort => {
                warn!(stage = %stage, status = %status, "launch aborted");
                if config.pause_on_exit {
                    console.pause(messages::PAUSE_PROMPT)?;
                }
                return Ok(LaunchOutcome {
                    steps,
                    result: LaunchResult::Aborted(stage),
                });
            }
            Transition::Finish => {
                info!("launch finished");
                return Ok(LaunchOutcome {
                    steps,
                    result: LaunchResult::Completed,
                });
            }
        }
    }
}

fn run_stage<R: StepRunner, C: Console>(
    stage: Stage,
    config: &LauncherConfig,
    runner: &R,
    console: &C,
) -> Result<StepStatus> {
    if let Some(line) = messages::progress_line(stage, &config.app_url) {
        console.say(&line)?;
    }
    if stage == Stage::RunApp {
        console.say(messages::STOP_HINT)?;
    }

    let Some(request) = build_request(stage, config) else {
        bail!("no command configured for stage {stage}");
    };
    let outcome = runner.run(&request).unwrap_or_else(|err| {
        warn!(stage = %stage, err = %format!("{err:#}"), "step runner failed");
        StepOutcome::new(StepStatus::Unavailable(format!("{err:#}")))
    });
    info!(stage = %stage, status = %outcome.status, "stage finished");

    match stage {
        Stage::CheckInterpreter if outcome.status.success() => {
            if let Some(version) = parse_version_banner(&outcome.output) {
                console.say(&messages::interpreter_found(&version))?;
            }
        }
        Stage::SeedDb if !outcome.status.success() => {
            console.say(messages::SEED_WARNING)?;
        }
        Stage::RunApp => {
            console.say(messages::APP_STOPPED)?;
        }
        _ => {}
    }
    if !outcome.status.success()
        && let Some(message) = messages::fatal_message(stage)
    {
        console.say(message)?;
    }

    Ok(outcome.status)
}
