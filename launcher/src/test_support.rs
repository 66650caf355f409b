//! Test-only helpers: scripted step runner, recording console and a scratch
//! project directory.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};

use crate::core::types::{StepOutcome, StepStatus};
use crate::io::config::LauncherConfig;
use crate::io::console::Console;
use crate::io::steps::{StepRequest, StepRunner};

/// One queued response of a [`ScriptedStepRunner`].
#[derive(Debug, Clone)]
pub enum ScriptedStep {
    Outcome(StepOutcome),
    /// The runner itself fails with this message.
    RunnerError(String),
}

impl ScriptedStep {
    pub fn ok() -> Self {
        Self::Outcome(StepOutcome::new(StepStatus::Succeeded))
    }

    pub fn exit(code: i32) -> Self {
        Self::Outcome(StepOutcome::new(StepStatus::from_exit_code(Some(code))))
    }

    pub fn output(code: i32, output: &str) -> Self {
        Self::Outcome(StepOutcome::with_output(
            StepStatus::from_exit_code(Some(code)),
            output,
        ))
    }

    pub fn unavailable(reason: &str) -> Self {
        Self::Outcome(StepOutcome::new(StepStatus::Unavailable(reason.to_string())))
    }
}

/// Step runner that replays queued responses and records every request.
pub struct ScriptedStepRunner {
    queue: RefCell<VecDeque<ScriptedStep>>,
    requests: RefCell<Vec<StepRequest>>,
}

impl ScriptedStepRunner {
    pub fn new(steps: Vec<ScriptedStep>) -> Self {
        Self {
            queue: RefCell::new(steps.into()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<StepRequest> {
        self.requests.borrow().clone()
    }

    pub fn assert_drained(&self) -> Result<()> {
        let remaining = self.queue.borrow().len();
        if remaining > 0 {
            bail!("scripted runner has {remaining} unused responses");
        }
        Ok(())
    }
}

impl StepRunner for ScriptedStepRunner {
    fn run(&self, request: &StepRequest) -> Result<StepOutcome> {
        self.requests.borrow_mut().push(request.clone());
        let next = self
            .queue
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| anyhow!("no scripted response for stage {}", request.stage))?;
        match next {
            ScriptedStep::Outcome(outcome) => Ok(outcome),
            ScriptedStep::RunnerError(message) => Err(anyhow!(message)),
        }
    }
}

/// Console that records printed lines and pause prompts.
#[derive(Default)]
pub struct RecordingConsole {
    lines: RefCell<Vec<String>>,
    pauses: RefCell<usize>,
}

impl RecordingConsole {
    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    pub fn printed(&self, text: &str) -> bool {
        self.lines.borrow().iter().any(|line| line.contains(text))
    }

    pub fn pauses(&self) -> usize {
        *self.pauses.borrow()
    }
}

impl Console for RecordingConsole {
    fn say(&self, line: &str) -> Result<()> {
        self.lines.borrow_mut().push(line.to_string());
        Ok(())
    }

    fn pause(&self, prompt: &str) -> Result<()> {
        self.lines.borrow_mut().push(prompt.to_string());
        *self.pauses.borrow_mut() += 1;
        Ok(())
    }
}

/// Scratch project directory holding the files the launcher expects.
pub struct TestProject {
    temp: tempfile::TempDir,
}

impl TestProject {
    pub fn new() -> Result<Self> {
        let temp = tempfile::tempdir().context("create tempdir")?;
        let root = temp.path();
        fs::write(root.join("requirements.txt"), "flask\nflask_sqlalchemy\n")
            .context("write requirements.txt")?;
        fs::write(root.join("seed_db.py"), "print('seed')\n").context("write seed_db.py")?;
        fs::write(root.join("app.py"), "print('app')\n").context("write app.py")?;
        Ok(Self { temp })
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    /// Default config pointed at this project, without the final pause.
    pub fn config(&self) -> LauncherConfig {
        LauncherConfig {
            project_dir: self.path().to_path_buf(),
            pause_on_exit: false,
            ..LauncherConfig::default()
        }
    }

    /// Write `launcher.toml` into the project.
    pub fn write_config(&self, contents: &str) -> Result<PathBuf> {
        let path = self.path().join("launcher.toml");
        fs::write(&path, contents).with_context(|| format!("write {}", path.display()))?;
        Ok(path)
    }

    /// Install fake `python` and `pip` scripts under `bin/`.
    ///
    /// Every invocation appends its arguments to `calls.log`. Exit codes are
    /// read from `FAKE_VERSION_EXIT`, `FAKE_PIP_EXIT`, `FAKE_SEED_EXIT` and
    /// `FAKE_APP_EXIT` (default 0). The fake app sleeps for `FAKE_APP_SLEEP`
    /// seconds (default 0) before exiting.
    #[cfg(unix)]
    pub fn install_fake_toolchain(&self) -> Result<PathBuf> {
        use std::os::unix::fs::PermissionsExt;

        let bin = self.path().join("bin");
        fs::create_dir_all(&bin).context("create bin dir")?;
        let log = self.calls_log();

        let python = format!(
            "#!/bin/sh\necho \"python $*\" >> \"{log}\"\ncase \"$1\" in\n  --version) echo \"Python 3.11.4\"; exit \"${{FAKE_VERSION_EXIT:-0}}\" ;;\n  seed_db.py) exit \"${{FAKE_SEED_EXIT:-0}}\" ;;\n  app.py) echo \"Running on http://127.0.0.1:5000\"; sleep \"${{FAKE_APP_SLEEP:-0}}\"; exit \"${{FAKE_APP_EXIT:-0}}\" ;;\nesac\nexit 0\n",
            log = log.display()
        );
        let pip = format!(
            "#!/bin/sh\necho \"pip $*\" >> \"{log}\"\nexit \"${{FAKE_PIP_EXIT:-0}}\"\n",
            log = log.display()
        );

        for (name, script) in [("python", python), ("pip", pip)] {
            let path = bin.join(name);
            fs::write(&path, script).with_context(|| format!("write {}", path.display()))?;
            let mut perms = fs::metadata(&path)
                .with_context(|| format!("stat {}", path.display()))?
                .permissions();
            perms.set_mode(0o755);
            fs::set_permissions(&path, perms)
                .with_context(|| format!("chmod {}", path.display()))?;
        }
        Ok(bin)
    }

    pub fn calls_log(&self) -> PathBuf {
        self.path().join("calls.log")
    }

    /// Lines of `calls.log`, empty if nothing ran.
    pub fn calls(&self) -> Result<Vec<String>> {
        let path = self.calls_log();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let contents =
            fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
        Ok(contents.lines().map(str::to_string).collect())
    }
}
