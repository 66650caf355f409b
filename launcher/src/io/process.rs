//! Helpers for running child processes: short captured probes and long-running
//! foreground programs.

use std::io::Read;
use std::process::{Command, ExitStatus, Stdio};
use std::thread;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, error, info, instrument, warn};

/// Captured output of a probe command.
#[derive(Debug)]
pub struct ProbeOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub truncated: usize,
}

impl ProbeOutput {
    /// Stdout followed by stderr, lossily decoded.
    pub fn combined_text(&self) -> String {
        let mut text = String::from_utf8_lossy(&self.stdout).into_owned();
        if !self.stderr.is_empty() {
            if !text.is_empty() && !text.ends_with('\n') {
                text.push('\n');
            }
            text.push_str(&String::from_utf8_lossy(&self.stderr));
        }
        text
    }
}

/// Run a command to completion and capture stdout/stderr without risking pipe deadlocks.
///
/// Both pipes are drained on reader threads while the child runs.
/// `output_limit_bytes` bounds what is kept per stream; the rest is discarded.
#[instrument(skip_all, fields(output_limit_bytes = output_limit_bytes))]
pub fn run_probe(mut cmd: Command, output_limit_bytes: usize) -> Result<ProbeOutput> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    debug!(program = ?cmd.get_program(), "spawning probe");
    let mut child = match cmd.spawn() {
        Ok(c) => c,
        Err(e) => {
            error!(err = %e, "failed to spawn probe");
            return Err(e).context("spawn probe");
        }
    };

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| anyhow!("stdout was not piped"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| anyhow!("stderr was not piped"))?;

    let stdout_handle = thread::spawn(move || read_stream_limited(stdout, output_limit_bytes));
    let stderr_handle = thread::spawn(move || read_stream_limited(stderr, output_limit_bytes));

    let status = child.wait().context("wait for probe")?;

    let (stdout, stdout_truncated) = join_output(stdout_handle).context("join stdout")?;
    let (stderr, stderr_truncated) = join_output(stderr_handle).context("join stderr")?;
    let truncated = stdout_truncated + stderr_truncated;
    if truncated > 0 {
        warn!(truncated, "probe output truncated");
    }

    debug!(exit_code = ?status.code(), "probe finished");
    Ok(ProbeOutput {
        status,
        stdout,
        stderr,
        truncated,
    })
}

/// Run a command with the launcher's own stdio and block until it exits.
#[instrument(skip_all)]
pub fn run_foreground(mut cmd: Command) -> Result<ExitStatus> {
    cmd.stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    debug!(program = ?cmd.get_program(), "spawning foreground process");
    let mut child = match cmd.spawn() {
        Ok(c) => c,
        Err(e) => {
            error!(err = %e, "failed to spawn command");
            return Err(e).context("spawn command");
        }
    };
    let status = child.wait().context("wait for command")?;
    debug!(exit_code = ?status.code(), "foreground process finished");
    Ok(status)
}

/// Like [`run_foreground`], but Ctrl+C does not terminate the launcher.
///
/// The terminal delivers the interrupt to the child as well; the launcher logs
/// it and keeps waiting until the child has actually exited.
#[instrument(skip_all)]
pub fn run_foreground_shielded(cmd: Command) -> Result<ExitStatus> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("build runtime")?;
    runtime.block_on(wait_shielded(cmd))
}

async fn wait_shielded(mut cmd: Command) -> Result<ExitStatus> {
    cmd.stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    debug!(program = ?cmd.get_program(), "spawning shielded foreground process");
    let mut child = match tokio::process::Command::from(cmd).spawn() {
        Ok(c) => c,
        Err(e) => {
            error!(err = %e, "failed to spawn command");
            return Err(e).context("spawn command");
        }
    };

    loop {
        tokio::select! {
            status = child.wait() => {
                let status = status.context("wait for command")?;
                debug!(exit_code = ?status.code(), "foreground process finished");
                return Ok(status);
            }
            signal = tokio::signal::ctrl_c() => {
                match signal {
                    Ok(()) => info!("interrupt received, waiting for child to exit"),
                    Err(e) => {
                        // Without a handler the launcher cannot be shielded; just wait.
                        warn!(err = %e, "failed to listen for interrupts");
                        let status = child.wait().await.context("wait for command")?;
                        return Ok(status);
                    }
                }
            }
        }
    }
}

fn join_output(handle: thread::JoinHandle<Result<(Vec<u8>, usize)>>) -> Result<(Vec<u8>, usize)> {
    match handle.join() {
        Ok(result) => result,
        Err(_) => Err(anyhow!("output reader thread panicked")),
    }
}

fn read_stream_limited<R: Read>(mut reader: R, limit: usize) -> Result<(Vec<u8>, usize)> {
    let mut buf = Vec::new();
    let mut truncated = 0usize;
    let mut chunk = [0u8; 8192];

    loop {
        let n = reader.read(&mut chunk).context("read output")?;
        if n == 0 {
            break;
        }
        let remaining = limit.saturating_sub(buf.len());
        if remaining > 0 {
            let keep = n.min(remaining);
            buf.extend_from_slice(&chunk[..keep]);
            truncated += n.saturating_sub(keep);
        } else {
            truncated += n;
        }
    }

    Ok((buf, truncated))
}
