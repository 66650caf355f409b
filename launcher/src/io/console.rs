//! Operator-facing console: printed lines and the final acknowledgment pause.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

/// Abstraction over the interactive console.
pub trait Console {
    /// Print one line of operator-facing text.
    fn say(&self, line: &str) -> Result<()>;

    /// Print `prompt` and block until the operator acknowledges it.
    fn pause(&self, prompt: &str) -> Result<()>;
}

/// Console backed by the process's stdout and stdin.
pub struct TerminalConsole;

impl Console for TerminalConsole {
    fn say(&self, line: &str) -> Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{line}").context("write stdout")?;
        out.flush().context("flush stdout")?;
        Ok(())
    }

    fn pause(&self, prompt: &str) -> Result<()> {
        prompt_and_wait(prompt, io::stdin().lock(), io::stdout().lock())
    }
}

/// Print `prompt`, wait for a line on `input`, then end the prompt line.
fn prompt_and_wait<R: BufRead, W: Write>(prompt: &str, input: R, mut out: W) -> Result<()> {
    write!(out, "{prompt}").context("write stdout")?;
    out.flush().context("flush stdout")?;
    wait_for_line(input)?;
    writeln!(out).context("write stdout")?;
    out.flush().context("flush stdout")?;
    Ok(())
}

/// Block until one line (or EOF) is read. EOF counts as acknowledgment so a
/// launcher without a terminal attached does not hang.
fn wait_for_line<R: BufRead>(mut input: R) -> Result<()> {
    let mut line = String::new();
    input.read_line(&mut line).context("read stdin")?;
    Ok(())
}
