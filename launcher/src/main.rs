//! Wine Dental Attendance App launcher.
//!
//! Checks for Python, installs `requirements.txt`, seeds the database with
//! `seed_db.py` and runs `app.py` until it exits. Settings come from an
//! optional `launcher.toml` (or the file named by `LAUNCHER_CONFIG`).

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use launcher::exit_codes;
use launcher::io::config::{CONFIG_ENV, LauncherConfig, config_path, load_config};
use launcher::io::console::TerminalConsole;
use launcher::io::steps::SystemStepRunner;
use launcher::launch::run_launch;
use launcher::logging;

#[derive(Parser)]
#[command(
    name = "launcher",
    version,
    about = "Set up and start the Wine Dental Attendance App"
)]
struct Cli {}

fn main() {
    let _cli = Cli::parse();
    logging::init();

    let config = match load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::INVALID);
        }
    };

    match run_launch(&config, &SystemStepRunner, &TerminalConsole) {
        Ok(outcome) => {
            debug!(stages = ?outcome.stages(), result = ?outcome.result, "launch outcome");
            std::process::exit(outcome.exit_code());
        }
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::ABORTED);
        }
    }
}

fn load() -> Result<LauncherConfig> {
    let cwd = std::env::current_dir().context("resolve current directory")?;
    let env_override = std::env::var(CONFIG_ENV).ok();
    let path = config_path(&cwd, env_override.as_deref());
    load_config(&path, &cwd)
}
