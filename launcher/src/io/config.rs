//! Launcher configuration stored in `launcher.toml`.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "LAUNCHER_CONFIG";
/// Config file looked up in the current directory when `LAUNCHER_CONFIG` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "launcher.toml";

/// Launcher configuration (TOML).
///
/// Every field is optional; a missing file behaves like an empty one. The
/// defaults launch `app.py` next to `requirements.txt` and `seed_db.py` with
/// whatever `python` and `pip` the path resolves.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LauncherConfig {
    /// Working directory for every step.
    pub project_dir: PathBuf,

    /// Interpreter program, resolved through the path.
    pub interpreter: String,

    /// Dependency manifest handed to the installer with `-r`.
    pub requirements: PathBuf,

    pub seed_script: PathBuf,

    pub app_script: PathBuf,

    /// Address announced before the application starts.
    pub app_url: String,

    /// Wait for Enter before the launcher exits.
    pub pause_on_exit: bool,

    pub installer: InstallerConfig,

    /// Extra environment for the seed and application steps (e.g. `DATABASE_URL`).
    pub env: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct InstallerConfig {
    /// Installer program and leading arguments (e.g. `["pip","install"]`).
    pub command: Vec<String>,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            command: vec!["pip".to_string(), "install".to_string()],
        }
    }
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            project_dir: PathBuf::from("."),
            interpreter: "python".to_string(),
            requirements: PathBuf::from("requirements.txt"),
            seed_script: PathBuf::from("seed_db.py"),
            app_script: PathBuf::from("app.py"),
            app_url: "http://localhost:5000".to_string(),
            pause_on_exit: true,
            installer: InstallerConfig::default(),
            env: BTreeMap::new(),
        }
    }
}

impl LauncherConfig {
    pub fn validate(&self) -> Result<()> {
        if self.interpreter.trim().is_empty() {
            return Err(anyhow!("interpreter must not be empty"));
        }
        if self.requirements.to_string_lossy().trim().is_empty() {
            return Err(anyhow!("requirements must not be empty"));
        }
        if self.seed_script.to_string_lossy().trim().is_empty() {
            return Err(anyhow!("seed_script must not be empty"));
        }
        if self.app_script.to_string_lossy().trim().is_empty() {
            return Err(anyhow!("app_script must not be empty"));
        }
        if self.app_url.trim().is_empty() {
            return Err(anyhow!("app_url must not be empty"));
        }
        if self.installer.command.is_empty() || self.installer.command[0].trim().is_empty() {
            return Err(anyhow!("installer.command must be a non-empty array"));
        }
        for key in self.env.keys() {
            if key.trim().is_empty() || key.contains('=') {
                return Err(anyhow!("env key {key:?} is not a valid variable name"));
            }
        }
        Ok(())
    }
}

/// Resolve which config file to read: `$LAUNCHER_CONFIG`, else `launcher.toml` in `cwd`.
pub fn config_path(cwd: &Path, env_override: Option<&str>) -> PathBuf {
    match env_override {
        Some(path) if !path.trim().is_empty() => cwd.join(path),
        _ => cwd.join(DEFAULT_CONFIG_FILE),
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `LauncherConfig::default()`. A relative
/// `project_dir` is resolved against `cwd`, wherever the config file lives.
pub fn load_config(path: &Path, cwd: &Path) -> Result<LauncherConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        let mut cfg = LauncherConfig::default();
        anchor_project_dir(&mut cfg, cwd);
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let mut cfg: LauncherConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    anchor_project_dir(&mut cfg, cwd);
    cfg.validate()
        .with_context(|| format!("invalid config {}", path.display()))?;
    debug!(path = %path.display(), project_dir = %cfg.project_dir.display(), "config loaded");
    Ok(cfg)
}

fn anchor_project_dir(cfg: &mut LauncherConfig, cwd: &Path) {
    if cfg.project_dir.is_relative() {
        cfg.project_dir = cwd.join(&cfg.project_dir);
    }
}
