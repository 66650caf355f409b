//! Fixed console text printed by the launcher.

use crate::core::stage::Stage;

pub const BANNER: &str = "==========================================\n   Wine Dental Attendance App - Launcher\n==========================================";

pub const INTERPRETER_MISSING: &str =
    "ERROR: Python is not installed or not found in PATH. Install Python 3 and run this launcher again.";

pub const INSTALL_FAILED: &str =
    "ERROR: Failed to install dependencies. Check requirements.txt and your network connection.";

pub const SEED_WARNING: &str =
    "WARNING: Database seeding failed (the database may already be seeded). Continuing...";

pub const STOP_HINT: &str = "Press Ctrl+C to stop the server.";

pub const APP_STOPPED: &str = "Application stopped.";

pub const PAUSE_PROMPT: &str = "Press Enter to close this window . . .";

/// Progress line announcing a working stage, e.g. `[2/4] Installing dependencies...`.
pub fn progress_line(stage: Stage, app_url: &str) -> Option<String> {
    let (step, total) = stage.banner_step()?;
    let action = match stage {
        Stage::CheckInterpreter => "Checking Python installation...".to_string(),
        Stage::InstallDeps => "Installing dependencies...".to_string(),
        Stage::SeedDb => "Seeding database...".to_string(),
        Stage::RunApp => format!("Starting application at {app_url} ..."),
        Stage::Pause => return None,
    };
    Some(format!("[{step}/{total}] {action}"))
}

pub fn interpreter_found(version: &str) -> String {
    format!("Found Python {version}")
}

/// Error text printed when a fatal stage fails.
pub fn fatal_message(stage: Stage) -> Option<&'static str> {
    match stage {
        Stage::CheckInterpreter => Some(INTERPRETER_MISSING),
        Stage::InstallDeps => Some(INSTALL_FAILED),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_line_numbers_steps() {
        assert_eq!(
            progress_line(Stage::InstallDeps, "http://localhost:5000").as_deref(),
            Some("[2/4] Installing dependencies...")
        );
        assert_eq!(
            progress_line(Stage::RunApp, "http://localhost:5000").as_deref(),
            Some("[4/4] Starting application at http://localhost:5000 ...")
        );
        assert_eq!(progress_line(Stage::Pause, "http://localhost:5000"), None);
    }

    #[test]
    fn only_fatal_stages_have_fatal_messages() {
        assert!(fatal_message(Stage::CheckInterpreter).is_some());
        assert!(fatal_message(Stage::InstallDeps).is_some());
        assert!(fatal_message(Stage::SeedDb).is_none());
        assert!(fatal_message(Stage::RunApp).is_none());
    }
}
