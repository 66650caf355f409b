//! CLI tests for the launcher binary.
//!
//! Spawns the launcher against fake `python`/`pip` scripts on a private `PATH`
//! and verifies exit codes, console text and the order of invocations.

#![cfg(unix)]

use std::process::{Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use launcher::core::messages;
use launcher::exit_codes;
use launcher::test_support::TestProject;

fn launcher_command(project: &TestProject, envs: &[(&str, &str)]) -> Command {
    let bin = project.install_fake_toolchain().expect("fake toolchain");
    project
        .write_config("pause_on_exit = false\n")
        .expect("config");

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_launcher"));
    cmd.current_dir(project.path())
        .env("PATH", format!("{}:/bin:/usr/bin", bin.display()))
        .env_remove("LAUNCHER_CONFIG")
        .stdin(Stdio::null());
    for (key, value) in envs {
        cmd.env(key, value);
    }
    cmd
}

fn run_launcher(project: &TestProject, envs: &[(&str, &str)]) -> Output {
    launcher_command(project, envs).output().expect("run launcher")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn launch_runs_steps_in_order_and_exits_ok() {
    let project = TestProject::new().expect("project");
    let output = run_launcher(&project, &[]);

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let text = stdout(&output);
    assert!(text.contains("Found Python 3.11.4"));
    assert!(text.contains("Running on http://127.0.0.1:5000"));
    assert!(!text.contains(messages::SEED_WARNING));

    assert_eq!(
        project.calls().expect("calls"),
        vec![
            "python --version",
            "pip install -r requirements.txt",
            "python seed_db.py",
            "python app.py",
        ]
    );
}

#[test]
fn missing_interpreter_exits_aborted_without_installing() {
    let project = TestProject::new().expect("project");
    let output = run_launcher(&project, &[("FAKE_VERSION_EXIT", "1")]);

    assert_eq!(output.status.code(), Some(exit_codes::ABORTED));
    assert!(stdout(&output).contains(messages::INTERPRETER_MISSING));
    assert_eq!(project.calls().expect("calls"), vec!["python --version"]);
}

#[test]
fn install_failure_exits_aborted_without_seeding() {
    let project = TestProject::new().expect("project");
    let output = run_launcher(&project, &[("FAKE_PIP_EXIT", "1")]);

    assert_eq!(output.status.code(), Some(exit_codes::ABORTED));
    assert!(stdout(&output).contains(messages::INSTALL_FAILED));
    let calls = project.calls().expect("calls");
    assert_eq!(calls.len(), 2);
    assert!(calls.iter().all(|c| !c.contains("seed_db.py")));
}

#[test]
fn seed_failure_warns_and_app_crash_still_exits_ok() {
    let project = TestProject::new().expect("project");
    let output = run_launcher(&project, &[("FAKE_SEED_EXIT", "1"), ("FAKE_APP_EXIT", "3")]);

    assert_eq!(output.status.code(), Some(exit_codes::OK));
    let text = stdout(&output);
    assert!(text.contains(messages::SEED_WARNING));
    assert!(text.contains(messages::APP_STOPPED));
    assert_eq!(
        project.calls().expect("calls").last().map(String::as_str),
        Some("python app.py")
    );
}

/// Ctrl+C while the app runs reaches the launcher too; it must keep waiting for
/// the app and still finish normally.
#[test]
fn interrupt_during_app_run_is_survived() {
    let project = TestProject::new().expect("project");
    let child = launcher_command(&project, &[("FAKE_APP_SLEEP", "2")])
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn launcher");

    let deadline = Instant::now() + Duration::from_secs(20);
    while !project
        .calls()
        .expect("calls")
        .iter()
        .any(|c| c == "python app.py")
    {
        assert!(Instant::now() < deadline, "app step never started");
        thread::sleep(Duration::from_millis(20));
    }
    // Give the launcher time to start listening for interrupts.
    thread::sleep(Duration::from_millis(300));

    let status = Command::new("kill")
        .arg("-INT")
        .arg(child.id().to_string())
        .status()
        .expect("send SIGINT");
    assert!(status.success());

    let output = child.wait_with_output().expect("wait launcher");
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert!(stdout(&output).contains(messages::APP_STOPPED));
}

#[test]
fn invalid_config_exits_invalid() {
    let project = TestProject::new().expect("project");
    project
        .write_config("[installer]\ncommand = []\n")
        .expect("config");

    let output = Command::new(env!("CARGO_BIN_EXE_launcher"))
        .current_dir(project.path())
        .env_remove("LAUNCHER_CONFIG")
        .stdin(Stdio::null())
        .output()
        .expect("run launcher");

    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    assert!(String::from_utf8_lossy(&output.stderr).contains("installer.command"));
}
