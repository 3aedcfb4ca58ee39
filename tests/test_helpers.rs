#![allow(dead_code)]

use assert_cmd::Command;
use std::path::Path;

/// Fixed reference instant used by the CLI tests (a Saturday).
pub const TEST_NOW: &str = "2024-06-15T12:00:00Z";

/// Creates a `Command` for the `til` binary with a clean environment and the
/// database pointed at `db_path`.
pub fn base_til_command(db_path: &Path) -> Command {
    let mut cmd = Command::cargo_bin("til").expect("til binary not built");
    configure_til_command(&mut cmd, db_path);
    cmd
}

/// Applies the standard non-interactive environment to an existing `Command`.
pub fn configure_til_command(cmd: &mut Command, db_path: &Path) {
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
        cmd.env("PATH", path);
    }
    if let Ok(tmpdir) = std::env::var("TMPDIR") {
        cmd.env("TMPDIR", tmpdir);
    }
    cmd.env("HOME", "/tmp")
        .env("TZ", "UTC")
        .env("TIL_DB", db_path)
        .env("TIL_LOG_LEVEL", "warn");
}

/// Runs `til --now TEST_NOW --json <args>` and parses stdout as JSON.
pub fn run_json(db_path: &Path, args: &[&str]) -> serde_json::Value {
    let output = base_til_command(db_path)
        .args(["--now", TEST_NOW, "--json"])
        .args(args)
        .output()
        .expect("failed to run til");
    assert!(
        output.status.success(),
        "til {:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}
