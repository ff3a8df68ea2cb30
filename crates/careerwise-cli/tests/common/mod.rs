//! Common utilities for CLI E2E tests.

use std::io::Write;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

/// Backend address that refuses connections.
pub const UNREACHABLE_API: &str = "http://127.0.0.1:1/api/v1";

/// A CLI sandbox with its own data directory.
pub struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp data dir"),
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_careerwise"));
        cmd.args(args)
            .env("CAREERWISE_DATA_DIR", self.dir.path())
            .env("CAREERWISE_API_BASE_URL", UNREACHABLE_API)
            .env_remove("CAREERWISE_ENV")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Invoke a CLI command and return (stdout, stderr, exit code).
    pub fn run(&self, args: &[&str]) -> (String, String, i32) {
        let output = self
            .command(args)
            .output()
            .expect("Failed to execute CLI command");
        split(output)
    }

    /// Invoke a CLI command with `input` piped to stdin.
    pub fn run_with_input(&self, args: &[&str], input: &str) -> (String, String, i32) {
        let mut child = self
            .command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn CLI command");
        child
            .stdin
            .take()
            .expect("stdin is piped")
            .write_all(input.as_bytes())
            .expect("Failed to write stdin");
        split(child.wait_with_output().expect("Failed to wait for CLI"))
    }

    /// Invoke a CLI command and expect success.
    pub fn run_success(&self, args: &[&str]) -> String {
        let (stdout, stderr, code) = self.run(args);
        assert_eq!(code, 0, "CLI command failed: {args:?}\nstderr: {stderr}");
        stdout
    }

    /// Invoke a CLI command and expect failure.
    pub fn run_failure(&self, args: &[&str]) -> (String, String, i32) {
        let (stdout, stderr, code) = self.run(args);
        assert!(code != 0, "CLI command unexpectedly succeeded: {args:?}");
        (stdout, stderr, code)
    }
}

fn split(output: Output) -> (String, String, i32) {
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);
    (stdout, stderr, code)
}

/// Parse JSON output from CLI.
pub fn parse_json<T: for<'de> serde::Deserialize<'de>>(json: &str) -> T {
    serde_json::from_str(json).expect("Failed to parse JSON output")
}
