//! Test environment for running the scdeploy binary in isolation.
//!
//! Provides `TestEnv` - a temp project directory plus helpers to run
//! scdeploy with a clean, deterministic environment.

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

/// Result of running a scdeploy CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as NDJSON events
    pub fn events(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| {
                serde_json::from_str(l)
                    .unwrap_or_else(|e| panic!("not a JSON event ({}): {}", e, l))
            })
            .collect()
    }

    pub fn events_named(&self, name: &str) -> Vec<serde_json::Value> {
        self.events()
            .into_iter()
            .filter(|e| e["event"] == name)
            .collect()
    }
}

/// Isolated project directory
pub struct TestEnv {
    pub project_root: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            project_root: tempfile::tempdir().expect("Failed to create temp dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_scdeploy")),
        }
    }

    /// Get path relative to project root
    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Write a file to the project directory
    pub fn write_project_file(&self, relative_path: &str, content: &str) {
        let full_path = self.project_path(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
    }

    pub fn read_project_file(&self, relative_path: &str) -> String {
        std::fs::read_to_string(self.project_path(relative_path))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative_path, e))
    }

    /// Run scdeploy from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        self.run_with_stdin(args, env_vars, None)
    }

    pub fn run_with_stdin(
        &self,
        args: &[&str],
        env_vars: &[(&str, &str)],
        stdin: Option<&Path>,
    ) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.project_root.path())
            .args(args)
            .env("SCDEPLOY_USER_CONFIG", self.project_path(".no-user-config.toml"))
            .env("SCDEPLOY_NO_COLOR", "1")
            .env("LC_ALL", "C")
            .env_remove("SCDEPLOY_SUBSCRIPTION_ID")
            .env_remove("SCDEPLOY_ACCOUNT_PASSWORD")
            .env_remove("SCDEPLOY_SLOT")
            .env_remove("SCDEPLOY_GAS")
            .env_remove("SCDEPLOY_CONTRACT_PROGRAM")
            .env_remove("SCDEPLOY_READINESS_ATTEMPTS")
            .env_remove("SCDEPLOY_COLOR");

        match stdin {
            Some(path) => {
                let file = std::fs::File::open(path).expect("Failed to open stdin file");
                cmd.stdin(Stdio::from(file));
            }
            None => {
                cmd.stdin(Stdio::null());
            }
        }

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute scdeploy");
        output_to_result(output)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
