//! Azure CLI runner
//!
//! Thin wrapper around `std::process::Command` for the `az` executable.
//! Every call blocks until `az` exits.

use std::ffi::OsStr;
use std::io::ErrorKind;
use std::process::{Command, Stdio};

use serde::de::DeserializeOwned;

use crate::error::{ScdeployError, ScdeployResult};

#[derive(Debug, Clone)]
pub struct AzCli {
    program: String,
}

impl AzCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Check if the Azure CLI is installed and runnable
    pub fn check_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    /// Run `az <args>` and return its stdout.
    pub fn run<S: AsRef<OsStr>>(&self, args: &[S]) -> ScdeployResult<String> {
        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.spawn_error(e))?;

        if !output.status.success() {
            return Err(ScdeployError::CommandFailed {
                command: self.describe(args),
                message: failure_message(&output.stderr, output.status.code()),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Run `az <args> --output json` and deserialize stdout.
    pub fn run_json<T, S>(&self, args: &[S]) -> ScdeployResult<T>
    where
        T: DeserializeOwned,
        S: AsRef<OsStr>,
    {
        let mut full: Vec<&OsStr> = args.iter().map(|a| a.as_ref()).collect();
        full.push(OsStr::new("--output"));
        full.push(OsStr::new("json"));
        full.push(OsStr::new("--only-show-errors"));

        let stdout = self.run(&full)?;
        serde_json::from_str(&stdout).map_err(|e| ScdeployError::UnexpectedOutput {
            command: self.describe(args),
            message: e.to_string(),
        })
    }

    /// Run with the terminal attached (used for `az login`, which may
    /// open a browser or print a device code).
    ///
    /// The child's stdout goes to our stderr: stdout carries the event
    /// stream and must stay machine readable.
    pub fn run_attached<S: AsRef<OsStr>>(&self, args: &[S]) -> ScdeployResult<()> {
        let status = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::from(std::io::stderr()))
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| self.spawn_error(e))?;

        if !status.success() {
            return Err(ScdeployError::CommandFailed {
                command: self.describe(args),
                message: format!("exited with code {:?}", status.code()),
            });
        }
        Ok(())
    }

    fn spawn_error(&self, e: std::io::Error) -> ScdeployError {
        if e.kind() == ErrorKind::NotFound {
            ScdeployError::CommandNotFound {
                program: self.program.clone(),
            }
        } else {
            ScdeployError::Io(e)
        }
    }

    /// `az group exists` style label for error messages. Only the
    /// subcommand words are included so values never leak into errors.
    fn describe<S: AsRef<OsStr>>(&self, args: &[S]) -> String {
        let words: Vec<String> = args
            .iter()
            .map(|a| a.as_ref().to_string_lossy().into_owned())
            .take_while(|a| !a.starts_with('-'))
            .collect();
        if words.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, words.join(" "))
        }
    }
}

impl Default for AzCli {
    fn default() -> Self {
        Self::new("az")
    }
}

fn failure_message(stderr: &[u8], code: Option<i32>) -> String {
    let text = String::from_utf8_lossy(stderr);
    let text = text.trim();
    if text.is_empty() {
        format!("exited with code {:?}", code)
    } else {
        text.to_string()
    }
}
