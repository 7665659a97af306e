//! JSON-RPC Readiness Probe
//!
//! Posts `eth_blockNumber` to the node with `curl`. The node counts as
//! ready once it answers with a `result`.

use std::io::ErrorKind;
use std::process::{Command, Stdio};
use std::time::Duration;

use serde_json::Value;

use crate::domain::ports::NodeProbe;
use crate::error::{ScdeployError, ScdeployResult};

const BLOCK_NUMBER_REQUEST: &str =
    r#"{"jsonrpc":"2.0","method":"eth_blockNumber","params":[],"id":1}"#;

#[derive(Debug, Clone)]
pub struct CurlRpcProbe {
    program: String,
    timeout: Duration,
}

impl CurlRpcProbe {
    pub fn new(timeout: Duration) -> Self {
        Self {
            program: "curl".to_string(),
            timeout,
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn check_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    fn args(&self, endpoint: &str) -> Vec<String> {
        vec![
            "--silent".to_string(),
            "--show-error".to_string(),
            "--max-time".to_string(),
            self.timeout.as_secs().max(1).to_string(),
            "--request".to_string(),
            "POST".to_string(),
            "--header".to_string(),
            "Content-Type: application/json".to_string(),
            "--data".to_string(),
            BLOCK_NUMBER_REQUEST.to_string(),
            endpoint.to_string(),
        ]
    }
}

impl Default for CurlRpcProbe {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

impl NodeProbe for CurlRpcProbe {
    fn is_ready(&self, rpc_endpoint: &str) -> ScdeployResult<bool> {
        let output = Command::new(&self.program)
            .args(self.args(rpc_endpoint))
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    ScdeployError::CommandNotFound {
                        program: self.program.clone(),
                    }
                } else {
                    ScdeployError::Io(e)
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ScdeployError::CommandFailed {
                command: self.program.clone(),
                message: stderr.trim().to_string(),
            });
        }

        Ok(answered_block_number(&String::from_utf8_lossy(&output.stdout)))
    }
}

/// Whether a JSON-RPC response body carries a non-null `result`
fn answered_block_number(body: &str) -> bool {
    serde_json::from_str::<Value>(body.trim())
        .ok()
        .and_then(|v| v.get("result").cloned())
        .is_some_and(|r| !r.is_null())
}
