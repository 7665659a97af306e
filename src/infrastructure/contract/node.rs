//! Node Contract Deployer
//!
//! Runs the contract deployment program as
//! `<program> <args...> <contract> <rpc endpoint> <password>`.
//!
//! Stdout and stderr share one temp file so the captured text keeps the
//! order the program wrote it in. The program may also write its result
//! object to the file named by `SCDEPLOY_RESULT_FILE`, which is read back
//! as the structured channel.

use std::fs;
use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tempfile::NamedTempFile;

use crate::config::ContractConfig;
use crate::domain::ports::{ContractDeployer, ContractRequest, ContractRun};
use crate::error::{ScdeployError, ScdeployResult};

/// Environment variable naming the structured result file
pub const RESULT_FILE_ENV: &str = "SCDEPLOY_RESULT_FILE";

#[derive(Debug, Clone)]
pub struct NodeContractDeployer {
    program: String,
    args: Vec<String>,
    working_dir: Option<PathBuf>,
}

impl NodeContractDeployer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            working_dir: None,
        }
    }

    pub fn from_config(config: &ContractConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
            working_dir: config.working_dir.clone(),
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Check if the program can be started at all
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
}

impl ContractDeployer for NodeContractDeployer {
    fn deploy(&self, request: &ContractRequest<'_>) -> ScdeployResult<ContractRun> {
        let result_file = NamedTempFile::new()?;
        let mut capture = tempfile::tempfile()?;
        let stdout = capture.try_clone()?;
        let stderr = capture.try_clone()?;

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg(request.contract_name)
            .arg(request.rpc_endpoint)
            .arg(request.password.expose())
            .env(RESULT_FILE_ENV, result_file.path())
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr));
        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }

        let status = cmd.status().map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                ScdeployError::CommandNotFound {
                    program: self.program.clone(),
                }
            } else {
                ScdeployError::Io(e)
            }
        })?;

        capture.seek(SeekFrom::Start(0))?;
        let mut bytes = Vec::new();
        capture.read_to_end(&mut bytes)?;

        let structured = fs::read_to_string(result_file.path())
            .ok()
            .filter(|s| !s.trim().is_empty());

        Ok(ContractRun {
            output: String::from_utf8_lossy(&bytes).into_owned(),
            structured,
            exit_code: status.code(),
        })
    }
}
