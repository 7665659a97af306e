//! Error types for scdeploy
//!
//! Library code returns `ScdeployResult`; the binary wraps it in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for scdeploy operations
pub type ScdeployResult<T> = Result<T, ScdeployError>;

/// Main error type for scdeploy operations
#[derive(Error, Debug)]
pub enum ScdeployError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A file the deployment depends on does not exist
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Parameter file is not a JSON object
    #[error("invalid parameter file {path}: {message}")]
    InvalidParameterFile { path: PathBuf, message: String },

    /// A required input was not supplied and prompting is not allowed
    #[error("missing required input '{field}' - {hint}")]
    MissingInput { field: String, hint: String },

    /// External command exited unsuccessfully
    #[error("command `{command}` failed: {message}")]
    CommandFailed { command: String, message: String },

    /// External command is not installed
    #[error("command `{program}` not found - is it installed and on PATH?")]
    CommandNotFound { program: String },

    /// External command produced output we could not interpret
    #[error("unexpected output from `{command}`: {message}")]
    UnexpectedOutput { command: String, message: String },

    /// Deployment did not declare an output we depend on
    #[error("deployment '{deployment}' has no output named '{name}'")]
    MissingOutput { deployment: String, name: String },

    /// Contract deployer ran but did not report a deployed contract
    #[error("contract deployment failed: {message}")]
    ContractFailed { message: String },

    /// Blockchain node never answered the readiness probe
    #[error("node at {endpoint} not ready after {attempts} attempts")]
    NodeNotReady { endpoint: String, attempts: u32 },

    /// Interrupted by the user (Ctrl+C)
    #[error("deployment cancelled")]
    Cancelled,

    /// Invalid configuration file
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// Could not take the exclusive lock on a file
    #[error("could not lock {path}: {message}")]
    Lock { path: PathBuf, message: String },
}

impl ScdeployError {
    /// Shorthand for a missing-input error with a CLI hint
    pub fn missing_input(field: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::MissingInput {
            field: field.into(),
            hint: hint.into(),
        }
    }
}
