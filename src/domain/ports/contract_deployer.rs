//! Contract Deployer Port
//!
//! The contract is compiled and deployed by a separate Node program. This
//! port hides how that program is launched and how its output is captured.

use crate::domain::value_objects::Secret;
use crate::error::ScdeployResult;

/// Arguments handed to the deployer
#[derive(Debug, Clone)]
pub struct ContractRequest<'a> {
    pub contract_name: &'a str,
    pub rpc_endpoint: &'a str,
    pub password: &'a Secret,
}

/// What came back from one deployer run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContractRun {
    /// Combined stdout/stderr, in the order it was written
    pub output: String,
    /// Contents of the structured result channel, if the program used it
    pub structured: Option<String>,
    /// Exit code (`None` if killed by a signal)
    pub exit_code: Option<i32>,
}

impl ContractRun {
    pub fn succeeded(&self) -> bool {
        self.exit_code == Some(0)
    }
}

pub trait ContractDeployer {
    /// Run the deployer to completion. Errors mean the program could not be
    /// run at all; a run that reports failure is still `Ok`.
    fn deploy(&self, request: &ContractRequest<'_>) -> ScdeployResult<ContractRun>;
}
