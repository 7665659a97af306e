//! Pipeline Step Value Object

use std::fmt;

use serde::Serialize;

/// What happens to the run when a step fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepPolicy {
    /// Abort the whole deployment
    Fatal,
    /// Record the failure, skip dependent steps, keep going
    Recoverable,
}

/// Steps of the deployment pipeline, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Authenticate,
    RegisterProviders,
    EnsureResourceGroup,
    DeployConsortium,
    RewriteParameters,
    #[serde(rename = "deploy_supplychain")]
    DeploySupplyChain,
    WaitForNode,
    DeployContract,
    PatchApiSettings,
    PatchWebSettings,
}

impl Step {
    pub const ALL: [Step; 10] = [
        Step::Authenticate,
        Step::RegisterProviders,
        Step::EnsureResourceGroup,
        Step::DeployConsortium,
        Step::RewriteParameters,
        Step::DeploySupplyChain,
        Step::WaitForNode,
        Step::DeployContract,
        Step::PatchApiSettings,
        Step::PatchWebSettings,
    ];

    /// Stable identifier used in JSON events
    pub fn id(&self) -> &'static str {
        match self {
            Step::Authenticate => "authenticate",
            Step::RegisterProviders => "register_providers",
            Step::EnsureResourceGroup => "ensure_resource_group",
            Step::DeployConsortium => "deploy_consortium",
            Step::RewriteParameters => "rewrite_parameters",
            Step::DeploySupplyChain => "deploy_supplychain",
            Step::WaitForNode => "wait_for_node",
            Step::DeployContract => "deploy_contract",
            Step::PatchApiSettings => "patch_api_settings",
            Step::PatchWebSettings => "patch_web_settings",
        }
    }

    /// Human label for console output
    pub fn label(&self) -> &'static str {
        match self {
            Step::Authenticate => "Authenticate",
            Step::RegisterProviders => "Register resource providers",
            Step::EnsureResourceGroup => "Ensure resource group",
            Step::DeployConsortium => "Deploy consortium network",
            Step::RewriteParameters => "Rewrite supply-chain parameters",
            Step::DeploySupplyChain => "Deploy supply-chain stack",
            Step::WaitForNode => "Wait for blockchain node",
            Step::DeployContract => "Deploy contract",
            Step::PatchApiSettings => "Patch API app settings",
            Step::PatchWebSettings => "Patch web app settings",
        }
    }

    pub fn policy(&self) -> StepPolicy {
        match self {
            Step::DeploySupplyChain | Step::DeployContract => StepPolicy::Recoverable,
            _ => StepPolicy::Fatal,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
