//! Domain Entities
//!
//! Documents the deployment reads, mutates and writes back.
//! - `ParameterFile` - ARM parameter file (`parameters.<name>.value`)
//! - `DeploymentOutputs` - Outputs declared by a finished template deployment
//! - `AppSettings` - A web app's key/value configuration
//! - `ContractOutput` - Result reported by the contract deployer

mod app_settings;
mod contract_output;
mod deployment_outputs;
mod parameter_file;

pub use app_settings::AppSettings;
pub use contract_output::{ContractOutcome, ContractOutput};
pub use deployment_outputs::DeploymentOutputs;
pub use parameter_file::ParameterFile;
