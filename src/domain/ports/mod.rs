//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod cloud_platform;
pub mod contract_deployer;
pub mod deploy_events;
pub mod node_probe;
pub mod parameter_store;
pub mod region_prompt;

pub use cloud_platform::{AppTarget, CloudPlatform, TemplateDeployment, PRODUCTION_SLOT};
pub use contract_deployer::{ContractDeployer, ContractRequest, ContractRun};
pub use deploy_events::{DeployEvent, DeployEventSink, NoopEventSink, RunStatus};
pub use node_probe::{NodeProbe, Sleeper};
pub use parameter_store::ParameterStore;
pub use region_prompt::{NonInteractivePrompt, RegionPrompt};
