//! scdeploy - deployment orchestrator for a blockchain-backed supply chain
//!
//! Provisions an Azure resource group, deploys the consortium network and the
//! application stack from ARM templates, deploys the supply-chain contract onto
//! the new node and wires the web apps' settings together.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::deploy::{DeployOptions, DeployResult, DeployUseCase};
pub use domain::ports::RunStatus;
pub use config::Config;
pub use domain::services::parse_contract_output;
pub use error::{ScdeployError, ScdeployResult};
