//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `DeployUseCase` - Runs the full deployment pipeline

pub mod deploy;

pub use deploy::{DeployOptions, DeployResult, DeployUseCase, StepRecord, StepStatus};
