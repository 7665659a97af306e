//! Deploy Module
//!
//! Orchestrates one end-to-end deployment.
//!
//! ## Structure
//!
//! - `options` - Inputs for a run (`DeployOptions`)
//! - `result` - Per-step records and overall status (`DeployResult`)
//! - `use_case` - The pipeline itself (`DeployUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use scdeploy::application::deploy::{DeployOptions, DeployUseCase};
//!
//! let use_case = DeployUseCase::new(platform, deployer, store, probe, sleeper);
//! let result = use_case.execute(&DeployOptions::new(subscription, group, name));
//! ```

mod options;
mod result;
mod use_case;

pub use options::{
    DeployOptions, DEFAULT_CONSORTIUM_PARAMETERS, DEFAULT_CONSORTIUM_TEMPLATE,
    DEFAULT_SUPPLYCHAIN_PARAMETERS, DEFAULT_SUPPLYCHAIN_TEMPLATE,
};
pub use result::{DeployResult, StepRecord, StepStatus};
pub use use_case::DeployUseCase;
