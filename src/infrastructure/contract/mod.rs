//! Contract deployer adapter

mod node;

pub use node::{NodeContractDeployer, RESULT_FILE_ENV};
