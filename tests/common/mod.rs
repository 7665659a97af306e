//! Common test utilities for scdeploy integration and scenario tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated project directory plus helpers to run the binary
//! - Fakes: In-memory implementations of the cloud and deployer ports
//! - Fixtures: Parameter files and deployer output
#![allow(dead_code)]

pub mod env;
pub mod fakes;
pub mod fixtures;

pub use env::*;
pub use fakes::*;
pub use fixtures::*;
