//! Domain Layer
//!
//! The deployment model without any I/O: parameter files, deployment
//! outputs, app settings and the contract deployer's result.
//!
//! ## Structure
//!
//! - `entities/` - Documents loaded from files or cloud responses
//! - `value_objects/` - Immutable value types (Region, Step, Secret)
//! - `services/` - Pure logic (parameter rewrite, output parsing, readiness)
//! - `ports/` - Interface definitions for infrastructure
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system, processes or network
//! 2. **Ports & Adapters** - All I/O goes through trait-defined ports

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
