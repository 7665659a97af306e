//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `azure/` - Azure CLI backed `CloudPlatform`
//! - `contract/` - Node contract deployer
//! - `probe/` - JSON-RPC readiness probe and interruptible sleeper
//! - `prompt/` - Terminal region prompt
//! - `repositories/` - Parameter file store
//! - `events/` - NDJSON event sink

pub mod azure;
pub mod contract;
pub mod events;
pub mod probe;
pub mod prompt;
pub mod repositories;

// Re-export for convenience
pub use azure::{AzCli, AzCliPlatform};
pub use contract::{NodeContractDeployer, RESULT_FILE_ENV};
pub use events::JsonEventSink;
pub use probe::{CurlRpcProbe, ThreadSleeper};
pub use prompt::DialoguerRegionPrompt;
pub use repositories::JsonParameterStore;
