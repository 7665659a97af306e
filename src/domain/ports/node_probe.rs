//! Node Readiness Ports

use std::time::Duration;

use crate::error::ScdeployResult;

/// Asks a blockchain node whether it is serving RPC requests yet
pub trait NodeProbe {
    /// `Ok(false)` or a transient `Err` both mean "not yet"; the caller
    /// decides whether to retry.
    fn is_ready(&self, rpc_endpoint: &str) -> ScdeployResult<bool>;
}

/// Source of delays between probes, replaceable in tests
pub trait Sleeper {
    fn sleep(&self, duration: Duration);

    /// Whether the user asked to stop waiting
    fn is_cancelled(&self) -> bool {
        false
    }
}
