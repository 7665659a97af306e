//! Node readiness adapters

mod curl;
mod sleeper;

pub use curl::CurlRpcProbe;
pub use sleeper::ThreadSleeper;
