//! Azure adapter
//!
//! Implements `CloudPlatform` on top of the Azure CLI (`az`).

mod az_cli;
mod platform;

pub use az_cli::AzCli;
pub use platform::AzCliPlatform;
