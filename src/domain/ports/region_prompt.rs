//! Region Prompt Port
//!
//! Supplies a region when a resource group has to be created and none was
//! given on the command line.

use crate::domain::value_objects::Region;
use crate::error::{ScdeployError, ScdeployResult};

/// Implementations can be:
/// - `DialoguerRegionPrompt`: asks on the terminal (interactive mode only)
/// - `NonInteractivePrompt`: fails fast with a missing-input error
pub trait RegionPrompt {
    fn prompt_region(&self, resource_group: &str) -> ScdeployResult<Region>;
}

/// Prompt used in CI and other unattended runs
pub struct NonInteractivePrompt;

impl RegionPrompt for NonInteractivePrompt {
    fn prompt_region(&self, resource_group: &str) -> ScdeployResult<Region> {
        Err(ScdeployError::missing_input(
            "region",
            format!(
                "resource group '{}' does not exist; pass --region or rerun with --interactive",
                resource_group
            ),
        ))
    }
}
