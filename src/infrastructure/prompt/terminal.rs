//! Region prompt on the terminal
//!
//! Only used when the run is interactive and stdin is a TTY.

use dialoguer::Input;

use crate::domain::ports::RegionPrompt;
use crate::domain::value_objects::Region;
use crate::error::{ScdeployError, ScdeployResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct DialoguerRegionPrompt;

impl DialoguerRegionPrompt {
    pub fn new() -> Self {
        Self
    }
}

#[allow(clippy::ptr_arg)]
fn validate_region(input: &String) -> Result<(), &'static str> {
    Region::parse(input)
        .map(|_| ())
        .ok_or("enter a region name such as eastus or westeurope")
}

impl RegionPrompt for DialoguerRegionPrompt {
    fn prompt_region(&self, resource_group: &str) -> ScdeployResult<Region> {
        let answer = Input::<String>::new()
            .with_prompt(format!(
                "Resource group '{}' does not exist. Region to create it in",
                resource_group
            ))
            .validate_with(validate_region)
            .interact_text()
            .map_err(|e| ScdeployError::Io(std::io::Error::other(e.to_string())))?;

        Region::parse(&answer).ok_or_else(|| {
            ScdeployError::missing_input("region", "an empty region name was entered")
        })
    }
}
