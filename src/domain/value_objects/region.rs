//! Region and Resource Group Value Objects

use std::fmt;

use serde::{Deserialize, Serialize};

/// An Azure region in its canonical short form (`eastus`, `westeurope`).
///
/// Display names such as `"East US"` are normalized on parse.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Region(String);

impl Region {
    /// Parse a region name, returning `None` for blank input.
    pub fn parse(input: &str) -> Option<Self> {
        let normalized: String = input
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();

        if normalized.is_empty() {
            None
        } else {
            Some(Self(normalized))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resource group the whole deployment lands in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceGroup {
    pub name: String,
    /// Region used if the group has to be created
    pub region: Option<Region>,
}

impl ResourceGroup {
    pub fn new(name: impl Into<String>, region: Option<Region>) -> Self {
        Self {
            name: name.into(),
            region,
        }
    }
}
