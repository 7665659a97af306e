//! Supply-Chain Parameter Rewrite
//!
//! The supply-chain template has to share the consortium's name prefix,
//! account password and virtual network. Those values are copied into its
//! parameter file before it is deployed.

use serde_json::Value;

use crate::domain::entities::{DeploymentOutputs, ParameterFile};
use crate::domain::value_objects::Secret;

/// Parameter names involved in the rewrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterKeys {
    pub name_prefix: String,
    pub password: String,
    pub vnet_name: String,
}

impl Default for ParameterKeys {
    fn default() -> Self {
        Self {
            name_prefix: "namePrefix".to_string(),
            password: "ethereumAccountPsswd".to_string(),
            vnet_name: "vnetName".to_string(),
        }
    }
}

/// Copy the shared values into `target`.
///
/// The password is the one resolved for the whole run, so the template and
/// the contract deployer always agree on it. A name prefix missing from
/// `source` (or a missing vnet name) is written as JSON `null`. Returns the
/// names whose value actually changed.
pub fn rewrite_parameters(
    source: &ParameterFile,
    target: &mut ParameterFile,
    password: &Secret,
    vnet_name: Option<&str>,
    keys: &ParameterKeys,
) -> Vec<String> {
    let updates = [
        (
            keys.name_prefix.as_str(),
            source.value(&keys.name_prefix).cloned().unwrap_or(Value::Null),
        ),
        (
            keys.password.as_str(),
            Value::String(password.expose().to_string()),
        ),
        (
            keys.vnet_name.as_str(),
            vnet_name.map(|n| Value::String(n.to_string())).unwrap_or(Value::Null),
        ),
    ];

    let mut changed = Vec::new();
    for (name, value) in updates {
        if target.value(name) != Some(&value) {
            changed.push(name.to_string());
        }
        target.set_value(name, value);
    }
    changed
}

/// Pick the vnet the supply-chain stack should join: the consortium's
/// declared output if it has one, otherwise the first vnet in the group.
pub fn resolve_vnet_name(
    outputs: &DeploymentOutputs,
    output_key: &str,
    listed: &[String],
) -> Option<String> {
    outputs
        .get_str(output_key)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .or_else(|| listed.first().cloned())
}
