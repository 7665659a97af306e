//! Deployment Outputs Entity
//!
//! ARM returns outputs as `{ "<name>": { "type": "String", "value": ... } }`.
//! We unwrap each entry to its `value` on construction.

use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeploymentOutputs {
    values: Map<String, Value>,
}

impl DeploymentOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the `properties.outputs` object of a deployment.
    /// Anything that is not an object yields no outputs.
    pub fn from_arm(outputs: &Value) -> Self {
        let values = outputs
            .as_object()
            .map(|obj| {
                obj.iter()
                    .map(|(name, entry)| {
                        let value = match entry.get("value") {
                            Some(v) => v.clone(),
                            None => entry.clone(),
                        };
                        (name.clone(), value)
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self { values }
    }

    pub fn with(mut self, name: impl Into<String>, value: Value) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Look an output up by name. ARM output names are case-insensitive,
    /// so an exact match is tried first and then a case-insensitive one.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name).or_else(|| {
            self.values
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v)
        })
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
