//! ARM Parameter File Entity
//!
//! Parameter files look like:
//!
//! ```json
//! {
//!   "$schema": "...",
//!   "contentVersion": "1.0.0.0",
//!   "parameters": {
//!     "namePrefix": { "value": "sc" }
//!   }
//! }
//! ```
//!
//! The whole document is kept as a `serde_json::Value` so that fields we do
//! not know about (and their order) survive a rewrite untouched.

use std::path::Path;

use serde_json::{Map, Value};

use crate::error::{ScdeployError, ScdeployResult};

const PARAMETERS: &str = "parameters";
const VALUE: &str = "value";

#[derive(Debug, Clone, PartialEq)]
pub struct ParameterFile {
    doc: Value,
}

impl ParameterFile {
    /// Parse a parameter file. The top level must be a JSON object;
    /// nothing else is validated.
    pub fn from_json(content: &str, path: &Path) -> ScdeployResult<Self> {
        let doc: Value =
            serde_json::from_str(content).map_err(|e| ScdeployError::InvalidParameterFile {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        if !doc.is_object() {
            return Err(ScdeployError::InvalidParameterFile {
                path: path.to_path_buf(),
                message: "top level is not a JSON object".to_string(),
            });
        }

        Ok(Self { doc })
    }

    /// A document with no parameters, standing in for a missing file
    pub fn empty() -> Self {
        Self {
            doc: Value::Object(Map::new()),
        }
    }

    /// `parameters.<name>.value`, if present
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.doc.get(PARAMETERS)?.get(name)?.get(VALUE)
    }

    /// `parameters.<name>.value` as a string, if it is one
    pub fn str_value(&self, name: &str) -> Option<&str> {
        self.value(name).and_then(Value::as_str)
    }

    /// Set `parameters.<name>.value`, creating the entry (and the
    /// `parameters` object) when missing. Sibling keys of `value` in an
    /// existing entry are kept.
    pub fn set_value(&mut self, name: &str, value: Value) {
        let Some(root) = self.doc.as_object_mut() else {
            return;
        };

        let params = root
            .entry(PARAMETERS)
            .or_insert_with(|| Value::Object(Map::new()));
        if !params.is_object() {
            *params = Value::Object(Map::new());
        }
        let Some(params) = params.as_object_mut() else {
            return;
        };

        let entry = params
            .entry(name)
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        if let Some(obj) = entry.as_object_mut() {
            obj.insert(VALUE.to_string(), value);
        }
    }

    /// Names of all declared parameters, in file order
    pub fn names(&self) -> Vec<&str> {
        self.doc
            .get(PARAMETERS)
            .and_then(Value::as_object)
            .map(|params| params.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn as_value(&self) -> &Value {
        &self.doc
    }

    /// Pretty-printed JSON with a trailing newline
    pub fn to_json_pretty(&self) -> String {
        // Serializing a Value that came from valid JSON cannot fail.
        let mut out = serde_json::to_string_pretty(&self.doc).unwrap_or_else(|_| "{}".to_string());
        out.push('\n');
        out
    }
}
