//! Contract Deployer Output Parser
//!
//! The deployer reports its result as a JSON object. Three places are
//! checked, in order:
//!
//! 1. the structured result file (`SCDEPLOY_RESULT_FILE`), if it has content
//! 2. the last line of output starting with `SCDEPLOY_RESULT `
//! 3. the JSON object that ends the mixed output text
//!
//! Older deployer scripts only do (3).

use serde::Serialize;
use serde_json::Value;

use crate::domain::entities::ContractOutput;

/// Prefix of a result line in the deployer's output
pub const RESULT_SENTINEL: &str = "SCDEPLOY_RESULT ";

/// Where the result object was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputSource {
    ResultFile,
    SentinelLine,
    TrailingJson,
    /// No result object could be located
    None,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedOutput {
    pub output: ContractOutput,
    pub source: OutputSource,
    /// Why nothing was found, when `source` is `None`
    pub diagnostic: Option<String>,
}

/// Parse deployer output, preferring the structured channel.
pub fn parse_contract_output(text: &str, structured: Option<&str>) -> ParsedOutput {
    if let Some(content) = structured.map(str::trim).filter(|s| !s.is_empty()) {
        if let Some(value) = parse_object(content) {
            return found(&value, OutputSource::ResultFile);
        }
    }

    if let Some(value) = sentinel_object(text) {
        return found(&value, OutputSource::SentinelLine);
    }

    match trailing_object(text) {
        Some(value) => found(&value, OutputSource::TrailingJson),
        None => ParsedOutput {
            output: ContractOutput::default(),
            source: OutputSource::None,
            diagnostic: Some(if text.contains('{') {
                "output does not end with a JSON object".to_string()
            } else {
                "output contains no JSON object".to_string()
            }),
        },
    }
}

fn found(value: &Value, source: OutputSource) -> ParsedOutput {
    ParsedOutput {
        output: ContractOutput::from_value(value),
        source,
        diagnostic: None,
    }
}

fn parse_object(text: &str) -> Option<Value> {
    serde_json::from_str::<Value>(text)
        .ok()
        .filter(Value::is_object)
}

fn sentinel_object(text: &str) -> Option<Value> {
    text.lines()
        .rev()
        .filter_map(|line| line.trim_start().strip_prefix(RESULT_SENTINEL))
        .find_map(|rest| parse_object(rest.trim()))
}

/// The object that runs from some `{` to the end of the text.
///
/// Candidates are tried from the last `{` backwards, so a flat trailing
/// object is found on the first try and a nested one once the scan reaches
/// its outermost brace.
fn trailing_object(text: &str) -> Option<Value> {
    text.char_indices()
        .rev()
        .filter(|(_, c)| *c == '{')
        .find_map(|(idx, _)| parse_object(text[idx..].trim_end()))
}
