//! Tool call arguments

use serde_json::{Map, Value};

use crate::domain::{DomainError, DomainResult};

/// Arguments passed to `tools/call`: always a JSON object.
pub type ToolArguments = Map<String, Value>;

/// Parse tool arguments from JSON text.
///
/// Empty input is malformed JSON like any other. Anything that parses but
/// is not an object is rejected, since MCP tool arguments are keyed.
pub fn parse_tool_arguments(raw: &str) -> DomainResult<ToolArguments> {
    match serde_json::from_str::<Value>(raw)? {
        Value::Object(map) => Ok(map),
        other => Err(DomainError::ParamsNotObject {
            kind: json_kind(&other),
        }),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
