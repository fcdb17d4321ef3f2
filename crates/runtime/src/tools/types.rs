//! Tool-related types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A tool as described by the server that provides it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON-Schema-like object describing the tool's input.
    #[serde(default)]
    pub input_schema: Map<String, Value>,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            input_schema: Map::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the input schema. Non-object values leave the schema empty.
    pub fn with_input_schema(mut self, schema: Value) -> Self {
        self.input_schema = match schema {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        self
    }
}

/// The result of one tool call, paired with the id of the call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInvocationResult {
    pub tool_call_id: String,
    pub result: Value,
}
