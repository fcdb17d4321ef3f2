//! Adapting server tool descriptions into model function-calling specs.
//!
//! The two formats are close: both carry a name, a description and a JSON
//! Schema for the input. The model side requires a description and an
//! object-typed parameter block with `properties` and `required` present,
//! so those are filled in when the server leaves them out. Nested schema
//! content is copied as-is and never validated here.

use crate::model::{ToolParameters, ToolSpec};
use crate::tools::ToolDescriptor;
use serde_json::{Map, Value};

/// Convert a tool descriptor into the model's tool spec.
pub fn adapt(descriptor: &ToolDescriptor) -> ToolSpec {
    let description = descriptor
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Tool: {}", descriptor.name));

    let properties = match descriptor.input_schema.get("properties") {
        Some(Value::Object(properties)) => properties.clone(),
        _ => Map::new(),
    };

    let required = match descriptor.input_schema.get("required") {
        Some(Value::Array(required)) => required.clone(),
        _ => Vec::new(),
    };

    ToolSpec {
        name: descriptor.name.clone(),
        description,
        parameters: ToolParameters {
            properties,
            required,
            ..Default::default()
        },
    }
}

/// Convert every descriptor, preserving order.
pub fn adapt_all(descriptors: &[ToolDescriptor]) -> Vec<ToolSpec> {
    descriptors.iter().map(adapt).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn add_tool() -> ToolDescriptor {
        ToolDescriptor::new("add")
            .with_description("Add two numbers")
            .with_input_schema(json!({
                "type": "object",
                "properties": {
                    "a": {"type": "number"},
                    "b": {"type": "number"}
                },
                "required": ["a", "b"]
            }))
    }

    #[test]
    fn copies_name_description_and_schema() {
        let spec = adapt(&add_tool());
        assert_eq!(spec.name, "add");
        assert_eq!(spec.description, "Add two numbers");
        assert_eq!(
            serde_json::to_value(&spec.parameters).unwrap(),
            json!({
                "type": "object",
                "properties": {
                    "a": {"type": "number"},
                    "b": {"type": "number"}
                },
                "required": ["a", "b"]
            })
        );
    }

    #[test]
    fn missing_description_is_synthesized() {
        let spec = adapt(&ToolDescriptor::new("list_files"));
        assert_eq!(spec.description, "Tool: list_files");

        let spec = adapt(&ToolDescriptor::new("list_files").with_description(""));
        assert_eq!(spec.description, "Tool: list_files");
    }

    #[test]
    fn missing_properties_and_required_default_to_empty() {
        let spec = adapt(&ToolDescriptor::new("ping").with_input_schema(json!({"type": "object"})));
        assert!(spec.parameters.properties.is_empty());
        assert!(spec.parameters.required.is_empty());
    }

    #[test]
    fn malformed_fields_are_treated_as_absent() {
        let descriptor = ToolDescriptor::new("odd").with_input_schema(json!({
            "properties": ["not", "a", "map"],
            "required": "a"
        }));
        let spec = adapt(&descriptor);
        assert!(spec.parameters.properties.is_empty());
        assert!(spec.parameters.required.is_empty());
    }

    #[test]
    fn nested_schema_is_passed_through() {
        let descriptor = ToolDescriptor::new("search").with_input_schema(json!({
            "properties": {
                "filter": {"anyOf": [{"type": "string"}, {"$ref": "#/defs/Filter"}]}
            },
            "required": [1, null]
        }));
        let spec = adapt(&descriptor);
        assert_eq!(
            spec.parameters.properties["filter"],
            json!({"anyOf": [{"type": "string"}, {"$ref": "#/defs/Filter"}]})
        );
        assert_eq!(spec.parameters.required, vec![json!(1), Value::Null]);
    }

    #[test]
    fn adapting_equal_descriptors_gives_equal_specs() {
        assert_eq!(adapt(&add_tool()), adapt(&add_tool()));
        let all = adapt_all(&[add_tool(), ToolDescriptor::new("ping")]);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "add");
        assert_eq!(all[1].name, "ping");
    }
}
