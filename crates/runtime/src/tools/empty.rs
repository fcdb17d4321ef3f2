//! Empty tool host implementation.

use crate::tools::{ToolDescriptor, ToolError, ToolHost};
use serde_json::{Map, Value};

/// A no-op tool host with no tools.
///
/// Useful for testing or when tools are not needed.
#[derive(Debug, Default)]
pub struct EmptyToolHost;

impl ToolHost for EmptyToolHost {
    fn descriptors(&self) -> &[ToolDescriptor] {
        &[]
    }

    async fn invoke(&self, name: &str, _arguments: Map<String, Value>) -> Result<Value, ToolError> {
        Err(ToolError::NotFound(name.to_string()))
    }
}
