//! Tool host trait.

use crate::tools::{ToolDescriptor, ToolError};
use serde_json::{Map, Value};
use std::future::Future;

/// Trait for tool execution hosts.
///
/// Implementations expose the tools discovered at connection time and
/// execute calls against them. This is the boundary between the model loop
/// and side effects.
pub trait ToolHost: Send + Sync {
    /// Tools discovered when the host connected.
    fn descriptors(&self) -> &[ToolDescriptor];

    /// Invoke a tool by name with a JSON object of arguments.
    fn invoke(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> impl Future<Output = Result<Value, ToolError>> + Send;
}
