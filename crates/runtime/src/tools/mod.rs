//! Tool discovery, schema adaptation and execution.

pub mod errors;
mod empty;
mod mcp_host;
pub mod schema;
mod r#trait;
mod types;

pub use empty::EmptyToolHost;
pub use errors::ToolError;
pub use mcp_host::McpToolHost;
pub use r#trait::ToolHost;
pub use types::{ToolDescriptor, ToolInvocationResult};
