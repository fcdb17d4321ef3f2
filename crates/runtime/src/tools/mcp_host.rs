//! MCP-backed tool host.

use super::{ToolDescriptor, ToolError, ToolHost};
use mcp::{McpClient, ServerConfig, Tool};
use serde_json::{Map, Value};
use tracing::warn;

impl From<&Tool> for ToolDescriptor {
    fn from(tool: &Tool) -> Self {
        Self {
            name: tool.name.to_string(),
            description: tool.description.as_deref().map(str::to_string),
            input_schema: (*tool.input_schema).clone(),
        }
    }
}

/// Tool host backed by an MCP server process.
pub struct McpToolHost {
    client: McpClient,
    descriptors: Vec<ToolDescriptor>,
}

impl McpToolHost {
    /// Spawn the MCP server and discover its tools.
    ///
    /// If discovery fails the server process is shut down before the error
    /// is returned.
    pub async fn spawn(config: ServerConfig) -> Result<Self, mcp::Error> {
        let mut client = McpClient::connect(config).await?;

        let discovered = client.discover_tools().await.map(|_| ());

        match discovered {
            Ok(()) => {
                let descriptors = client.tools().iter().map(ToolDescriptor::from).collect();
                Ok(Self {
                    client,
                    descriptors,
                })
            }
            Err(e) => {
                if let Err(shutdown) = client.shutdown().await {
                    warn!(error = %shutdown, "failed to stop MCP server after discovery error");
                }
                Err(e)
            }
        }
    }

    /// Name of the connected server.
    pub fn server_name(&self) -> &str {
        self.client.name()
    }

    /// Shut down the MCP server.
    pub async fn shutdown(self) -> Result<(), mcp::Error> {
        self.client.shutdown().await
    }
}

impl ToolHost for McpToolHost {
    fn descriptors(&self) -> &[ToolDescriptor] {
        &self.descriptors
    }

    async fn invoke(&self, name: &str, arguments: Map<String, Value>) -> Result<Value, ToolError> {
        let result = self.client.call_tool(name, arguments).await?;

        serde_json::to_value(&result.content)
            .map_err(|e| ToolError::Execution(format!("serialize result: {e}")))
    }
}
