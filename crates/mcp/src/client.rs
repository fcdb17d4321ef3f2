//! Child-process MCP client built on the rmcp SDK.

use rmcp::{
    ServiceExt,
    model::{CallToolRequestParams, CallToolResult, RawContent, Tool},
    service::{RoleClient, RunningService},
    transport::{ConfigureCommandExt, TokioChildProcess},
};
use serde_json::{Map, Value};
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::launch::ServerConfig;

/// An MCP client connected to a server process.
///
/// The server process lives as long as the client; it is killed when the
/// client is dropped or shut down.
pub struct McpClient {
    name: String,
    service: RunningService<RoleClient, ()>,
    tools: Vec<Tool>,
}

impl McpClient {
    /// Spawn the server process and complete the initialize handshake.
    pub async fn connect(config: ServerConfig) -> Result<Self> {
        let name = config.name.clone();
        let connect_error = |reason: String| Error::Connect {
            name: name.clone(),
            reason,
        };

        info!(server = %name, command = %config.command, args = ?config.args, "spawning MCP server");

        let transport = TokioChildProcess::new(Command::new(&config.command).configure(|cmd| {
            cmd.args(&config.args).envs(&config.env);
        }))
        .map_err(|e| connect_error(e.to_string()))?;

        let service = ()
            .serve(transport)
            .await
            .map_err(|e| connect_error(e.to_string()))?;

        info!(server = %name, "connected to MCP server");

        Ok(Self {
            name,
            service,
            tools: Vec::new(),
        })
    }

    /// Server name, derived from the script file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// List every tool the server exposes and remember them for `call_tool`.
    pub async fn discover_tools(&mut self) -> Result<&[Tool]> {
        let tools = self
            .service
            .list_all_tools()
            .await
            .map_err(|e| Error::Discovery(e.to_string()))?;

        info!(server = %self.name, count = tools.len(), "discovered tools");
        self.tools = tools;
        Ok(&self.tools)
    }

    /// Tools found by the last discovery.
    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    /// Call a discovered tool with a JSON object of arguments.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> Result<CallToolResult> {
        if !self.tools.iter().any(|tool| tool.name == name) {
            return Err(Error::ToolNotFound(name.to_string()));
        }

        let params = CallToolRequestParams {
            name: name.to_string().into(),
            arguments: Some(arguments),
            meta: None,
            task: None,
        };

        let result = self
            .service
            .call_tool(params)
            .await
            .map_err(|e| Error::ToolExecution {
                name: name.to_string(),
                reason: e.to_string(),
            })?;

        if result.is_error.unwrap_or(false) {
            return Err(Error::ToolExecution {
                name: name.to_string(),
                reason: error_text(&result),
            });
        }

        debug!(tool = name, blocks = result.content.len(), "tool call returned");
        Ok(result)
    }

    /// Shut down the session and terminate the server process.
    pub async fn shutdown(self) -> Result<()> {
        let reason = self
            .service
            .cancel()
            .await
            .map_err(|e| Error::Shutdown(e.to_string()))?;
        debug!(server = %self.name, ?reason, "MCP server stopped");
        Ok(())
    }
}

/// Text blocks of an error result, one per line.
fn error_text(result: &CallToolResult) -> String {
    let text = result
        .content
        .iter()
        .filter_map(|content| match &content.raw {
            RawContent::Text(block) => Some(block.text.as_str()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n");

    if text.is_empty() {
        "server reported an error without details".to_string()
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launch::Interpreters;
    use serde_json::json;
    use std::time::Duration;

    const CALC_SERVER: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/calc_server.py");

    async fn connect_calc() -> McpClient {
        let config = ServerConfig::for_script(CALC_SERVER, &Interpreters::default()).unwrap();
        tokio::time::timeout(Duration::from_secs(10), McpClient::connect(config))
            .await
            .expect("connect timed out")
            .expect("connect to calc server")
    }

    fn args(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[tokio::test]
    async fn missing_interpreter_is_connect_error() {
        let interpreters = Interpreters {
            python: "definitely-not-a-binary-xyz".to_string(),
            node: "node".to_string(),
        };
        let config = ServerConfig::for_script("server.py", &interpreters).unwrap();

        let err = McpClient::connect(config).await.err().unwrap();
        assert!(matches!(err, Error::Connect { ref name, .. } if name == "server"));
    }

    #[tokio::test]
    async fn missing_script_is_connect_error() {
        let config =
            ServerConfig::for_script("/nonexistent/server.py", &Interpreters::default()).unwrap();

        let outcome = tokio::time::timeout(Duration::from_secs(10), McpClient::connect(config))
            .await
            .expect("connect should fail, not hang");
        assert!(matches!(outcome, Err(Error::Connect { .. })));
    }

    #[tokio::test]
    async fn discovers_and_calls_tools() {
        let mut client = connect_calc().await;
        assert_eq!(client.name(), "calc_server");
        assert!(client.tools().is_empty());

        let names: Vec<_> = client
            .discover_tools()
            .await
            .unwrap()
            .iter()
            .map(|tool| tool.name.to_string())
            .collect();
        assert_eq!(names, ["add", "boom"]);
        assert_eq!(client.tools().len(), 2);

        let result = client
            .call_tool("add", args(json!({"a": 2, "b": 3})))
            .await
            .unwrap();
        assert_eq!(
            serde_json::to_value(&result.content).unwrap(),
            json!([{"type": "text", "text": "5"}])
        );

        client.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn undiscovered_tool_is_not_found() {
        let mut client = connect_calc().await;
        client.discover_tools().await.unwrap();

        let err = client.call_tool("nope", Map::new()).await.unwrap_err();
        assert!(matches!(err, Error::ToolNotFound(ref name) if name == "nope"));

        client.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn error_result_carries_server_text() {
        let mut client = connect_calc().await;
        client.discover_tools().await.unwrap();

        let err = client.call_tool("boom", Map::new()).await.unwrap_err();
        assert!(matches!(
            err,
            Error::ToolExecution { ref name, ref reason } if name == "boom" && reason == "kaboom"
        ));

        client.shutdown().await.unwrap();
    }

    #[test]
    fn error_text_without_text_blocks_has_fallback() {
        let result = CallToolResult::error(vec![]);
        assert_eq!(error_text(&result), "server reported an error without details");
    }
}
