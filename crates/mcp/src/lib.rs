//! MCP (Model Context Protocol) client for tool servers run as child processes.
//!
//! A server is described by a script path. The script's extension picks the
//! interpreter, the process is spawned with stdio transport, and its tools are
//! discovered once before any call is made.
//!
//! # Example
//!
//! ```no_run
//! use mcp::{Interpreters, McpClient, ServerConfig};
//!
//! # async fn example() -> mcp::Result<()> {
//! let config = ServerConfig::for_script("weather.py", &Interpreters::default())?;
//! let mut client = McpClient::connect(config).await?;
//!
//! for tool in client.discover_tools().await? {
//!     println!("Tool: {}", tool.name);
//! }
//!
//! let mut args = serde_json::Map::new();
//! args.insert("state".into(), "CA".into());
//! let result = client.call_tool("get_alerts", args).await?;
//! println!("{:?}", result.content);
//!
//! client.shutdown().await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod launch;

pub use client::McpClient;
pub use error::{Error, Result};
pub use launch::{Interpreters, ServerConfig};
pub use rmcp::model::{CallToolResult, Tool};
