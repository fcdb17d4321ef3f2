//! Toolbridge runtime — model backends, tool hosts and query orchestration.
//!
//! This crate connects a chat-completion model to the tools exposed by an MCP
//! server. Tool descriptions from the server are adapted into the model's
//! function-calling schema, and each query runs through a bounded
//! request / execute / respond protocol.
//!
//! # Overview
//!
//! - **Session**: owns the backend, the tool host and the adapted tool specs,
//!   and answers queries with [`Session::process_query`].
//! - **Backend**: a trait abstracting chat-completion providers. The
//!   [`OpenAiBackend`] speaks the OpenAI Chat Completions API.
//! - **ToolHost**: a trait for discovering and invoking tools. The
//!   [`McpToolHost`] runs them on an MCP server child process.
//!
//! # Example
//!
//! ```ignore
//! use mcp::{Interpreters, ServerConfig};
//! use runtime::{McpToolHost, OpenAiBackend, Session};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::for_script("weather.py", &Interpreters::default())?;
//! let host = McpToolHost::spawn(config).await?;
//! let backend = OpenAiBackend::builder("sk-...", "gpt-4o-mini").build();
//!
//! let session = Session::new(backend, host);
//! let answer = session.process_query("Any weather alerts in CA?").await?;
//! println!("{answer}");
//!
//! session.into_host().shutdown().await?;
//! # Ok(())
//! # }
//! ```

mod conversation;
mod error;
pub mod model;
pub mod providers;
mod session;
pub mod tools;

pub use conversation::{Conversation, Transcript};
pub use error::{Error, Result};
pub use model::{Backend, Message, ModelError, ModelRequest, ModelResponse, ToolCall, ToolSpec};
pub use providers::{OpenAiBackend, OpenAiBackendBuilder};
pub use session::{DEFAULT_MAX_TOOL_ROUNDS, Session};
pub use tools::{
    EmptyToolHost, McpToolHost, ToolDescriptor, ToolError, ToolHost, ToolInvocationResult,
};
