//! MCP error types.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The server script has an extension we don't know how to run.
    #[error("unsupported server script {path}: expected a .py or .js file")]
    UnsupportedScript { path: PathBuf },

    #[error("failed to connect to server {name}: {reason}")]
    Connect { name: String, reason: String },

    #[error("tool discovery failed: {0}")]
    Discovery(String),

    #[error("tool not found: {0}")]
    ToolNotFound(String),

    #[error("tool {name} failed: {reason}")]
    ToolExecution { name: String, reason: String },

    #[error("failed to shut down server: {0}")]
    Shutdown(String),
}

pub type Result<T> = std::result::Result<T, Error>;
