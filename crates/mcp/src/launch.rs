//! Resolving a server script path into the command that runs it.

use std::collections::HashMap;
use std::path::Path;

use crate::error::{Error, Result};

/// Interpreter binaries used to run server scripts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpreters {
    /// Runs `.py` scripts.
    pub python: String,
    /// Runs `.js` scripts.
    pub node: String,
}

impl Default for Interpreters {
    fn default() -> Self {
        let python = if cfg!(windows) { "python" } else { "python3" };
        Self {
            python: python.to_string(),
            node: "node".to_string(),
        }
    }
}

/// Configuration for an MCP server process.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub name: String,
    pub command: String,
    pub args: Vec<String>,
    pub env: HashMap<String, String>,
}

impl ServerConfig {
    /// Build the launch configuration for a server script.
    ///
    /// The extension picks the interpreter: `.py` runs under Python, `.js`
    /// under Node. Anything else is rejected before a process is spawned.
    pub fn for_script(path: impl AsRef<Path>, interpreters: &Interpreters) -> Result<Self> {
        let path = path.as_ref();
        let command = match path.extension().and_then(|ext| ext.to_str()) {
            Some("py") => &interpreters.python,
            Some("js") => &interpreters.node,
            _ => {
                return Err(Error::UnsupportedScript {
                    path: path.to_path_buf(),
                });
            }
        };

        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            name,
            command: command.clone(),
            args: vec![path.display().to_string()],
            env: HashMap::new(),
        })
    }

    /// Add environment variables for the server process.
    pub fn with_env(mut self, env: HashMap<String, String>) -> Self {
        self.env.extend(env);
        self
    }
}
